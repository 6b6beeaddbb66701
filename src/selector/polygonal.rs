use cgmath::{Point2, Point3};
use log::debug;

use super::{RegionSelection, SelectorLimits, ShapeDescriptionSink, ShapeEvent};
use crate::error::{RegionError, RegionResult};
use crate::math::BlockPoint3Ext;
use crate::regions::{FlatRegion, Polygonal2DRegion, RegionShape};
use crate::world::WorldContext;

/// Vertex-by-vertex polygon selection.
///
/// The primary pick starts a new polygon; each secondary pick appends a vertex and grows the
/// vertical span to the picked layer. Three vertices make a selection.
#[derive(Debug, Clone, Default)]
pub struct Polygonal2DSelector {
    /// The first vertex as picked, including its layer.
    pos1: Option<Point3<i32>>,
    region: Polygonal2DRegion,
}

impl Polygonal2DSelector {
    /// Creates an empty selector in the given world.
    pub fn new(world: WorldContext) -> Self {
        Self {
            pos1: None,
            region: Polygonal2DRegion::empty(world),
        }
    }

    /// Creates a selection from an explicit outline.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if `points` is empty, or
    /// [`RegionError::ReferenceLost`] if the world has been dropped.
    pub fn with_points(
        world: WorldContext,
        points: Vec<Point2<i32>>,
        min_y: i32,
        max_y: i32,
    ) -> RegionResult<Self> {
        let Some(first) = points.first().copied() else {
            return Err(RegionError::invalid("a polygon selection needs at least one point"));
        };

        let region = Polygonal2DRegion::with_world(world, points, min_y, max_y)?;
        Ok(Self {
            pos1: Some(Point3::new(first.x, region.minimum_y(), first.y)),
            region,
        })
    }

    /// Number of vertices picked so far.
    pub fn point_count(&self) -> usize {
        self.region.size()
    }
}

impl RegionSelection for Polygonal2DSelector {
    type Shape = Polygonal2DRegion;

    fn select_primary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.pos1 == Some(position) {
            return Ok(false);
        }

        let mut region = Polygonal2DRegion::empty(self.region.world().clone());
        region.expand_y(position.y);
        region.add_point(position.xz())?;

        self.region = region;
        self.pos1 = Some(position);
        debug!("polygon selection: first vertex at {position:?}");
        Ok(true)
    }

    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        let vertex = position.xz();
        if self.region.points().last() == Some(&vertex) {
            return Ok(false);
        }
        if SelectorLimits::reached(limits.polygon_vertex_limit, self.region.size()) {
            debug!(
                "polygon selection: vertex limit of {:?} reached",
                limits.polygon_vertex_limit
            );
            return Ok(false);
        }

        // adding the vertex re-clamps the span, so it has to come after growing it
        self.region.world().limits()?;
        self.region.expand_y(position.y);
        self.region.add_point(vertex)?;
        debug!(
            "polygon selection: vertex {} at {position:?}",
            self.region.size()
        );
        Ok(true)
    }

    fn is_defined(&self) -> bool {
        self.region.size() > 2
    }

    fn incomplete_region(&self) -> &Polygonal2DRegion {
        &self.region
    }

    fn incomplete_region_mut(&mut self) -> &mut Polygonal2DRegion {
        &mut self.region
    }

    fn primary_position(&self) -> RegionResult<Point3<i32>> {
        self.pos1.ok_or(RegionError::IncompleteSelection)
    }

    fn learn_changes(&mut self) {
        self.pos1 = self
            .region
            .points()
            .first()
            .map(|first| Point3::new(first.x, self.region.minimum_y(), first.y));
    }

    fn clear(&mut self) {
        self.pos1 = None;
        self.region = Polygonal2DRegion::empty(self.region.world().clone());
    }

    fn type_name(&self) -> &'static str {
        "2Dx1D polygon"
    }

    fn type_id(&self) -> &'static str {
        "polygon2d"
    }

    fn protocol_version(&self) -> u32 {
        0
    }

    fn information_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("# points: {}", self.region.size())];
        if self.region.has_y() {
            lines.push(format!(
                "Layers: {} to {}",
                self.region.minimum_y(),
                self.region.maximum_y()
            ));
        }
        lines
    }

    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink) {
        let area = self.area();
        for (id, point) in self.region.points().iter().enumerate() {
            sink.dispatch(ShapeEvent::point_2d(id, *point, area));
        }
        sink.dispatch(ShapeEvent::MinMax {
            min: self.region.minimum_y(),
            max: self.region.maximum_y(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_selector() -> Polygonal2DSelector {
        let limits = SelectorLimits::unlimited();
        let mut selector = Polygonal2DSelector::default();
        selector.select_primary(Point3::new(0, 10, 0), &limits).unwrap();
        selector.select_secondary(Point3::new(4, 12, 0), &limits).unwrap();
        selector.select_secondary(Point3::new(0, 11, 4), &limits).unwrap();
        selector
    }

    #[test]
    fn test_three_vertices_define_the_polygon() {
        let selector = triangle_selector();
        assert!(selector.is_defined());

        let region = selector.region().unwrap();
        assert_eq!((region.minimum_y(), region.maximum_y()), (10, 12));
        assert!(region.contains(Point3::new(1, 11, 1)));
    }

    #[test]
    fn test_two_vertices_are_incomplete() {
        let limits = SelectorLimits::unlimited();
        let mut selector = Polygonal2DSelector::default();
        selector.select_primary(Point3::new(0, 0, 0), &limits).unwrap();
        selector.select_secondary(Point3::new(3, 0, 0), &limits).unwrap();

        assert!(!selector.is_defined());
        assert_eq!(selector.area(), None);
        assert!(matches!(selector.region(), Err(RegionError::IncompleteSelection)));
    }

    #[test]
    fn test_repeating_the_last_vertex_is_ignored() {
        let limits = SelectorLimits::unlimited();
        let mut selector = triangle_selector();
        assert!(!selector.select_secondary(Point3::new(0, 200, 4), &limits).unwrap());
        assert_eq!(selector.point_count(), 3);
        assert_eq!(selector.incomplete_region().maximum_y(), 12);
    }

    #[test]
    fn test_vertex_limit() {
        let limits = SelectorLimits {
            polygon_vertex_limit: Some(3),
            ..SelectorLimits::default()
        };
        let mut selector = triangle_selector();
        let before = selector.incomplete_region().clone();

        assert!(!selector.select_secondary(Point3::new(9, 10, 9), &limits).unwrap());
        assert_eq!(selector.incomplete_region(), &before);
    }

    #[test]
    fn test_primary_restarts_the_polygon() {
        let limits = SelectorLimits::unlimited();
        let mut selector = triangle_selector();
        assert!(!selector.select_primary(Point3::new(0, 10, 0), &limits).unwrap());
        assert!(selector.select_primary(Point3::new(0, 20, 0), &limits).unwrap());
        assert_eq!(selector.point_count(), 1);
        assert_eq!(selector.primary_position().unwrap(), Point3::new(0, 20, 0));
    }

    #[test]
    fn test_learn_changes_uses_first_vertex_and_floor() {
        let mut selector = triangle_selector();
        selector
            .incomplete_region_mut()
            .shift(cgmath::Vector3::new(5, -2, 5));
        selector.learn_changes();

        assert_eq!(selector.primary_position().unwrap(), Point3::new(5, 8, 5));
    }

    #[test]
    fn test_describe_lists_vertices_then_span() {
        let selector = triangle_selector();
        let mut events = Vec::new();
        selector.describe_shape(&mut events);

        assert_eq!(events.len(), 4);
        assert!(matches!(events[2], ShapeEvent::Point2D { id: 2, position: [0, 4], .. }));
        assert_eq!(events[3], ShapeEvent::MinMax { min: 10, max: 12 });
    }
}
