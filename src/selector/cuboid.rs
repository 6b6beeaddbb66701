use cgmath::Point3;
use log::debug;

use super::{RegionSelection, SelectorLimits, ShapeDescriptionSink, ShapeEvent};
use crate::error::{RegionError, RegionResult};
use crate::regions::{CuboidRegion, RegionShape};
use crate::world::WorldContext;

/// Two-corner box selection.
///
/// The picked corners are kept next to the region. They are the same as the region's corners
/// unless the region was changed directly, which [`RegionSelection::learn_changes`] repairs.
#[derive(Debug, Clone, Default)]
pub struct CuboidSelector {
    position1: Option<Point3<i32>>,
    position2: Option<Point3<i32>>,
    region: CuboidRegion,
}

impl CuboidSelector {
    /// Creates an empty selector in the given world.
    pub fn new(world: WorldContext) -> Self {
        Self {
            position1: None,
            position2: None,
            region: CuboidRegion::with_world(world, Point3::new(0, 0, 0), Point3::new(0, 0, 0)),
        }
    }

    /// Creates a complete selection with both corners picked.
    pub fn with_corners(world: WorldContext, pos1: Point3<i32>, pos2: Point3<i32>) -> Self {
        Self {
            position1: Some(pos1),
            position2: Some(pos2),
            region: CuboidRegion::with_world(world, pos1, pos2),
        }
    }

    /// The first corner, if picked.
    pub fn position1(&self) -> Option<Point3<i32>> {
        self.position1
    }

    /// The second corner, if picked.
    pub fn position2(&self) -> Option<Point3<i32>> {
        self.position2
    }
}

impl RegionSelection for CuboidSelector {
    type Shape = CuboidRegion;

    fn select_primary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.position1 == Some(position) {
            return Ok(false);
        }

        self.position1 = Some(position);
        self.region.set_pos1(position);
        debug!("cuboid selection: first corner at {position:?}");
        Ok(true)
    }

    fn select_secondary(
        &mut self,
        position: Point3<i32>,
        _limits: &SelectorLimits,
    ) -> RegionResult<bool> {
        if self.position2 == Some(position) {
            return Ok(false);
        }

        self.position2 = Some(position);
        self.region.set_pos2(position);
        debug!("cuboid selection: second corner at {position:?}");
        Ok(true)
    }

    fn is_defined(&self) -> bool {
        self.position1.is_some() && self.position2.is_some()
    }

    fn incomplete_region(&self) -> &CuboidRegion {
        &self.region
    }

    fn incomplete_region_mut(&mut self) -> &mut CuboidRegion {
        &mut self.region
    }

    fn primary_position(&self) -> RegionResult<Point3<i32>> {
        self.position1.ok_or(RegionError::IncompleteSelection)
    }

    fn learn_changes(&mut self) {
        self.position1 = Some(self.region.pos1());
        self.position2 = Some(self.region.pos2());
    }

    fn clear(&mut self) {
        self.position1 = None;
        self.position2 = None;
        self.region.set_pos1(Point3::new(0, 0, 0));
        self.region.set_pos2(Point3::new(0, 0, 0));
    }

    fn type_name(&self) -> &'static str {
        "cuboid"
    }

    fn type_id(&self) -> &'static str {
        "cuboid"
    }

    fn protocol_version(&self) -> u32 {
        0
    }

    fn information_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(p) = self.position1 {
            lines.push(format!("Position 1: ({}, {}, {})", p.x, p.y, p.z));
        }
        if let Some(p) = self.position2 {
            lines.push(format!("Position 2: ({}, {}, {})", p.x, p.y, p.z));
        }
        if self.is_defined() {
            let region = &self.region;
            lines.push(format!(
                "Size: {} x {} x {} ({} blocks)",
                region.width(),
                region.height(),
                region.length(),
                region.area()
            ));
        }
        lines
    }

    fn describe_shape(&self, sink: &mut dyn ShapeDescriptionSink) {
        let area = self.area();
        if let Some(p) = self.position1 {
            sink.dispatch(ShapeEvent::point(0, p, area));
        }
        if let Some(p) = self.position2 {
            sink.dispatch(ShapeEvent::point(1, p, area));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    fn limits() -> SelectorLimits {
        SelectorLimits::unlimited()
    }

    #[test]
    fn test_two_picks_define_the_box() {
        let mut selector = CuboidSelector::default();
        assert!(selector.select_primary(Point3::new(0, 0, 0), &limits()).unwrap());
        assert!(!selector.is_defined());
        assert_eq!(selector.area(), None);
        assert!(matches!(selector.region(), Err(RegionError::IncompleteSelection)));

        assert!(selector.select_secondary(Point3::new(3, 3, 3), &limits()).unwrap());
        assert!(selector.is_defined());
        assert_eq!(selector.area(), Some(64));
        assert_eq!(selector.region().unwrap().area(), 64);
    }

    #[test]
    fn test_repeated_pick_reports_no_change() {
        let mut selector = CuboidSelector::default();
        selector.select_primary(Point3::new(1, 2, 3), &limits()).unwrap();
        assert!(!selector.select_primary(Point3::new(1, 2, 3), &limits()).unwrap());
        assert!(selector.select_secondary(Point3::new(1, 2, 3), &limits()).unwrap());
        assert!(!selector.select_secondary(Point3::new(1, 2, 3), &limits()).unwrap());
    }

    #[test]
    fn test_clear_returns_to_empty() {
        let mut selector =
            CuboidSelector::with_corners(WorldContext::detached(), Point3::new(0, 0, 0), Point3::new(3, 3, 3));
        selector.clear();

        assert!(!selector.is_defined());
        assert!(selector.primary_position().is_err());
        assert_eq!(selector.incomplete_region().area(), 1);
    }

    #[test]
    fn test_learn_changes_follows_the_region() {
        let mut selector =
            CuboidSelector::with_corners(WorldContext::detached(), Point3::new(0, 0, 0), Point3::new(3, 3, 3));
        selector.incomplete_region_mut().shift(Vector3::new(10, 0, 0));
        assert_eq!(selector.primary_position().unwrap(), Point3::new(0, 0, 0));

        selector.learn_changes();
        assert_eq!(selector.primary_position().unwrap(), Point3::new(10, 0, 0));
        assert_eq!(selector.position2(), Some(Point3::new(13, 3, 3)));
    }

    #[test]
    fn test_describe_emits_known_corners() {
        let mut selector = CuboidSelector::default();
        selector.select_secondary(Point3::new(5, 6, 7), &limits()).unwrap();

        let mut events = Vec::new();
        selector.describe_shape(&mut events);
        assert_eq!(events, vec![ShapeEvent::point(1, Point3::new(5, 6, 7), None)]);
    }
}
