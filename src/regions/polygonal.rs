//! # Polygonal Region
//!
//! A simple polygon in the (x, z) plane extruded over a vertical span. The polygon may be
//! concave; vertex order defines its edges, with the last vertex connected back to the
//! first.

use std::collections::HashSet;

use cgmath::{Point2, Point3, Vector2, Vector3};
use log::trace;

use super::iterator::FlatRegionIterator;
use super::{FlatRegion, FlatRegionIter, RegionIter, RegionShape};
use crate::chunk::to_chunk;
use crate::error::{RegionError, RegionResult};
use crate::math::{BlockPoint2Ext, BlockPoint3Ext};
use crate::world::{WorldContext, DEFAULT_MAX_Y, DEFAULT_MIN_Y};

/// An extruded polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygonal2DRegion {
    points: Vec<Point2<i32>>,
    min: Point2<i32>,
    max: Point2<i32>,
    min_y: i32,
    max_y: i32,
    /// Set once a vertical extent has been assigned, even a collapsed one.
    has_y: bool,
    world: WorldContext,
}

impl Default for Polygonal2DRegion {
    fn default() -> Self {
        Self::empty(WorldContext::detached())
    }
}

impl Polygonal2DRegion {
    /// Creates a polygon with no vertices and no vertical extent.
    pub fn empty(world: WorldContext) -> Self {
        Self {
            points: Vec::new(),
            min: Point2::new(0, 0),
            max: Point2::new(0, 0),
            min_y: 0,
            max_y: 0,
            has_y: false,
            world,
        }
    }

    /// Creates a detached polygon. The span is clamped to the default world height.
    ///
    /// # Examples
    ///
    /// ```
    /// use cgmath::{Point2, Point3};
    /// use voxel_region::regions::{Polygonal2DRegion, RegionShape};
    ///
    /// let triangle = Polygonal2DRegion::new(
    ///     vec![Point2::new(0, 0), Point2::new(4, 0), Point2::new(0, 4)],
    ///     0,
    ///     0,
    /// );
    /// assert!(triangle.contains(Point3::new(1, 0, 1)));
    /// assert!(!triangle.contains(Point3::new(4, 0, 4)));
    /// ```
    pub fn new(points: Vec<Point2<i32>>, min_y: i32, max_y: i32) -> Self {
        let mut region = Self {
            points,
            min_y,
            max_y,
            has_y: true,
            ..Self::default()
        };
        region.recalculate((DEFAULT_MIN_Y, DEFAULT_MAX_Y));
        region
    }

    /// Creates a polygon in the given world, clamping the span to the world's height.
    ///
    /// # Errors
    /// [`RegionError::ReferenceLost`] if the world has been dropped.
    pub fn with_world(
        world: WorldContext,
        points: Vec<Point2<i32>>,
        min_y: i32,
        max_y: i32,
    ) -> RegionResult<Self> {
        let limits = world.limits()?;
        let mut region = Self {
            points,
            min_y,
            max_y,
            has_y: true,
            ..Self::empty(world)
        };
        region.recalculate(limits);
        Ok(region)
    }

    /// The vertices in order.
    pub fn points(&self) -> &[Point2<i32>] {
        &self.points
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` once a vertical extent has been assigned.
    pub fn has_y(&self) -> bool {
        self.has_y
    }

    /// Appends a vertex.
    ///
    /// # Errors
    /// [`RegionError::ReferenceLost`] if the world has been dropped. The vertex is not added.
    pub fn add_point(&mut self, point: Point2<i32>) -> RegionResult<()> {
        let limits = self.world.limits()?;
        self.points.push(point);
        self.recalculate(limits);
        Ok(())
    }

    /// Sets the bottom layer, clamped to the world.
    pub fn set_minimum_y(&mut self, y: i32) -> RegionResult<()> {
        let limits = self.world.limits()?;
        self.has_y = true;
        self.min_y = y;
        self.recalculate(limits);
        Ok(())
    }

    /// Sets the top layer, clamped to the world.
    pub fn set_maximum_y(&mut self, y: i32) -> RegionResult<()> {
        let limits = self.world.limits()?;
        self.has_y = true;
        self.max_y = y;
        self.recalculate(limits);
        Ok(())
    }

    /// Grows the vertical span to include `y`.
    ///
    /// The first call on a polygon without a vertical extent sets it to exactly `[y, y]`.
    ///
    /// # Returns
    /// `true` if the span changed.
    pub fn expand_y(&mut self, y: i32) -> bool {
        if !self.has_y {
            self.min_y = y;
            self.max_y = y;
            self.has_y = true;
            true
        } else if y < self.min_y {
            self.min_y = y;
            true
        } else if y > self.max_y {
            self.max_y = y;
            true
        } else {
            false
        }
    }

    /// Recomputes the footprint bounds and orders and clamps the vertical span.
    fn recalculate(&mut self, (world_min_y, world_max_y): (i32, i32)) {
        if self.points.is_empty() {
            self.min = Point2::new(0, 0);
            self.max = Point2::new(0, 0);
            self.min_y = 0;
            self.max_y = 0;
            return;
        }

        self.recalculate_footprint();

        let low = self.min_y.min(self.max_y);
        let high = self.min_y.max(self.max_y);
        self.min_y = num_traits::clamp(low, world_min_y, world_max_y);
        self.max_y = num_traits::clamp(high, world_min_y, world_max_y);
    }

    fn recalculate_footprint(&mut self) {
        let first = self.points.first().copied().unwrap_or(Point2::new(0, 0));
        let (min, max) = self
            .points
            .iter()
            .fold((first, first), |(min, max), point| {
                (min.min_components(*point), max.max_components(*point))
            });
        self.min = min;
        self.max = max;
    }

    /// Validates that every change is purely vertical.
    fn vertical_changes(&self, changes: &[Vector3<i32>], message: &'static str) -> RegionResult<()> {
        if changes.iter().any(|change| change.x != 0 || change.z != 0) {
            return Err(RegionError::unsupported(self.shape_name(), message));
        }
        Ok(())
    }
}

/// Crossing-number test with the boundary counted as inside.
///
/// Cross products are evaluated in 64 bits so that coordinates anywhere in the `i32` range
/// cannot overflow.
pub fn polygon_contains(points: &[Point2<i32>], target: Point2<i32>) -> bool {
    let Some(last) = points.last() else {
        return false;
    };
    if points.len() < 3 {
        return false;
    }

    let (tx, tz) = (target.x as i64, target.y as i64);
    let mut inside = false;
    let mut old = *last;

    for &new in points {
        if new == target {
            return true;
        }

        let (a, b) = if new.x > old.x { (old, new) } else { (new, old) };
        let (x1, z1, x2, z2) = (a.x as i64, a.y as i64, b.x as i64, b.y as i64);

        if x1 <= tx && tx <= x2 {
            let cross = (tz - z1) * (x2 - x1) - (z2 - z1) * (tx - x1);
            if cross == 0 {
                if (z1 <= tz) == (tz <= z2) {
                    return true;
                }
            } else if cross < 0 && x1 != tx {
                inside = !inside;
            }
        }

        old = new;
    }

    inside
}

impl RegionShape for Polygonal2DRegion {
    fn shape_name(&self) -> &'static str {
        "polygon"
    }

    fn minimum_point(&self) -> Point3<i32> {
        self.min.at_y(self.min_y)
    }

    fn maximum_point(&self) -> Point3<i32> {
        self.max.at_y(self.max_y)
    }

    fn area(&self) -> u64 {
        self.flat_points().count() as u64 * self.height() as u64
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        position.y >= self.min_y
            && position.y <= self.max_y
            && polygon_contains(&self.points, position.xz())
    }

    /// # Errors
    /// [`RegionError::UnsupportedOperation`] for any horizontal change.
    fn expand(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        self.vertical_changes(changes, "only vertical expansion is allowed")?;
        let limits = self.world.limits()?;
        for change in changes {
            if change.y > 0 {
                self.max_y += change.y;
            } else {
                self.min_y += change.y;
            }
        }
        self.recalculate(limits);
        trace!("polygon expanded to [{}, {}]", self.min_y, self.max_y);
        Ok(())
    }

    /// # Errors
    /// [`RegionError::UnsupportedOperation`] for any horizontal change.
    fn contract(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        self.vertical_changes(changes, "only vertical contraction is allowed")?;
        let limits = self.world.limits()?;
        for change in changes {
            if change.y > 0 {
                self.min_y += change.y;
            } else {
                self.max_y += change.y;
            }
        }
        self.recalculate(limits);
        trace!("polygon contracted to [{}, {}]", self.min_y, self.max_y);
        Ok(())
    }

    fn shift(&mut self, change: Vector3<i32>) {
        let offset = Vector2::new(change.x, change.z);
        for point in &mut self.points {
            *point += offset;
        }
        self.min_y += change.y;
        self.max_y += change.y;
        self.recalculate_footprint();
    }

    fn chunks(&self) -> HashSet<Point2<i32>> {
        self.flat_points()
            .map(|column| to_chunk(column.at_y(self.min_y)))
            .collect()
    }

    /// The vertices themselves.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if `max_points` is below the vertex count.
    fn polygonize(&self, max_points: Option<usize>) -> RegionResult<Vec<Point2<i32>>> {
        match max_points {
            Some(limit) if limit < self.points.len() => Err(RegionError::invalid(format!(
                "cannot reduce a polygon of {} vertices to {limit}",
                self.points.len()
            ))),
            _ => Ok(self.points.clone()),
        }
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Columns(self.columns())
    }

    /// Shoelace area of the polygon, floored, times the height.
    fn volume_estimate(&self) -> f64 {
        let Some(last) = self.points.last() else {
            return 0.0;
        };

        let mut previous = *last;
        let mut twice_area: i64 = 0;
        for &point in &self.points {
            twice_area += (previous.x as i64 + point.x as i64) * (previous.y as i64 - point.y as i64);
            previous = point;
        }

        (twice_area.abs() as f64 * 0.5).floor() * self.height() as f64
    }

    fn world(&self) -> &WorldContext {
        &self.world
    }

    fn set_world(&mut self, world: WorldContext) {
        self.world = world;
    }
}

impl FlatRegion for Polygonal2DRegion {
    fn minimum_y(&self) -> i32 {
        self.min_y
    }

    fn maximum_y(&self) -> i32 {
        self.max_y
    }

    fn flat_points(&self) -> FlatRegionIter<'_> {
        FlatRegionIter::Scan(FlatRegionIterator::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FixedHeight;

    fn triangle() -> Polygonal2DRegion {
        Polygonal2DRegion::new(
            vec![Point2::new(0, 0), Point2::new(4, 0), Point2::new(0, 4)],
            0,
            0,
        )
    }

    #[test]
    fn test_triangle_containment() {
        let region = triangle();
        assert!(region.contains(Point3::new(1, 0, 1)));
        assert!(region.contains(Point3::new(0, 0, 0)), "vertices are inside");
        assert!(region.contains(Point3::new(2, 0, 2)), "edges are inside");
        assert!(region.contains(Point3::new(2, 0, 0)), "edges are inside");
        assert!(!region.contains(Point3::new(4, 0, 4)));
        assert!(!region.contains(Point3::new(1, 1, 1)), "above the span");
    }

    #[test]
    fn test_triangle_area() {
        let region = triangle();
        assert_eq!(region.area(), 15);
        assert_eq!(region.iter().count(), 15);
        assert_eq!(region.volume_estimate(), 8.0);
    }

    #[test]
    fn test_concave_polygon() {
        // A "U" shape open towards +z.
        let region = Polygonal2DRegion::new(
            vec![
                Point2::new(0, 0),
                Point2::new(6, 0),
                Point2::new(6, 6),
                Point2::new(4, 6),
                Point2::new(4, 2),
                Point2::new(2, 2),
                Point2::new(2, 6),
                Point2::new(0, 6),
            ],
            10,
            11,
        );

        assert!(region.contains(Point3::new(1, 10, 5)));
        assert!(region.contains(Point3::new(5, 11, 5)));
        assert!(!region.contains(Point3::new(3, 10, 4)), "inside the notch");
        assert!(region.contains(Point3::new(3, 10, 2)), "notch floor is an edge");
    }

    #[test]
    fn test_fewer_than_three_points_is_empty() {
        let region = Polygonal2DRegion::new(vec![Point2::new(0, 0), Point2::new(5, 5)], 0, 3);
        assert!(!region.contains(Point3::new(0, 0, 0)));
        assert_eq!(region.area(), 0);
        assert_eq!(region.maximum_point(), Point3::new(5, 3, 5));
    }

    #[test]
    fn test_span_is_clamped_to_world() {
        let world = FixedHeight::new(0, 127).shared();
        let region = Polygonal2DRegion::with_world(
            WorldContext::attached(&world),
            vec![Point2::new(0, 0), Point2::new(1, 0), Point2::new(0, 1)],
            200,
            -5,
        )
        .unwrap();

        assert_eq!((region.minimum_y(), region.maximum_y()), (0, 127));
    }

    #[test]
    fn test_expand_is_vertical_only() {
        let mut region = triangle();
        let result = region.expand(&[Vector3::new(1, 0, 0)]);
        assert!(matches!(
            result,
            Err(RegionError::UnsupportedOperation { shape: "polygon", .. })
        ));

        region.expand(&[Vector3::new(0, 3, 0)]).unwrap();
        assert_eq!(region.maximum_y(), 3);
        region.contract(&[Vector3::new(0, 2, 0)]).unwrap();
        assert_eq!(region.minimum_y(), 2);
    }

    #[test]
    fn test_expand_y_distinguishes_unset_span() {
        let mut region = Polygonal2DRegion::default();
        assert!(!region.has_y());
        assert!(region.expand_y(0), "a zero span is still a change from none");
        assert!(!region.expand_y(0));
        assert!(region.expand_y(7));
        assert_eq!((region.minimum_y(), region.maximum_y()), (0, 7));
    }

    #[test]
    fn test_polygonize_rejects_small_cap() {
        let region = triangle();
        assert!(region.polygonize(Some(2)).is_err());
        assert_eq!(region.polygonize(Some(3)).unwrap().len(), 3);
        assert_eq!(region.polygonize(None).unwrap(), region.points().to_vec());
    }

    #[test]
    fn test_shift_moves_points_and_span() {
        let mut region = triangle();
        region.shift(Vector3::new(10, 5, -10));

        assert_eq!(region.points()[1], Point2::new(14, -10));
        assert_eq!(region.minimum_point(), Point3::new(10, 5, -10));
        assert!(region.contains(Point3::new(11, 5, -9)));
        assert_eq!(region.area(), 15);
    }
}
