//! # Cuboid Region
//!
//! An axis-aligned box spanned by two corner positions.
//!
//! The corners are kept exactly as picked. The minimum and maximum points are derived from
//! them on demand, so either corner may be the "low" one on any axis. Expansion and
//! contraction move whichever corner currently bounds the box on the affected side.

use std::collections::HashSet;

use cgmath::{Point2, Point3, Vector3};
use log::trace;

use super::iterator::{CuboidIterator, FlatRegionIterator};
use super::{FlatRegion, FlatRegionIter, Region, RegionIntersection, RegionIter, RegionShape};
use crate::chunk::{chunk_cube_range, chunk_range};
use crate::error::{RegionError, RegionResult};
use crate::math::BlockPoint3Ext;
use crate::world::WorldContext;

/// An axis-aligned box between two corners, both inclusive.
///
/// The default is the single block at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidRegion {
    pos1: Point3<i32>,
    pos2: Point3<i32>,
    world: WorldContext,
}

impl Default for CuboidRegion {
    fn default() -> Self {
        Self::new(Point3::new(0, 0, 0), Point3::new(0, 0, 0))
    }
}

impl CuboidRegion {
    /// Creates a detached box between two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use cgmath::Point3;
    /// use voxel_region::regions::{CuboidRegion, RegionShape};
    ///
    /// let region = CuboidRegion::new(Point3::new(3, 3, 3), Point3::new(0, 0, 0));
    /// assert_eq!(region.minimum_point(), Point3::new(0, 0, 0));
    /// assert_eq!(region.area(), 64);
    /// ```
    pub fn new(pos1: Point3<i32>, pos2: Point3<i32>) -> Self {
        Self::with_world(WorldContext::detached(), pos1, pos2)
    }

    /// Creates a box between two corners in the given world.
    pub fn with_world(world: WorldContext, pos1: Point3<i32>, pos2: Point3<i32>) -> Self {
        Self { pos1, pos2, world }
    }

    /// Creates a cube centered on `origin` reaching `apothem` blocks in every direction.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if `apothem` is negative.
    pub fn from_center(origin: Point3<i32>, apothem: i32) -> RegionResult<Self> {
        if apothem < 0 {
            return Err(RegionError::invalid(format!(
                "apothem must be non-negative, got {apothem}"
            )));
        }

        let size = Vector3::new(apothem, apothem, apothem);
        Ok(Self::new(origin - size, origin + size))
    }

    /// Creates the bounding box of any region, in the same world.
    pub fn make_cuboid(region: &dyn RegionShape) -> Self {
        Self::with_world(
            region.world().clone(),
            region.minimum_point(),
            region.maximum_point(),
        )
    }

    /// The first corner.
    pub fn pos1(&self) -> Point3<i32> {
        self.pos1
    }

    /// Replaces the first corner. No clamping is applied.
    pub fn set_pos1(&mut self, pos1: Point3<i32>) {
        self.pos1 = pos1;
    }

    /// The second corner.
    pub fn pos2(&self) -> Point3<i32> {
        self.pos2
    }

    /// Replaces the second corner. No clamping is applied.
    pub fn set_pos2(&mut self, pos2: Point3<i32>) {
        self.pos2 = pos2;
    }

    /// The six one-block-thick outer faces of the box.
    pub fn faces(&self) -> RegionIntersection {
        let mut slabs = self.side_slabs();
        let min = self.minimum_point();
        let max = self.maximum_point();
        slabs.push(self.slab(|p| p.with_y(min.y)));
        slabs.push(self.slab(|p| p.with_y(max.y)));
        RegionIntersection::from_members(self.world.clone(), slabs)
    }

    /// The four one-block-thick vertical walls of the box.
    pub fn walls(&self) -> RegionIntersection {
        RegionIntersection::from_members(self.world.clone(), self.side_slabs())
    }

    fn side_slabs(&self) -> Vec<Region> {
        let min = self.minimum_point();
        let max = self.maximum_point();
        vec![
            self.slab(|p| p.with_x(min.x)),
            self.slab(|p| p.with_x(max.x)),
            self.slab(|p| p.with_z(min.z)),
            self.slab(|p| p.with_z(max.z)),
        ]
    }

    fn slab(&self, project: impl Fn(Point3<i32>) -> Point3<i32>) -> Region {
        Region::Cuboid(Self::with_world(
            self.world.clone(),
            project(self.pos1),
            project(self.pos2),
        ))
    }

    /// Applies each change to the corner selected by `pick_max(change)` on every axis.
    fn move_corners(
        &mut self,
        changes: &[Vector3<i32>],
        pick_max: impl Fn(i32) -> bool,
    ) -> RegionResult<()> {
        let (min_y, max_y) = self.world.limits()?;

        let mut pos1 = self.pos1;
        let mut pos2 = self.pos2;
        for change in changes {
            for axis in 0..3 {
                let delta = change[axis];
                let first_is_bound = if pick_max(delta) {
                    pos1[axis] >= pos2[axis]
                } else {
                    pos1[axis] <= pos2[axis]
                };
                if first_is_bound {
                    pos1[axis] += delta;
                } else {
                    pos2[axis] += delta;
                }
            }
        }

        self.pos1 = pos1.clamp_y(min_y, max_y);
        self.pos2 = pos2.clamp_y(min_y, max_y);
        trace!("cuboid corners moved to {:?} and {:?}", self.pos1, self.pos2);
        Ok(())
    }
}

impl RegionShape for CuboidRegion {
    fn shape_name(&self) -> &'static str {
        "cuboid"
    }

    fn minimum_point(&self) -> Point3<i32> {
        self.pos1.min_components(self.pos2)
    }

    fn maximum_point(&self) -> Point3<i32> {
        self.pos1.max_components(self.pos2)
    }

    fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64 * self.length() as u64
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        position.contained_within(self.minimum_point(), self.maximum_point())
    }

    /// Positive deltas move the maximum corner outward, negative ones the minimum corner.
    fn expand(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        self.move_corners(changes, |delta| delta > 0)
    }

    /// Negative deltas pull the maximum corner inward, positive ones push the minimum corner.
    fn contract(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        self.move_corners(changes, |delta| delta < 0)
    }

    fn shift(&mut self, change: Vector3<i32>) {
        self.pos1 += change;
        self.pos2 += change;
    }

    fn chunks(&self) -> HashSet<Point2<i32>> {
        chunk_range(self.minimum_point(), self.maximum_point())
    }

    fn chunk_cubes(&self) -> HashSet<Point3<i32>> {
        chunk_cube_range(self.minimum_point(), self.maximum_point())
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Cuboid(CuboidIterator::new(
            self.minimum_point(),
            self.maximum_point(),
        ))
    }

    fn world(&self) -> &WorldContext {
        &self.world
    }

    fn set_world(&mut self, world: WorldContext) {
        self.world = world;
    }
}

impl FlatRegion for CuboidRegion {
    fn minimum_y(&self) -> i32 {
        self.pos1.y.min(self.pos2.y)
    }

    fn maximum_y(&self) -> i32 {
        self.pos1.y.max(self.pos2.y)
    }

    fn flat_points(&self) -> FlatRegionIter<'_> {
        FlatRegionIter::Scan(FlatRegionIterator::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::FixedHeight;

    fn cuboid(a: (i32, i32, i32), b: (i32, i32, i32)) -> CuboidRegion {
        CuboidRegion::new(Point3::new(a.0, a.1, a.2), Point3::new(b.0, b.1, b.2))
    }

    #[test]
    fn test_area_is_box_volume() {
        let region = cuboid((0, 0, 0), (3, 3, 3));
        assert_eq!(region.area(), 64);
        assert_eq!(region.iter().count(), 64);
        assert_eq!((region.width(), region.height(), region.length()), (4, 4, 4));
    }

    #[test]
    fn test_expand_moves_the_bounding_corner() {
        let mut region = cuboid((5, 10, 5), (0, 0, 0));
        region
            .expand(&[Vector3::new(2, 0, 0), Vector3::new(0, 0, -3)])
            .unwrap();

        assert_eq!(region.pos1(), Point3::new(7, 10, 5));
        assert_eq!(region.pos2(), Point3::new(0, 0, -3));
    }

    #[test]
    fn test_expand_then_contract_restores_box() {
        let mut region = cuboid((0, 10, 0), (4, 20, 4));
        let before = (region.minimum_point(), region.maximum_point());

        region.expand(&[Vector3::new(0, 5, 0)]).unwrap();
        assert_eq!(region.maximum_point().y, 25);
        region.contract(&[Vector3::new(0, -5, 0)]).unwrap();

        assert_eq!((region.minimum_point(), region.maximum_point()), before);
    }

    #[test]
    fn test_contract_positive_raises_minimum() {
        let mut region = cuboid((0, 0, 0), (9, 9, 9));
        region.contract(&[Vector3::new(3, 0, 0)]).unwrap();
        assert_eq!(region.minimum_point(), Point3::new(3, 0, 0));
        assert_eq!(region.maximum_point(), Point3::new(9, 9, 9));
    }

    #[test]
    fn test_expand_clamps_to_world_height() {
        let world = FixedHeight::new(0, 127).shared();
        let mut region = CuboidRegion::with_world(
            WorldContext::attached(&world),
            Point3::new(0, 100, 0),
            Point3::new(1, 120, 1),
        );

        region
            .expand(&[Vector3::new(0, 50, 0), Vector3::new(0, -500, 0)])
            .unwrap();
        assert_eq!(region.minimum_y(), 0);
        assert_eq!(region.maximum_y(), 127);
    }

    #[test]
    fn test_expand_without_world_fails_and_keeps_box() {
        let world = FixedHeight::default().shared();
        let mut region = CuboidRegion::with_world(
            WorldContext::attached(&world),
            Point3::new(0, 0, 0),
            Point3::new(1, 1, 1),
        );
        drop(world);

        let result = region.expand(&[Vector3::new(1, 0, 0)]);
        assert_eq!(result, Err(RegionError::ReferenceLost("world")));
        assert_eq!(region.maximum_point(), Point3::new(1, 1, 1));
    }

    #[test]
    fn test_shift_keeps_area() {
        let mut region = cuboid((0, 0, 0), (2, 3, 4));
        region.shift(Vector3::new(-10, 300, 7));
        assert_eq!(region.area(), 60);
        assert!(region.contains(Point3::new(-8, 303, 11)));
    }

    #[test]
    fn test_chunks_cover_negative_coordinates() {
        let region = cuboid((-1, 0, -1), (0, 0, 0));
        let chunks = region.chunks();
        assert_eq!(chunks.len(), 4);
        assert!(chunks.contains(&Point2::new(-1, -1)));
        assert_eq!(region.chunk_cubes().len(), 4);
    }

    #[test]
    fn test_walls_and_faces() {
        let region = cuboid((0, 0, 0), (4, 4, 4));

        let walls = region.walls();
        assert_eq!(walls.area(), 125 - 3 * 3 * 5);
        assert!(!walls.contains(Point3::new(2, 2, 2)));

        let faces = region.faces();
        assert_eq!(faces.area(), 125 - 27);
        assert!(faces.contains(Point3::new(2, 0, 2)));
    }

    #[test]
    fn test_from_center_rejects_negative_apothem() {
        assert!(CuboidRegion::from_center(Point3::new(0, 64, 0), -1).is_err());

        let cube = CuboidRegion::from_center(Point3::new(0, 64, 0), 2).unwrap();
        assert_eq!(cube.area(), 125);
        assert_eq!(cube.center(), Point3::new(0.0, 64.0, 0.0));
    }

    #[test]
    fn test_flat_points_cover_footprint() {
        let region = cuboid((0, 5, 0), (2, 9, 1));
        assert_eq!(region.flat_points().count(), 6);
        assert_eq!(region.columns().count() as u64, region.area());
    }
}
