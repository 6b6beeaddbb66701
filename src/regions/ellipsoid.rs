//! # Ellipsoid Region
//!
//! An axis-aligned ellipsoid around a center block. Like the cylinder, the stored radius is
//! the geometric radius plus 0.5 on each axis so that blocks are compared at their centers.

use std::collections::HashSet;
use std::f64::consts::PI;

use cgmath::{Point2, Point3, Vector3};
use log::trace;

use super::iterator::ellipse::{axis_term, half_span, within};
use super::iterator::EllipsoidIterator;
use super::{RegionIter, RegionShape};
use crate::chunk::to_chunk;
use crate::error::{RegionError, RegionResult};
use crate::math::{abs3, max3, sum_deltas, sum_magnitudes};
use crate::world::WorldContext;

fn half_block() -> Vector3<f64> {
    Vector3::new(0.5, 0.5, 0.5)
}

/// Smallest stored radius that contraction can reach.
fn contraction_floor() -> Vector3<f64> {
    Vector3::new(1.5, 1.5, 1.5)
}

/// An axis-aligned ellipsoid.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidRegion {
    center: Point3<i32>,
    /// Geometric radius plus 0.5 on each axis.
    radius: Vector3<f64>,
    world: WorldContext,
}

impl Default for EllipsoidRegion {
    fn default() -> Self {
        Self {
            center: Point3::new(0, 0, 0),
            radius: half_block(),
            world: WorldContext::detached(),
        }
    }
}

impl EllipsoidRegion {
    /// Creates a detached ellipsoid with the given geometric radius.
    pub fn new(center: Point3<i32>, radius: Vector3<f64>) -> Self {
        let mut region = Self {
            center,
            ..Self::default()
        };
        region.set_radius(radius);
        region
    }

    /// Creates a single-block ellipsoid at the origin in the given world.
    pub fn empty(world: WorldContext) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// The center block.
    pub fn center_block(&self) -> Point3<i32> {
        self.center
    }

    /// Moves the ellipsoid to a new center.
    pub fn set_center(&mut self, center: Point3<i32>) {
        self.center = center;
    }

    /// The geometric radius.
    pub fn radius(&self) -> Vector3<f64> {
        self.radius - half_block()
    }

    /// Sets the geometric radius. Negative components are taken by magnitude.
    pub fn set_radius(&mut self, radius: Vector3<f64>) {
        self.radius = abs3(radius) + half_block();
    }

    /// Grows the radius on each axis where `min_radius` exceeds it.
    ///
    /// # Returns
    /// `true` if any component changed.
    pub fn extend_radius(&mut self, min_radius: Vector3<f64>) -> bool {
        let before = self.radius;
        self.set_radius(max3(abs3(min_radius), self.radius()));
        self.radius != before
    }

    fn extent(&self) -> Vector3<i32> {
        Vector3::new(
            self.radius.x.floor() as i32,
            self.radius.y.floor() as i32,
            self.radius.z.floor() as i32,
        )
    }

    /// Validates that the ellipsoid can grow symmetrically by `changes`.
    ///
    /// # Returns
    /// Half of the summed deltas (the center offset) and half of the summed magnitudes
    /// (the radius change).
    fn half_changes(
        &self,
        changes: &[Vector3<i32>],
    ) -> RegionResult<(Vector3<i32>, Vector3<f64>)> {
        let odd = changes
            .iter()
            .find(|change| change.x % 2 != 0 || change.y % 2 != 0 || change.z % 2 != 0);
        if let Some(change) = odd {
            return Err(RegionError::invalid(format!(
                "ellipsoid changes must be even on every axis, got {:?}",
                change
            )));
        }

        let offset = sum_deltas(changes) / 2;
        let growth = sum_magnitudes(changes) / 2;
        Ok((
            offset,
            Vector3::new(growth.x as f64, growth.y as f64, growth.z as f64),
        ))
    }

    /// Number of blocks in the row at offsets `(dy, dz)` from the center.
    fn row_length(&self, dy: i32, dz: i32) -> u64 {
        let prefix = EllipsoidIterator::row_prefix(dy, dz, self.radius);
        half_span(prefix, self.radius.x, self.extent().x).map_or(0, |h| 2 * h as u64 + 1)
    }
}

impl RegionShape for EllipsoidRegion {
    fn shape_name(&self) -> &'static str {
        "ellipsoid"
    }

    fn minimum_point(&self) -> Point3<i32> {
        self.center - self.extent()
    }

    fn maximum_point(&self) -> Point3<i32> {
        self.center + self.extent()
    }

    fn center(&self) -> Point3<f64> {
        Point3::new(
            self.center.x as f64,
            self.center.y as f64,
            self.center.z as f64,
        )
    }

    fn area(&self) -> u64 {
        let extent = self.extent();
        (-extent.y..=extent.y)
            .flat_map(|dy| (-extent.z..=extent.z).map(move |dz| (dy, dz)))
            .map(|(dy, dz)| self.row_length(dy, dz))
            .sum()
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        let offset = position - self.center;
        let extent = self.extent();
        if offset.x.abs() > extent.x || offset.y.abs() > extent.y || offset.z.abs() > extent.z {
            return false;
        }

        let prefix = EllipsoidIterator::row_prefix(offset.y, offset.z, self.radius);
        within(prefix + axis_term(offset.x, self.radius.x))
    }

    /// Grows symmetrically: the center moves by half the summed deltas and each radius grows
    /// by half the summed magnitudes.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if any delta has an odd component.
    fn expand(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        let (offset, growth) = self.half_changes(changes)?;
        self.center += offset;
        self.radius += growth;
        trace!("ellipsoid expanded to {:?} around {:?}", self.radius, self.center);
        Ok(())
    }

    /// Shrinks symmetrically. The stored radius never drops below 1.5 on any axis.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if any delta has an odd component.
    fn contract(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        let (offset, growth) = self.half_changes(changes)?;
        self.center -= offset;
        self.radius = max3(contraction_floor(), self.radius - growth);
        trace!("ellipsoid contracted to {:?} around {:?}", self.radius, self.center);
        Ok(())
    }

    fn shift(&mut self, change: Vector3<i32>) {
        self.center += change;
    }

    /// The center layer is the widest, so scanning it finds every touched column.
    fn chunks(&self) -> HashSet<Point2<i32>> {
        let extent = self.extent();
        (-extent.z..=extent.z)
            .flat_map(|dz| {
                let prefix = EllipsoidIterator::row_prefix(0, dz, self.radius);
                let h = half_span(prefix, self.radius.x, extent.x);
                h.into_iter().flat_map(move |h| (-h..=h).map(move |dx| (dx, dz)))
            })
            .map(|(dx, dz)| {
                to_chunk(Point3::new(
                    self.center.x + dx,
                    self.center.y,
                    self.center.z + dz,
                ))
            })
            .collect()
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Ellipsoid(EllipsoidIterator::new(
            self.center,
            self.radius,
            self.extent(),
        ))
    }

    /// `4/3 * PI * rx * ry * rz`, using the inflated radius.
    fn volume_estimate(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.x * self.radius.y * self.radius.z
    }

    fn world(&self) -> &WorldContext {
        &self.world
    }

    fn set_world(&mut self, world: WorldContext) {
        self.world = world;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(radius: f64) -> EllipsoidRegion {
        EllipsoidRegion::new(Point3::new(0, 64, 0), Vector3::new(radius, radius, radius))
    }

    #[test]
    fn test_area_matches_iteration() {
        for radius in [0.0, 1.0, 2.5, 4.0] {
            let region = sphere(radius);
            assert_eq!(region.area(), region.iter().count() as u64, "radius {radius}");
        }
    }

    #[test]
    fn test_area_tracks_volume_formula() {
        let region = EllipsoidRegion::new(Point3::new(0, 0, 0), Vector3::new(8.0, 5.0, 6.0));
        let estimate = region.volume_estimate();
        let error = (region.area() as f64 - estimate).abs() / estimate;
        assert!(error < 0.05, "area {} vs {estimate}", region.area());
    }

    #[test]
    fn test_odd_changes_are_rejected() {
        let mut region = sphere(3.0);
        let before = region.clone();

        let result = region.expand(&[Vector3::new(2, 0, 0), Vector3::new(0, 1, 0)]);
        assert!(matches!(result, Err(RegionError::InvalidArgument(_))));
        assert_eq!(region, before);
    }

    #[test]
    fn test_expand_moves_center_half_way() {
        let mut region = sphere(3.0);
        region.expand(&[Vector3::new(4, 0, 0)]).unwrap();

        assert_eq!(region.center_block(), Point3::new(2, 64, 0));
        assert_eq!(region.radius(), Vector3::new(5.0, 3.0, 3.0));
    }

    #[test]
    fn test_contract_stops_at_floor() {
        let mut region = sphere(3.0);
        region
            .contract(&[Vector3::new(0, 20, 0), Vector3::new(0, -20, 0)])
            .unwrap();
        assert_eq!(region.radius(), Vector3::new(3.0, 1.0, 3.0));

        region.contract(&[Vector3::new(0, 2, 0)]).unwrap();
        assert_eq!(region.radius().y, 1.0);
    }

    #[test]
    fn test_chunks_match_contained_columns() {
        let region = EllipsoidRegion::new(Point3::new(14, 70, -3), Vector3::new(6.0, 2.0, 6.0));
        let scanned: HashSet<_> = region.iter().map(to_chunk).collect();
        assert_eq!(region.chunks(), scanned);
    }

    #[test]
    fn test_extend_radius() {
        let mut region = sphere(1.0);
        assert!(region.extend_radius(Vector3::new(-2.0, 0.0, 1.0)));
        assert_eq!(region.radius(), Vector3::new(2.0, 1.0, 1.0));
        assert!(!region.extend_radius(Vector3::new(1.0, 1.0, 1.0)));
    }
}
