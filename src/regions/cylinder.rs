//! # Cylinder Region
//!
//! A vertical cylinder with an elliptical footprint.
//!
//! ## Half-block radius convention
//!
//! Block positions are compared at their centers, so a cylinder of radius `r` should include
//! every block whose center lies within `r + 0.5` of the center block's center. The stored
//! radius is therefore the geometric radius plus 0.5 on each axis. [`CylinderRegion::radius`]
//! and [`CylinderRegion::set_radius`] work in the geometric (deflated) space; the containment
//! test divides by the stored (inflated) radius.

use std::collections::HashSet;
use std::f64::consts::PI;

use cgmath::{InnerSpace, Point2, Point3, Vector2, Vector3};
use log::trace;

use super::iterator::ellipse::{axis_term, within};
use super::iterator::EllipseFootprintIterator;
use super::{FlatRegion, FlatRegionIter, RegionIter, RegionShape};
use crate::chunk::to_chunk;
use crate::error::{RegionError, RegionResult};
use crate::math::{abs2, max2, BlockPoint2Ext};
use crate::world::WorldContext;

fn half_block() -> Vector2<f64> {
    Vector2::new(0.5, 0.5)
}

/// A vertical cylinder spanning `[min_y, max_y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderRegion {
    center: Point2<i32>,
    /// Geometric radius plus 0.5 on each axis.
    radius: Vector2<f64>,
    min_y: i32,
    max_y: i32,
    has_y: bool,
    world: WorldContext,
}

impl Default for CylinderRegion {
    fn default() -> Self {
        Self {
            center: Point2::new(0, 0),
            radius: half_block(),
            min_y: 0,
            max_y: 0,
            has_y: false,
            world: WorldContext::detached(),
        }
    }
}

impl CylinderRegion {
    /// Creates a detached cylinder.
    ///
    /// # Arguments
    /// * `center` - Center block; its Y is ignored
    /// * `radius` - Geometric radius along X and Z
    /// * `min_y` - Bottom layer, inclusive
    /// * `max_y` - Top layer, inclusive
    pub fn new(center: Point3<i32>, radius: Vector2<f64>, min_y: i32, max_y: i32) -> Self {
        let mut region = Self {
            center: Point2::new(center.x, center.z),
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
            has_y: true,
            ..Self::default()
        };
        region.set_radius(radius);
        region
    }

    /// Creates an empty cylinder in the given world with no vertical extent yet.
    pub fn empty(world: WorldContext) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    /// Creates a circular cylinder spanning the full height of the world.
    ///
    /// # Errors
    /// [`RegionError::ReferenceLost`] if the world has been dropped.
    pub fn create_radius(
        world: WorldContext,
        center: Point3<i32>,
        radius: f64,
    ) -> RegionResult<Self> {
        let (min_y, max_y) = world.limits()?;
        let mut region = Self::new(center, Vector2::new(radius, radius), min_y, max_y);
        region.world = world;
        Ok(region)
    }

    /// The center block in (x, z).
    pub fn center_2d(&self) -> Point2<i32> {
        self.center
    }

    /// Moves the footprint to a new center; Y is ignored.
    pub fn set_center(&mut self, center: Point3<i32>) {
        self.center = Point2::new(center.x, center.z);
    }

    /// The geometric radius along X and Z.
    pub fn radius(&self) -> Vector2<f64> {
        self.radius - half_block()
    }

    /// Sets the geometric radius. Negative components are taken by magnitude.
    pub fn set_radius(&mut self, radius: Vector2<f64>) {
        self.radius = abs2(radius) + half_block();
    }

    /// Grows the radius on each axis where `min_radius` exceeds it.
    ///
    /// # Returns
    /// `true` if either component changed.
    pub fn extend_radius(&mut self, min_radius: Vector2<f64>) -> bool {
        let before = self.radius;
        self.set_radius(max2(abs2(min_radius), self.radius()));
        self.radius != before
    }

    /// Sets the bottom layer and marks the vertical extent as assigned.
    pub fn set_minimum_y(&mut self, y: i32) {
        self.has_y = true;
        self.min_y = y;
        self.max_y = self.max_y.max(y);
    }

    /// Sets the top layer and marks the vertical extent as assigned.
    pub fn set_maximum_y(&mut self, y: i32) {
        self.has_y = true;
        self.max_y = y;
        self.min_y = self.min_y.min(y);
    }

    /// Grows the vertical span to include `y`.
    ///
    /// The first call after creation sets the span to exactly `[y, y]`.
    ///
    /// # Returns
    /// `true` if the span changed.
    pub fn set_y(&mut self, y: i32) -> bool {
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

    /// Returns `true` once a vertical extent has been assigned.
    pub fn has_y(&self) -> bool {
        self.has_y
    }

    /// Largest whole-block offset from the center that can still be inside.
    fn extent(&self) -> Vector2<i32> {
        Vector2::new(self.radius.x.floor() as i32, self.radius.y.floor() as i32)
    }

    fn footprint(&self) -> EllipseFootprintIterator {
        EllipseFootprintIterator::new(self.center, self.radius, self.extent())
    }

    fn vertical_changes(&self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        if changes.iter().any(|change| change.x != 0 || change.z != 0) {
            return Err(RegionError::unsupported(
                self.shape_name(),
                "only vertical changes are allowed",
            ));
        }
        Ok(())
    }
}

impl RegionShape for CylinderRegion {
    fn shape_name(&self) -> &'static str {
        "cylinder"
    }

    fn minimum_point(&self) -> Point3<i32> {
        let extent = self.extent();
        Point3::new(
            self.center.x - extent.x,
            self.min_y,
            self.center.y - extent.y,
        )
    }

    fn maximum_point(&self) -> Point3<i32> {
        let extent = self.extent();
        Point3::new(
            self.center.x + extent.x,
            self.max_y,
            self.center.y + extent.y,
        )
    }

    fn center(&self) -> Point3<f64> {
        Point3::new(
            self.center.x as f64,
            (self.min_y as f64 + self.max_y as f64) / 2.0,
            self.center.y as f64,
        )
    }

    fn area(&self) -> u64 {
        self.footprint().count() as u64 * self.height() as u64
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        if position.y < self.min_y || position.y > self.max_y {
            return false;
        }

        let extent = self.extent();
        let dx = position.x - self.center.x;
        let dz = position.z - self.center.y;
        if dx.abs() > extent.x || dz.abs() > extent.y {
            return false;
        }

        within(axis_term(dx, self.radius.x) + axis_term(dz, self.radius.y))
    }

    /// Raises the top for positive Y deltas and lowers the bottom for negative ones.
    ///
    /// # Errors
    /// [`RegionError::UnsupportedOperation`] if any delta has an X or Z component.
    fn expand(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        self.vertical_changes(changes)?;
        for change in changes {
            if change.y > 0 {
                self.max_y += change.y;
            } else {
                self.min_y += change.y;
            }
        }
        trace!("cylinder expanded to [{}, {}]", self.min_y, self.max_y);
        Ok(())
    }

    /// Raises the bottom for positive Y deltas and lowers the top for negative ones, never
    /// past a single layer.
    ///
    /// # Errors
    /// [`RegionError::UnsupportedOperation`] if any delta has an X or Z component.
    fn contract(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        self.vertical_changes(changes)?;
        for change in changes {
            let height = self.max_y - self.min_y;
            if change.y > 0 {
                self.min_y += change.y.min(height);
            } else {
                self.max_y += change.y.max(-height);
            }
        }
        trace!("cylinder contracted to [{}, {}]", self.min_y, self.max_y);
        Ok(())
    }

    fn shift(&mut self, change: Vector3<i32>) {
        self.center += Vector2::new(change.x, change.z);
        self.min_y += change.y;
        self.max_y += change.y;
    }

    fn chunks(&self) -> HashSet<Point2<i32>> {
        self.footprint()
            .map(|column| to_chunk(column.at_y(self.min_y)))
            .collect()
    }

    /// Samples the border at `ceil(PI * |r|)` evenly spaced angles.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if `max_points` is below 4.
    fn polygonize(&self, max_points: Option<usize>) -> RegionResult<Vec<Point2<i32>>> {
        let mut count = (PI * self.radius.magnitude()).ceil() as usize;
        if let Some(limit) = max_points {
            if limit < 4 {
                return Err(RegionError::invalid(format!(
                    "cannot describe a cylinder with {limit} points"
                )));
            }
            if count >= limit {
                count = limit - 1;
            }
        }

        let center = self.center.to_f64();
        Ok((0..count)
            .map(|i| {
                let angle = i as f64 * (2.0 * PI) / count as f64;
                Point2::new(
                    (center.x + angle.cos() * self.radius.x).round() as i32,
                    (center.y + angle.sin() * self.radius.y).round() as i32,
                )
            })
            .collect())
    }

    fn iter(&self) -> RegionIter<'_> {
        RegionIter::Columns(self.columns())
    }

    /// `rx * rz * PI * height`, using the inflated radius.
    fn volume_estimate(&self) -> f64 {
        self.radius.x * self.radius.y * PI * self.height() as f64
    }

    fn world(&self) -> &WorldContext {
        &self.world
    }

    fn set_world(&mut self, world: WorldContext) {
        self.world = world;
    }
}

impl FlatRegion for CylinderRegion {
    fn minimum_y(&self) -> i32 {
        self.min_y
    }

    fn maximum_y(&self) -> i32 {
        self.max_y
    }

    fn flat_points(&self) -> FlatRegionIter<'_> {
        FlatRegionIter::Ellipse(self.footprint())
    }
}
