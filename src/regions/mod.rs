//! # Regions Module
//!
//! Shapes that describe a set of block positions in the world.
//!
//! Every shape implements [`RegionShape`], the capability set shared by all regions:
//! - bounding box and volume queries
//! - containment tests
//! - expansion, contraction and translation
//! - chunk enumeration
//! - iteration over every contained block
//!
//! The set of shapes is closed. [`Region`] is the sum type over all of them and is what
//! composite regions and selectors hold.
//!
//! ## Consistency
//!
//! For any region, `area()` is the number of positions yielded by `iter()`, and a position is
//! yielded by `iter()` exactly when `contains()` returns `true` for it. Mutating a region while
//! one of its iterators is alive is prevented by the borrow on the iterator.

use std::collections::HashSet;
use std::fmt;

use cgmath::{EuclideanSpace, Point2, Point3, Vector3};

use crate::chunk::{to_chunk, to_chunk_cube};
use crate::error::{RegionError, RegionResult};
use crate::math::BlockPoint3Ext;
use crate::world::WorldContext;

pub mod convex_polyhedral;
pub mod cuboid;
pub mod cylinder;
pub mod ellipsoid;
pub mod intersection;
pub mod iterator;
pub mod polygonal;
pub mod polyhedron;

pub use convex_polyhedral::ConvexPolyhedralRegion;
pub use cuboid::CuboidRegion;
pub use cylinder::CylinderRegion;
pub use ellipsoid::EllipsoidRegion;
pub use intersection::RegionIntersection;
pub use iterator::{FlatRegion3DIterator, FlatRegionIter, RegionIter};
pub use polygonal::Polygonal2DRegion;

/// The capability set shared by every region shape.
///
/// Bounds are inclusive block coordinates and are defined even for a region that does not
/// contain anything yet.
pub trait RegionShape: fmt::Debug {
    /// Short lowercase name of the shape, used in error messages.
    fn shape_name(&self) -> &'static str;

    /// Lower corner of the axis-aligned bounding box.
    fn minimum_point(&self) -> Point3<i32>;

    /// Upper corner of the axis-aligned bounding box.
    fn maximum_point(&self) -> Point3<i32>;

    /// Geometric center of the region.
    fn center(&self) -> Point3<f64> {
        let min = self.minimum_point().to_f64();
        let max = self.maximum_point().to_f64();
        min.midpoint(max)
    }

    /// Number of blocks in the region.
    fn area(&self) -> u64 {
        self.iter().count() as u64
    }

    /// Size of the bounding box along X.
    fn width(&self) -> i32 {
        self.maximum_point().x - self.minimum_point().x + 1
    }

    /// Size of the bounding box along Y.
    fn height(&self) -> i32 {
        self.maximum_point().y - self.minimum_point().y + 1
    }

    /// Size of the bounding box along Z.
    fn length(&self) -> i32 {
        self.maximum_point().z - self.minimum_point().z + 1
    }

    /// Returns `true` if the block at `position` is part of the region.
    fn contains(&self, position: Point3<i32>) -> bool;

    /// Grows the region by each of the given directional deltas.
    ///
    /// # Errors
    /// [`RegionError::UnsupportedOperation`] or [`RegionError::InvalidArgument`] when a delta
    /// is not legal for the shape. The region is left unchanged in that case.
    fn expand(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()>;

    /// Shrinks the region by each of the given directional deltas.
    ///
    /// # Errors
    /// Same as [`RegionShape::expand`].
    fn contract(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()>;

    /// Translates the whole region. The area never changes.
    fn shift(&mut self, change: Vector3<i32>);

    /// Chunk columns touched by any contained block.
    fn chunks(&self) -> HashSet<Point2<i32>> {
        self.iter().map(to_chunk).collect()
    }

    /// Chunk cubes touched by any contained block.
    fn chunk_cubes(&self) -> HashSet<Point3<i32>> {
        self.iter().map(to_chunk_cube).collect()
    }

    /// Approximates the horizontal outline of the region as a polygon.
    ///
    /// # Arguments
    /// * `max_points` - Upper bound on the number of vertices, `None` for no bound
    ///
    /// # Returns
    /// The four corners of the bounding box footprint unless the shape knows better.
    ///
    /// # Errors
    /// [`RegionError::InvalidArgument`] if the shape cannot be described within `max_points`.
    fn polygonize(&self, max_points: Option<usize>) -> RegionResult<Vec<Point2<i32>>> {
        bounding_polygon(self.minimum_point(), self.maximum_point(), max_points)
    }

    /// Iterates over every contained block, each exactly once.
    fn iter(&self) -> RegionIter<'_>;

    /// Analytic volume of the ideal shape, for comparison with the exact [`RegionShape::area`].
    fn volume_estimate(&self) -> f64 {
        self.area() as f64
    }

    /// The world this region lives in.
    fn world(&self) -> &WorldContext;

    /// Moves the region to another world.
    fn set_world(&mut self, world: WorldContext);
}

/// A region that is a vertical extrusion of a horizontal footprint.
pub trait FlatRegion: RegionShape {
    /// Lowest Y coordinate of the extrusion.
    fn minimum_y(&self) -> i32;

    /// Highest Y coordinate of the extrusion.
    fn maximum_y(&self) -> i32;

    /// Iterates over the footprint, one position per column.
    fn flat_points(&self) -> FlatRegionIter<'_>;

    /// Iterates over every block, column by column.
    fn columns(&self) -> FlatRegion3DIterator<'_> {
        FlatRegion3DIterator::new(self.flat_points(), self.minimum_y(), self.maximum_y())
    }
}

/// The four corners of the footprint of the box `[min, max]`.
pub(crate) fn bounding_polygon(
    min: Point3<i32>,
    max: Point3<i32>,
    max_points: Option<usize>,
) -> RegionResult<Vec<Point2<i32>>> {
    if let Some(limit) = max_points {
        if limit < 4 {
            return Err(RegionError::invalid(format!(
                "cannot describe a bounding box with {limit} points"
            )));
        }
    }

    Ok(vec![
        Point2::new(min.x, min.z),
        Point2::new(min.x, max.z),
        Point2::new(max.x, max.z),
        Point2::new(max.x, min.z),
    ])
}

/// Any region shape.
#[derive(Debug, Clone)]
pub enum Region {
    /// An axis-aligned box.
    Cuboid(CuboidRegion),
    /// A vertical cylinder with an elliptical footprint.
    Cylinder(CylinderRegion),
    /// An axis-aligned ellipsoid.
    Ellipsoid(EllipsoidRegion),
    /// A vertically extruded polygon.
    Polygonal2D(Polygonal2DRegion),
    /// The convex hull of a set of vertices.
    ConvexPolyhedral(ConvexPolyhedralRegion),
    /// Several regions combined (union, see [`RegionIntersection`]).
    Intersection(RegionIntersection),
}

macro_rules! dispatch {
    ($region:expr, $inner:ident => $body:expr) => {
        match $region {
            Region::Cuboid($inner) => $body,
            Region::Cylinder($inner) => $body,
            Region::Ellipsoid($inner) => $body,
            Region::Polygonal2D($inner) => $body,
            Region::ConvexPolyhedral($inner) => $body,
            Region::Intersection($inner) => $body,
        }
    };
}

impl Region {
    /// Borrows the region as a trait object.
    pub fn as_shape(&self) -> &dyn RegionShape {
        dispatch!(self, r => r)
    }

    /// Mutably borrows the region as a trait object.
    pub fn as_shape_mut(&mut self) -> &mut dyn RegionShape {
        dispatch!(self, r => r)
    }

    /// Borrows the region as an extrusion, if it is one.
    pub fn as_flat(&self) -> Option<&dyn FlatRegion> {
        match self {
            Region::Cuboid(r) => Some(r),
            Region::Cylinder(r) => Some(r),
            Region::Polygonal2D(r) => Some(r),
            Region::Ellipsoid(_) | Region::ConvexPolyhedral(_) | Region::Intersection(_) => None,
        }
    }
}

impl RegionShape for Region {
    fn shape_name(&self) -> &'static str {
        dispatch!(self, r => r.shape_name())
    }

    fn minimum_point(&self) -> Point3<i32> {
        dispatch!(self, r => r.minimum_point())
    }

    fn maximum_point(&self) -> Point3<i32> {
        dispatch!(self, r => r.maximum_point())
    }

    fn center(&self) -> Point3<f64> {
        dispatch!(self, r => r.center())
    }

    fn area(&self) -> u64 {
        dispatch!(self, r => r.area())
    }

    fn width(&self) -> i32 {
        dispatch!(self, r => r.width())
    }

    fn height(&self) -> i32 {
        dispatch!(self, r => r.height())
    }

    fn length(&self) -> i32 {
        dispatch!(self, r => r.length())
    }

    fn contains(&self, position: Point3<i32>) -> bool {
        dispatch!(self, r => r.contains(position))
    }

    fn expand(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        dispatch!(self, r => r.expand(changes))
    }

    fn contract(&mut self, changes: &[Vector3<i32>]) -> RegionResult<()> {
        dispatch!(self, r => r.contract(changes))
    }

    fn shift(&mut self, change: Vector3<i32>) {
        dispatch!(self, r => r.shift(change))
    }

    fn chunks(&self) -> HashSet<Point2<i32>> {
        dispatch!(self, r => r.chunks())
    }

    fn chunk_cubes(&self) -> HashSet<Point3<i32>> {
        dispatch!(self, r => r.chunk_cubes())
    }

    fn polygonize(&self, max_points: Option<usize>) -> RegionResult<Vec<Point2<i32>>> {
        dispatch!(self, r => r.polygonize(max_points))
    }

    fn iter(&self) -> RegionIter<'_> {
        dispatch!(self, r => r.iter())
    }

    fn volume_estimate(&self) -> f64 {
        dispatch!(self, r => r.volume_estimate())
    }

    fn world(&self) -> &WorldContext {
        dispatch!(self, r => r.world())
    }

    fn set_world(&mut self, world: WorldContext) {
        dispatch!(self, r => r.set_world(world))
    }
}

impl From<CuboidRegion> for Region {
    fn from(value: CuboidRegion) -> Self {
        Region::Cuboid(value)
    }
}

impl From<CylinderRegion> for Region {
    fn from(value: CylinderRegion) -> Self {
        Region::Cylinder(value)
    }
}

impl From<EllipsoidRegion> for Region {
    fn from(value: EllipsoidRegion) -> Self {
        Region::Ellipsoid(value)
    }
}

impl From<Polygonal2DRegion> for Region {
    fn from(value: Polygonal2DRegion) -> Self {
        Region::Polygonal2D(value)
    }
}

impl From<ConvexPolyhedralRegion> for Region {
    fn from(value: ConvexPolyhedralRegion) -> Self {
        Region::ConvexPolyhedral(value)
    }
}

impl From<RegionIntersection> for Region {
    fn from(value: RegionIntersection) -> Self {
        Region::Intersection(value)
    }
}
