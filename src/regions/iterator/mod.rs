//! # Region Iteration
//!
//! Iterators that walk the blocks of a region.
//!
//! Two strategies produce the same point sets:
//! - **Scanning** ([`RegionIterator`], [`FlatRegionIterator`]) walks the bounding box and keeps
//!   the positions the region contains. It works for any shape.
//! - **Direct enumeration** ([`CuboidIterator`], [`EllipseFootprintIterator`],
//!   [`EllipsoidIterator`]) computes each row's extent up front and never visits a position
//!   outside the shape.
//!
//! Extrusions are walked column by column with [`FlatRegion3DIterator`] on top of a footprint
//! iterator.

use cgmath::{Point2, Point3};

mod cuboid_iterator;
pub(crate) mod ellipse;
mod flat_region_3d_iterator;
mod flat_region_iterator;
mod region_iterator;
mod union_iterator;

pub use cuboid_iterator::CuboidIterator;
pub use ellipse::{EllipseFootprintIterator, EllipsoidIterator};
pub use flat_region_3d_iterator::FlatRegion3DIterator;
pub use flat_region_iterator::FlatRegionIterator;
pub use region_iterator::RegionIterator;
pub use union_iterator::UnionIterator;

/// Iterator over every block of a [`RegionShape`](super::RegionShape).
#[derive(Debug)]
pub enum RegionIter<'a> {
    /// Box walk in x, z, y order.
    Cuboid(CuboidIterator),
    /// Column walk over a horizontal footprint.
    Columns(FlatRegion3DIterator<'a>),
    /// Row spans of an ellipsoid.
    Ellipsoid(EllipsoidIterator),
    /// Bounding box scan filtered by containment.
    Scan(RegionIterator<'a>),
    /// Member regions one after another, skipping blocks already yielded.
    Union(UnionIterator<'a>),
}

impl Iterator for RegionIter<'_> {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RegionIter::Cuboid(iter) => iter.next(),
            RegionIter::Columns(iter) => iter.next(),
            RegionIter::Ellipsoid(iter) => iter.next(),
            RegionIter::Scan(iter) => iter.next(),
            RegionIter::Union(iter) => iter.next(),
        }
    }
}

/// Iterator over the footprint of a [`FlatRegion`](super::FlatRegion).
#[derive(Debug)]
pub enum FlatRegionIter<'a> {
    /// Footprint bounding box scan filtered by containment.
    Scan(FlatRegionIterator<'a>),
    /// Column spans of an ellipse.
    Ellipse(EllipseFootprintIterator),
}

impl Iterator for FlatRegionIter<'_> {
    type Item = Point2<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            FlatRegionIter::Scan(iter) => iter.next(),
            FlatRegionIter::Ellipse(iter) => iter.next(),
        }
    }
}
