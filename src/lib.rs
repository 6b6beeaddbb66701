#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Region
//!
//! Region shapes and interactive selections for a block-based voxel world.
//!
//! This crate models 3D volumes made of whole blocks, answers containment, volume and
//! iteration queries over them, and drives the pick-by-pick protocol through which a user
//! builds such a volume. It does not store or change blocks; it only describes which
//! positions a selection covers.
//!
//! ## Key Modules
//!
//! * `regions` - The shapes (cuboid, cylinder, ellipsoid, extruded polygon, convex hull and
//!   composite) behind the common [`regions::RegionShape`] contract, plus their iterators
//! * `selector` - Per-shape state machines that build a region from primary and secondary
//!   picks, and the events that describe a selection to an observer
//! * `chunk` - Mapping from block positions to 16x16 chunk columns and cubes
//! * `world` - The height bounds a region clamps against, shared by the caller
//! * `math` - Block coordinate helpers on top of `cgmath`
//! * `core` - Shared resource containers
//! * `error` - The error type returned by every fallible operation
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use voxel_region::regions::RegionShape;
//! use voxel_region::selector::{RegionSelection, RegionSelector, SelectorKind, SelectorLimits};
//! use voxel_region::world::{FixedHeight, WorldContext};
//!
//! let world = FixedHeight::new(-64, 319).shared();
//! let limits = SelectorLimits::unlimited();
//!
//! let mut selector = RegionSelector::new(SelectorKind::Cuboid, WorldContext::attached(&world));
//! selector.select_primary(Point3::new(0, 0, 0), &limits).unwrap();
//! selector.select_secondary(Point3::new(3, 3, 3), &limits).unwrap();
//!
//! let region = selector.to_region().unwrap();
//! assert_eq!(region.area(), 64);
//! assert_eq!(region.iter().count(), 64);
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded. Regions hold a weak, non-`Send` handle to the world,
//! and iterators borrow the region they walk, so a region cannot change while it is being
//! iterated.

pub mod chunk;
pub mod core;
pub mod error;
pub mod math;
pub mod regions;
pub mod selector;
pub mod world;

pub use error::{RegionError, RegionResult};
pub use regions::{Region, RegionShape};
pub use selector::{RegionSelection, RegionSelector, SelectorKind, SelectorLimits};
