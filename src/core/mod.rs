//! # Core Module
//!
//! Resource containers shared between the caller and the region engine.
//!
//! ## Key Components
//! - `StResource`: Single-threaded reference-counted resource with interior mutability
//! - `StWeak`: Non-owning handle to a `StResource`, used by regions to reach caller-owned
//!   context without keeping it alive
//!
//! ## Usage
//! ```rust
//! use voxel_region::core::StResource;
//!
//! let bounds = StResource::new((0, 255));
//! let handle = bounds.downgrade();
//! assert_eq!(*handle.upgrade().unwrap().get(), (0, 255));
//! ```

pub mod st_resource;

pub use st_resource::{StResource, StWeak};
