//! # World Module
//!
//! The world is an external collaborator: regions never read or write blocks, they only ask
//! the world for its vertical limits when a Y value has to be clamped.
//!
//! ## Ownership
//!
//! The caller owns the height-bound provider inside a [`StResource`]. Regions keep a
//! [`WorldContext`], which is a weak handle to it:
//! - a detached region (no world assigned) clamps to `[DEFAULT_MIN_Y, DEFAULT_MAX_Y]`
//! - a region whose world has been dropped reports [`RegionError::ReferenceLost`]

use std::{fmt, rc::Rc, sync::RwLock};

use crate::core::st_resource::{StResource, StWeak};
use crate::error::{RegionError, RegionResult};

/// Highest Y coordinate used when a region has no world.
pub const DEFAULT_MAX_Y: i32 = 255;
/// Lowest Y coordinate used when a region has no world.
pub const DEFAULT_MIN_Y: i32 = 0;

/// Supplies the vertical limits of a world.
pub trait HeightBounds {
    /// Highest buildable Y coordinate, inclusive.
    fn max_y(&self) -> i32;

    /// Lowest buildable Y coordinate, inclusive.
    fn min_y(&self) -> i32 {
        DEFAULT_MIN_Y
    }
}

/// A world with fixed vertical limits.
///
/// # Examples
///
/// ```
/// use voxel_region::world::{FixedHeight, HeightBounds};
///
/// let nether = FixedHeight::new(0, 127);
/// assert_eq!(nether.max_y(), 127);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeight {
    min_y: i32,
    max_y: i32,
}

impl FixedHeight {
    /// Creates a height provider for the inclusive span `[min_y, max_y]`.
    pub fn new(min_y: i32, max_y: i32) -> Self {
        Self {
            min_y: min_y.min(max_y),
            max_y: max_y.max(min_y),
        }
    }

    /// Wraps the provider in a shared resource, ready to hand to regions.
    pub fn shared(self) -> StResource<dyn HeightBounds> {
        share_world(self)
    }
}

impl Default for FixedHeight {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_Y, DEFAULT_MAX_Y)
    }
}

impl HeightBounds for FixedHeight {
    fn max_y(&self) -> i32 {
        self.max_y
    }

    fn min_y(&self) -> i32 {
        self.min_y
    }
}

/// Moves a height provider into a shared resource that regions can attach to.
///
/// # Examples
///
/// ```
/// use voxel_region::world::{share_world, FixedHeight, WorldContext};
///
/// let world = share_world(FixedHeight::new(0, 127));
/// let context = WorldContext::attached(&world);
/// assert_eq!(context.limits(), Ok((0, 127)));
/// ```
pub fn share_world<T: HeightBounds + 'static>(world: T) -> StResource<dyn HeightBounds> {
    let resource: Rc<RwLock<dyn HeightBounds>> = Rc::new(RwLock::new(world));
    StResource::from_rc(resource)
}

/// Weak link from a region to the world it lives in.
#[derive(Clone, Default)]
pub struct WorldContext {
    world: Option<StWeak<dyn HeightBounds>>,
}

impl WorldContext {
    /// A context that is not attached to any world.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Attaches to the given world without taking ownership of it.
    pub fn attached(world: &StResource<dyn HeightBounds>) -> Self {
        Self {
            world: Some(world.downgrade()),
        }
    }

    /// Returns `true` if a world was ever assigned, even one that is gone now.
    pub fn is_attached(&self) -> bool {
        self.world.is_some()
    }

    /// Returns the world, if one is assigned and still alive.
    pub fn upgrade(&self) -> Option<StResource<dyn HeightBounds>> {
        self.world.as_ref().and_then(StWeak::upgrade)
    }

    /// Vertical limits as `(min_y, max_y)`.
    ///
    /// # Returns
    /// The defaults when detached, the world's limits when attached, or
    /// [`RegionError::ReferenceLost`] when the world has been dropped.
    pub fn limits(&self) -> RegionResult<(i32, i32)> {
        match &self.world {
            None => Ok((DEFAULT_MIN_Y, DEFAULT_MAX_Y)),
            Some(weak) => {
                let world = weak.upgrade().ok_or(RegionError::ReferenceLost("world"))?;
                let bounds = world.get();
                Ok((bounds.min_y(), bounds.max_y()))
            }
        }
    }
}

impl PartialEq for WorldContext {
    fn eq(&self, other: &Self) -> bool {
        match (&self.world, &other.world) {
            (None, None) => true,
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for WorldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.world {
            None => f.write_str("WorldContext(detached)"),
            Some(weak) => f.debug_tuple("WorldContext").field(weak).finish(),
        }
    }
}
