use std::{
    fmt,
    rc::{Rc, Weak},
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` owns a value of type `T` behind `Rc<RwLock<T>>`. Clones share the same value.
/// The region engine uses it for caller-owned context such as the world height bounds: the
/// caller keeps the strong `StResource`, regions keep a [`StWeak`] and find out when the
/// caller has dropped it.
///
/// `T` may be unsized, so a `StResource<dyn Trait>` can be built from any concrete resource
/// with [`StResource::from_rc`] (see `world::share_world` for the height bounds).
///
/// # Examples
///
/// ```
/// use voxel_region::core::StResource;
///
/// let counter = StResource::new(0);
/// let weak = counter.downgrade();
///
/// *counter.get_mut() += 1;
/// assert_eq!(*weak.upgrade().unwrap().get(), 1);
///
/// drop(counter);
/// assert!(weak.upgrade().is_none());
/// ```
///
/// # Performance Considerations
/// - Not thread-safe; do not use across thread boundaries
/// - A poisoned lock is recovered rather than propagated, since no engine code panics while
///   holding the guard
pub struct StResource<T: ?Sized> {
    /// The shared lock around the value.
    pub resource: Rc<RwLock<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    ///
    /// # Arguments
    /// * `resource` - The value to be stored in the resource
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RwLock::new(resource)),
        }
    }
}

impl<T: ?Sized> StResource<T> {
    /// Wraps an already shared lock, typically after an unsizing coercion.
    pub fn from_rc(resource: Rc<RwLock<T>>) -> Self {
        Self { resource }
    }

    /// Returns a read-only guard that allows reading the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a non-owning handle to this resource.
    ///
    /// # Returns
    /// A [`StWeak`] that can be upgraded for as long as at least one `StResource` clone
    /// is alive.
    pub fn downgrade(&self) -> StWeak<T> {
        StWeak {
            resource: Rc::downgrade(&self.resource),
        }
    }
}

impl<T: ?Sized> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for StResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StResource")
            .field("strong", &Rc::strong_count(&self.resource))
            .finish()
    }
}

/// A weak, non-owning counterpart of [`StResource`].
pub struct StWeak<T: ?Sized> {
    resource: Weak<RwLock<T>>,
}

impl<T: ?Sized> StWeak<T> {
    /// Attempts to regain shared ownership of the resource.
    ///
    /// # Returns
    /// `None` once every owning `StResource` has been dropped.
    pub fn upgrade(&self) -> Option<StResource<T>> {
        self.resource.upgrade().map(StResource::from_rc)
    }

    /// Returns `true` if both handles point at the same resource.
    pub fn ptr_eq(&self, other: &StWeak<T>) -> bool {
        Weak::ptr_eq(&self.resource, &other.resource)
    }
}

impl<T: ?Sized> Clone for StWeak<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for StWeak<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StWeak")
            .field("alive", &(self.resource.strong_count() > 0))
            .finish()
    }
}
