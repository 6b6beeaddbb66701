//! Error types for region and selection operations.

/// Errors returned by regions and selectors.
///
/// Every variant is a value-level failure for the immediate caller. Nothing in this crate
/// retries, and nothing logs an error before returning it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// The selection has not received enough picks to describe a region yet.
    #[error("the selection is incomplete")]
    IncompleteSelection,

    /// The requested change is not legal for this kind of shape.
    #[error("{shape} regions: {message}")]
    UnsupportedOperation {
        /// Name of the shape that rejected the change.
        shape: &'static str,
        /// What was rejected.
        message: &'static str,
    },

    /// The input is structurally illegal regardless of the region's state.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An externally owned context (the world height bounds) has been dropped.
    #[error("{0} is no longer available")]
    ReferenceLost(&'static str),
}

/// Shorthand for results carrying a [`RegionError`].
pub type RegionResult<T> = Result<T, RegionError>;

impl RegionError {
    pub(crate) fn unsupported(shape: &'static str, message: &'static str) -> Self {
        RegionError::UnsupportedOperation { shape, message }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RegionError::InvalidArgument(message.into())
    }
}
