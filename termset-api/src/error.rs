//! Error types for the termset API facade
//!
//! Every failure a host can observe is one of these variants; `tag()` yields
//! the stable snake_case reason tag the host matches on. Logical failures
//! are ordinary values on the wire; nothing here is ever panicked.

use thiserror::Error;

/// Result type alias using our ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Facade error type
///
/// For every variant except `UnsupportedType` and `BadReference`, the set's
/// state is unchanged from before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input term contains a variant the container refuses
    #[error("unsupported term type: {0}")]
    UnsupportedType(&'static str),

    /// Handle does not identify a live set
    #[error("handle does not identify a live set")]
    BadReference,

    /// The set's lock was already held; the caller should retry
    #[error("set is locked by another operation")]
    LockFail,

    /// Item absent (`remove`, `find_index`)
    #[error("item not found")]
    NotFound,

    /// Index at or past the end of the set (`at`)
    #[error("index out of bounds")]
    IndexOutOfBounds,

    /// `append_bucket` called with a slice at or above the bucket size limit
    #[error("bucket size limit exceeded: {len} items with max_bucket_size {max}")]
    MaxBucketSizeExceeded {
        /// Length of the rejected slice
        len: usize,
        /// Configured bucket size limit
        max: usize,
    },

    /// Set construction rejected the supplied configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ApiError {
    /// Stable reason tag for host responses
    pub fn tag(&self) -> &'static str {
        match self {
            ApiError::UnsupportedType(_) => "unsupported_type",
            ApiError::BadReference => "bad_reference",
            ApiError::LockFail => "lock_fail",
            ApiError::NotFound => "not_found",
            ApiError::IndexOutOfBounds => "index_out_of_bounds",
            ApiError::MaxBucketSizeExceeded { .. } => "max_bucket_size_exceeded",
            ApiError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }
}

impl From<termset_core::Error> for ApiError {
    fn from(err: termset_core::Error) -> Self {
        match err {
            termset_core::Error::InvalidConfig(msg) => ApiError::InvalidConfiguration(msg),
            termset_core::Error::MaxBucketSizeExceeded { len, max } => {
                ApiError::MaxBucketSizeExceeded { len, max }
            }
        }
    }
}
