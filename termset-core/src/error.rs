//! Error types for termset-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
///
/// Logical outcomes of set operations (duplicate, not-found) are tagged
/// result enums in `set`, not errors. This type covers construction-time
/// validation and bulk-load contract violations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration rejected at construction time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `append_bucket` called with a slice at or above the bucket size limit
    #[error("bucket size limit exceeded: {len} items with max_bucket_size {max}")]
    MaxBucketSizeExceeded {
        /// Length of the rejected slice
        len: usize,
        /// Configured bucket size limit
        max: usize,
    },
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}
