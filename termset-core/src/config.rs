//! Set configuration
//!
//! Immutable tuning record fixed at construction time. Fields are private:
//! the only way to obtain a `SetConfig` is through the validated constructors,
//! so an in-range `max_bucket_size` is guaranteed everywhere downstream.

use crate::error::{Error, Result};

/// Library default for `max_bucket_size`
pub const DEFAULT_MAX_BUCKET_SIZE: usize = 500;

/// Immutable set tuning parameters
///
/// - `max_bucket_size`: upper bound on items per bucket; a bucket reaching it
///   is split. Must be at least 1.
/// - `initial_set_capacity`: capacity hint for the top-level bucket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetConfig {
    max_bucket_size: usize,
    initial_set_capacity: usize,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            max_bucket_size: DEFAULT_MAX_BUCKET_SIZE,
            initial_set_capacity: 0,
        }
    }
}

impl SetConfig {
    /// Create a validated configuration
    ///
    /// Rejects `max_bucket_size == 0`; a zero-capacity bucket could never
    /// hold an item and the split machinery would not terminate.
    pub fn init(max_bucket_size: usize, initial_set_capacity: usize) -> Result<Self> {
        if max_bucket_size == 0 {
            return Err(Error::invalid_config("max_bucket_size must be at least 1"));
        }
        Ok(Self {
            max_bucket_size,
            initial_set_capacity,
        })
    }

    /// Derive a configuration from an expected item count
    ///
    /// Hosts size sets by total items, not bucket count; the bucket-list
    /// capacity is `initial_item_capacity / max_bucket_size + 1`.
    pub fn for_item_capacity(initial_item_capacity: usize, max_bucket_size: usize) -> Result<Self> {
        if max_bucket_size == 0 {
            return Err(Error::invalid_config("max_bucket_size must be at least 1"));
        }
        Ok(Self {
            max_bucket_size,
            initial_set_capacity: initial_item_capacity / max_bucket_size + 1,
        })
    }

    /// Upper bound on items per bucket
    pub fn max_bucket_size(&self) -> usize {
        self.max_bucket_size
    }

    /// Capacity hint for the bucket list
    pub fn initial_set_capacity(&self) -> usize {
        self.initial_set_capacity
    }
}
