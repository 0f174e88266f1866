//! # termset-api
//!
//! Opaque-handle facade over `termset-core` for host runtimes.
//!
//! This crate provides:
//! - [`HostValue`]: the host-neutral encoded term shape, including the
//!   refused variants (floats, process handles, references, ports,
//!   function values)
//! - [`SetRegistry`] / [`SetId`]: handle lifecycle and every set operation
//!   (`empty`, `new`, `append_bucket`, `size`, `to_list`, `add`, `remove`,
//!   `at`, `slice`, `find_index`, `debug`)
//! - [`Outcome`] / [`ApiError`]: tagged results with stable snake_case tags
//!
//! ## Concurrency contract
//!
//! The container itself is single-threaded; serialization happens here. Each
//! handle guards its set with a mutex acquired **non-blocking**: a contended
//! call returns `lock_fail` immediately rather than stalling a host worker
//! thread. Operations on one handle are totally ordered by its mutex;
//! operations on distinct handles are independent.
//!
//! ## Example
//!
//! ```
//! use termset_api::{HostValue, Outcome, SetRegistry};
//!
//! let registry = SetRegistry::new();
//! let id = registry.new_set(500, 0)?;
//!
//! assert_eq!(registry.add(id, HostValue::Integer(3))?, Outcome::Added(0));
//! assert_eq!(registry.add(id, HostValue::Integer(1))?, Outcome::Added(0));
//! assert_eq!(registry.size(id)?, Outcome::Size(2));
//! # Ok::<(), termset_api::ApiError>(())
//! ```

pub mod error;
pub mod handle;
pub mod value;

pub use error::{ApiError, Result};
pub use handle::{Outcome, SetHandle, SetId, SetRegistry};
pub use value::HostValue;
