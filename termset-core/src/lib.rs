//! # termset-core
//!
//! In-memory sorted, deduplicating container of dynamic terms with stable
//! random access by index.
//!
//! This crate provides:
//! - Core types: [`Term`], [`Bucket`], [`SortedSet`], [`SetConfig`]
//! - A strict cross-variant total order over terms
//! - Tagged operation outcomes ([`AddResult`], [`RemoveResult`],
//!   [`FindResult`]); logical failures are values, never panics
//!
//! ## Design Principles
//!
//! 1. **Bucketed ordered array**: a flat list of bounded sorted buckets, so
//!    growth moves bucket pointers instead of shifting the whole item run
//! 2. **Single owner**: the container is single-threaded; callers serialize
//!    access (the handle facade in `termset-api` does this with a try-lock)
//! 3. **Move-in ownership**: terms enter by value and any term not placed
//!    into the set is dropped exactly once
//!
//! ## Example
//!
//! ```
//! use termset_core::{AddResult, SetConfig, SortedSet, Term};
//!
//! let mut set = SortedSet::new(SetConfig::default());
//! assert_eq!(set.add(Term::Integer(3)), AddResult::Added(0));
//! assert_eq!(set.add(Term::Integer(1)), AddResult::Added(0));
//! assert_eq!(set.add(Term::Integer(1)), AddResult::Duplicate(0));
//! assert_eq!(set.size(), 2);
//! ```

pub mod bucket;
pub mod config;
pub mod error;
pub mod set;
pub mod term;

// Re-export main types
pub use bucket::{Bucket, BucketAddResult};
pub use config::{SetConfig, DEFAULT_MAX_BUCKET_SIZE};
pub use error::{Error, Result};
pub use set::{AddResult, FindResult, RemoveResult, SortedSet};
pub use term::Term;
