//! Handle registry and set operations
//!
//! The facade hands hosts an opaque [`SetId`] instead of a set. The
//! [`SetRegistry`] maps live ids to [`SetHandle`]s; each handle guards its
//! [`SortedSet`] with a mutex that every operation acquires **non-blocking**.
//! Callers run on cooperative host worker threads and must never block, so a
//! contended lock returns `lock_fail` immediately and retry is the caller's
//! responsibility.
//!
//! # Thread Safety
//!
//! - The registry map itself is behind an `RwLock`; lookups take a brief read
//!   lock, clone the `Arc`, and release before touching the set
//! - While a set's lock is held, exactly one thread executes inside it, so
//!   the container's invariants need no further atomicity
//! - Operations run to completion before releasing the lock; operations on
//!   distinct handles are independent
//!
//! Releasing a handle removes it from the registry; the set is deep-freed
//! when the last `Arc` drops.

use crate::error::{ApiError, Result};
use crate::value::HostValue;
use parking_lot::{Mutex, MutexGuard, RwLock};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use termset_core::{AddResult, FindResult, RemoveResult, SetConfig, SortedSet};

/// Opaque handle identifying a live set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SetId(u64);

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "set#{}", self.0)
    }
}

/// Successful operation outcome returned to the host
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Item inserted at this effective index
    Added(usize),
    /// Equal item already present at this effective index
    Duplicate(usize),
    /// Item removed from this effective index
    Removed(usize),
    /// Effective index of a located item
    Index(usize),
    /// Single encoded term
    Value(HostValue),
    /// Encoded terms in set order
    List(Vec<HostValue>),
    /// Item count
    Size(usize),
    /// Diagnostic snapshot
    Snapshot(String),
    /// Operation completed with nothing to report
    Ok,
}

impl Outcome {
    /// Stable outcome tag for host responses
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Added(_) => "added",
            Outcome::Duplicate(_) => "duplicate",
            Outcome::Removed(_) => "removed",
            Outcome::Index(_)
            | Outcome::Value(_)
            | Outcome::List(_)
            | Outcome::Size(_)
            | Outcome::Snapshot(_)
            | Outcome::Ok => "ok",
        }
    }
}

/// A registered set behind its per-handle lock
pub struct SetHandle {
    set: Mutex<SortedSet>,
}

impl SetHandle {
    fn new(set: SortedSet) -> Self {
        Self {
            set: Mutex::new(set),
        }
    }

    /// Non-blocking acquire of the underlying set
    ///
    /// `None` means another operation holds the lock right now.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, SortedSet>> {
        self.set.try_lock()
    }
}

/// Registry of live sets keyed by opaque id
///
/// Ids are handed out from a monotonically increasing counter and never
/// reused, so a stale id from a released set can only miss.
pub struct SetRegistry {
    sets: RwLock<FxHashMap<u64, Arc<SetHandle>>>,
    next_id: AtomicU64,
}

impl Default for SetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sets: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a set with no buckets (bulk-load entry point)
    ///
    /// `initial_item_capacity` sizes the bucket list:
    /// `initial_item_capacity / max_bucket_size + 1` bucket slots.
    pub fn empty(&self, max_bucket_size: usize, initial_item_capacity: usize) -> Result<SetId> {
        let config = SetConfig::for_item_capacity(initial_item_capacity, max_bucket_size)?;
        Ok(self.register(SortedSet::empty(config)))
    }

    /// Create a set seeded with one empty bucket (general entry point)
    pub fn new_set(&self, max_bucket_size: usize, initial_item_capacity: usize) -> Result<SetId> {
        let config = SetConfig::for_item_capacity(initial_item_capacity, max_bucket_size)?;
        Ok(self.register(SortedSet::new(config)))
    }

    /// Release a handle, dropping the set once no other references remain
    pub fn release(&self, id: SetId) -> Result<()> {
        match self.sets.write().remove(&id.0) {
            Some(_) => {
                tracing::debug!(%id, "set released");
                Ok(())
            }
            None => Err(ApiError::BadReference),
        }
    }

    /// Look up the handle behind an id
    pub fn handle(&self, id: SetId) -> Result<Arc<SetHandle>> {
        self.sets
            .read()
            .get(&id.0)
            .cloned()
            .ok_or(ApiError::BadReference)
    }

    /// Number of live sets
    pub fn live_count(&self) -> usize {
        self.sets.read().len()
    }

    /// Insert a term
    pub fn add(&self, id: SetId, value: HostValue) -> Result<Outcome> {
        let span = tracing::debug_span!("termset_add", %id);
        let _guard = span.enter();

        let handle = self.handle(id)?;
        let item = value.decode()?;
        let mut set = handle.try_lock().ok_or(ApiError::LockFail)?;
        match set.add(item) {
            AddResult::Added(idx) => Ok(Outcome::Added(idx)),
            AddResult::Duplicate(idx) => Ok(Outcome::Duplicate(idx)),
        }
    }

    /// Remove a term
    pub fn remove(&self, id: SetId, value: HostValue) -> Result<Outcome> {
        let span = tracing::debug_span!("termset_remove", %id);
        let _guard = span.enter();

        let handle = self.handle(id)?;
        let item = value.decode()?;
        let mut set = handle.try_lock().ok_or(ApiError::LockFail)?;
        match set.remove(&item) {
            RemoveResult::Removed(idx) => Ok(Outcome::Removed(idx)),
            RemoveResult::NotFound => Err(ApiError::NotFound),
        }
    }

    /// Append a pre-sorted run of terms as a new bucket
    ///
    /// Same caller contract as [`SortedSet::append_bucket`]: the run must be
    /// strictly increasing and strictly above everything already in the set.
    pub fn append_bucket(&self, id: SetId, values: Vec<HostValue>) -> Result<Outcome> {
        let span = tracing::debug_span!("termset_append_bucket", %id, len = values.len());
        let _guard = span.enter();

        let handle = self.handle(id)?;
        let items = values
            .into_iter()
            .map(HostValue::decode)
            .collect::<Result<Vec<_>>>()?;
        let mut set = handle.try_lock().ok_or(ApiError::LockFail)?;
        set.append_bucket(items)?;
        Ok(Outcome::Ok)
    }

    /// Item count
    pub fn size(&self, id: SetId) -> Result<Outcome> {
        self.with_set(id, |set| Ok(Outcome::Size(set.size())))
    }

    /// All items in order, encoded
    pub fn to_list(&self, id: SetId) -> Result<Outcome> {
        self.with_set(id, |set| {
            Ok(Outcome::List(set.iter().map(HostValue::encode).collect()))
        })
    }

    /// Item at an effective index
    pub fn at(&self, id: SetId, index: usize) -> Result<Outcome> {
        self.with_set(id, |set| {
            set.at(index)
                .map(|term| Outcome::Value(HostValue::encode(term)))
                .ok_or(ApiError::IndexOutOfBounds)
        })
    }

    /// Encoded clone of the effective-index range `[start, start + amount)`
    pub fn slice(&self, id: SetId, start: usize, amount: usize) -> Result<Outcome> {
        self.with_set(id, |set| {
            let items = set.slice(start, amount);
            Ok(Outcome::List(items.iter().map(HostValue::encode).collect()))
        })
    }

    /// Effective index of a term
    pub fn find_index(&self, id: SetId, value: HostValue) -> Result<Outcome> {
        let handle = self.handle(id)?;
        let item = value.decode()?;
        let set = handle.try_lock().ok_or(ApiError::LockFail)?;
        match set.find_index(&item) {
            FindResult::Found { idx, .. } => Ok(Outcome::Index(idx)),
            FindResult::NotFound => Err(ApiError::NotFound),
        }
    }

    /// Diagnostic snapshot of the set's internal layout
    pub fn debug(&self, id: SetId) -> Result<Outcome> {
        self.with_set(id, |set| Ok(Outcome::Snapshot(set.debug())))
    }

    fn register(&self, set: SortedSet) -> SetId {
        let id = SetId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sets.write().insert(id.0, Arc::new(SetHandle::new(set)));
        tracing::debug!(%id, "set registered");
        id
    }

    /// Run `f` against the set behind `id` under its non-blocking lock
    fn with_set<T>(
        &self,
        id: SetId,
        f: impl FnOnce(&mut SortedSet) -> Result<T>,
    ) -> Result<T> {
        let handle = self.handle(id)?;
        let mut set = handle.try_lock().ok_or(ApiError::LockFail)?;
        f(&mut set)
    }
}
