//! SortedSet - bucketed ordered container of terms
//!
//! An ordered list of [`Bucket`]s plus a running item count. The bucket list
//! is the top level of a two-level search structure: locating an item first
//! binary-searches the bucket list with each bucket's range predicate, then
//! binary-searches within the owning bucket. Growth relocates bucket pointers
//! in the top-level list instead of shifting items across the whole set, which
//! keeps inserts cheap as the container reaches 10^5-10^6 elements.
//!
//! # Invariants
//!
//! - Every bucket is strictly increasing under the term order.
//! - Every element of bucket `i` is strictly less than every element of
//!   bucket `i + 1` (global sortedness, global dedup).
//! - `count` equals the sum of bucket lengths.
//! - A bucket reaching `max_bucket_size` is split in the same operation, so
//!   bucket lengths never exceed the bound between operations.
//! - Empty buckets survive only as the sole bucket of a set; removal prunes
//!   any other bucket it empties.

use crate::bucket::{Bucket, BucketAddResult};
use crate::config::SetConfig;
use crate::error::{Error, Result};
use crate::term::Term;
use std::cmp::Ordering;
use std::fmt;

/// Outcome of [`SortedSet::add`]
///
/// Indices are **effective**: the item's position in the global order across
/// all buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    /// Item was inserted; it now sits at this effective index
    Added(usize),
    /// An equal item already exists at this effective index; the incoming
    /// item was freed and the set is unchanged
    Duplicate(usize),
}

/// Outcome of [`SortedSet::remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResult {
    /// Item was removed from this effective index
    Removed(usize),
    /// No equal item was present; the set is unchanged
    NotFound,
}

/// Outcome of [`SortedSet::find_index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindResult {
    /// Item located
    Found {
        /// Index of the owning bucket in the bucket list
        bucket_idx: usize,
        /// Index within the owning bucket
        inner_idx: usize,
        /// Effective index across the whole set
        idx: usize,
    },
    /// No equal item present
    NotFound,
}

/// Sorted, deduplicating container of terms with stable indexed access
pub struct SortedSet {
    configuration: SetConfig,
    buckets: Vec<Bucket>,
    count: usize,
}

impl SortedSet {
    /// Create a set with no buckets
    ///
    /// The bucket list is only a capacity hint away from empty; a first
    /// mutation provisions storage (see [`SortedSet::add`] and
    /// [`SortedSet::append_bucket`]).
    pub fn empty(configuration: SetConfig) -> Self {
        Self {
            buckets: Vec::with_capacity(configuration.initial_set_capacity()),
            configuration,
            count: 0,
        }
    }

    /// Create a set seeded with a single empty bucket
    ///
    /// The seed bucket gives the first `add` an obvious target and keeps the
    /// bucket list non-empty for the lifetime of the set.
    pub fn new(configuration: SetConfig) -> Self {
        let mut set = Self::empty(configuration);
        set.buckets
            .push(Bucket::with_capacity(configuration.max_bucket_size()));
        set
    }

    /// The configuration this set was built with
    pub fn configuration(&self) -> &SetConfig {
        &self.configuration
    }

    /// Locate the bucket that owns `item` (or should receive it)
    ///
    /// Binary search over the bucket list using each bucket's range
    /// predicate. When the descent ends without an `Equal` hit the result is
    /// clamped to the last bucket, so inserts past the current maximum land
    /// in the final bucket (to be split if it overflows). An empty bucket
    /// list returns 0; callers must treat that as "no bucket exists".
    pub fn find_bucket_index(&self, item: &Term) -> usize {
        if self.buckets.is_empty() {
            return 0;
        }

        let mut lo = 0;
        let mut hi = self.buckets.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.buckets[mid].item_compare(item) {
                Ordering::Equal => return mid,
                // Bucket is greater than the item: continue left
                Ordering::Greater => hi = mid,
                // Bucket is less than the item: continue right
                Ordering::Less => lo = mid + 1,
            }
        }

        lo.min(self.buckets.len() - 1)
    }

    /// Insert a term, taking ownership
    ///
    /// Duplicates leave the set unchanged and free the incoming term. On
    /// insert, the owning bucket is split when it reaches `max_bucket_size`.
    /// The returned effective index is computed before any split; splitting
    /// preserves global order, so it is also the post-split index.
    pub fn add(&mut self, item: Term) -> AddResult {
        // A set built by `empty` has no buckets until its first mutation;
        // provision the sole legitimately-empty bucket here.
        if self.buckets.is_empty() {
            self.buckets
                .push(Bucket::with_capacity(self.configuration.max_bucket_size()));
        }

        let bucket_idx = self.find_bucket_index(&item);
        match self.buckets[bucket_idx].add(item) {
            BucketAddResult::Duplicate(inner_idx) => {
                AddResult::Duplicate(self.effective_index(bucket_idx, inner_idx))
            }
            BucketAddResult::Added(inner_idx) => {
                let idx = self.effective_index(bucket_idx, inner_idx);

                if self.buckets[bucket_idx].len() >= self.configuration.max_bucket_size() {
                    let upper = self.buckets[bucket_idx].split();
                    tracing::trace!(
                        bucket_idx,
                        lower_len = self.buckets[bucket_idx].len(),
                        upper_len = upper.len(),
                        "bucket split"
                    );
                    self.buckets.insert(bucket_idx + 1, upper);
                }

                self.count += 1;
                AddResult::Added(idx)
            }
        }
    }

    /// Remove the term equal to `item`, freeing it
    ///
    /// A bucket emptied by the removal is pruned from the list unless it is
    /// the only bucket.
    pub fn remove(&mut self, item: &Term) -> RemoveResult {
        match self.find_index(item) {
            FindResult::NotFound => RemoveResult::NotFound,
            FindResult::Found {
                bucket_idx,
                inner_idx,
                idx,
            } => {
                // Removed term dropped here, freeing its subtree
                self.buckets[bucket_idx].remove(inner_idx);

                if self.buckets[bucket_idx].is_empty() && self.buckets.len() > 1 {
                    tracing::trace!(bucket_idx, "pruning empty bucket");
                    self.buckets.remove(bucket_idx);
                }

                self.count -= 1;
                RemoveResult::Removed(idx)
            }
        }
    }

    /// Append a pre-sorted run of terms as a new bucket at the end
    ///
    /// Bulk-load fast path for building a set from already-ordered input.
    /// Caller contract: `items` is strictly increasing under the term order
    /// and every element is strictly greater than every element already in
    /// the set. Violating the contract leaves the ordering invariants
    /// undefined; the contract is not verified here.
    ///
    /// `items` must be strictly shorter than `max_bucket_size`; otherwise the
    /// call fails with [`Error::MaxBucketSizeExceeded`] and the incoming
    /// terms are freed.
    pub fn append_bucket(&mut self, items: Vec<Term>) -> Result<()> {
        let max = self.configuration.max_bucket_size();
        if items.len() >= max {
            // `items` dropped here, freeing the whole slice
            return Err(Error::MaxBucketSizeExceeded {
                len: items.len(),
                max,
            });
        }

        self.count += items.len();
        self.buckets.push(Bucket::from_sorted_items(items));
        Ok(())
    }

    /// Locate a term, reporting bucket, inner, and effective indices
    pub fn find_index(&self, item: &Term) -> FindResult {
        if self.buckets.is_empty() {
            return FindResult::NotFound;
        }

        let bucket_idx = self.find_bucket_index(item);
        match self.buckets[bucket_idx].find(item) {
            Some(inner_idx) => FindResult::Found {
                bucket_idx,
                inner_idx,
                idx: self.effective_index(bucket_idx, inner_idx),
            },
            None => FindResult::NotFound,
        }
    }

    /// Borrow the term at effective index `index`
    ///
    /// Walks the bucket list accumulating lengths; O(bucket count).
    pub fn at(&self, index: usize) -> Option<&Term> {
        if index >= self.count {
            return None;
        }

        let mut remaining = index;
        for bucket in &self.buckets {
            if remaining < bucket.len() {
                return bucket.get(remaining);
            }
            remaining -= bucket.len();
        }

        None
    }

    /// Clone the half-open effective-index range `[start, start + amount)`
    ///
    /// Over-requests clamp silently to the end of the set; a start at or past
    /// the end, or a zero amount, yields an empty vector. Elements are deep
    /// clones owned by the caller.
    pub fn slice(&self, start: usize, amount: usize) -> Vec<Term> {
        if start >= self.count || amount == 0 {
            return Vec::new();
        }

        let take = amount.min(self.count - start);
        let mut out = Vec::with_capacity(take);

        // Skip whole buckets to the landing bucket, then walk items
        let mut offset = start;
        for bucket in &self.buckets {
            if offset >= bucket.len() {
                offset -= bucket.len();
                continue;
            }
            for item in bucket.iter().skip(offset) {
                if out.len() == take {
                    return out;
                }
                out.push(item.clone());
            }
            offset = 0;
        }

        out
    }

    /// Deep-clone every element in order
    pub fn to_vec(&self) -> Vec<Term> {
        let mut out = Vec::with_capacity(self.count);
        out.extend(self.iter().cloned());
        out
    }

    /// Iterate all terms in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }

    /// Number of items in the set; O(1)
    pub fn size(&self) -> usize {
        self.count
    }

    /// True when the set holds no items
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets in the top-level list
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Textual snapshot for diagnostics
    ///
    /// Implementation-defined; no stability contract.
    pub fn debug(&self) -> String {
        format!("{:?}", self)
    }

    /// Sum of bucket lengths below `bucket_idx`, plus `inner_idx`
    fn effective_index(&self, bucket_idx: usize, inner_idx: usize) -> usize {
        let below: usize = self.buckets[..bucket_idx].iter().map(Bucket::len).sum();
        below + inner_idx
    }
}

impl fmt::Debug for SortedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedSet")
            .field("count", &self.count)
            .field("max_bucket_size", &self.configuration.max_bucket_size())
            .field("bucket_count", &self.buckets.len())
            .field("buckets", &self.buckets)
            .finish()
    }
}
