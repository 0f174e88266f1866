//! Term - the dynamic value type stored in a set
//!
//! A `Term` is a tagged sum over the five value shapes the container accepts:
//! integers, atoms, bitstrings, tuples, and lists. Tuples and lists own their
//! children, so cloning a term is a deep copy and dropping it releases the
//! entire subtree.
//!
//! ## Ordering
//!
//! Terms implement strict total ordering with **cross-variant ranking**:
//!
//! 1. **Variant rank**: `Integer < Atom < Tuple < List < Bitstring`. Two terms
//!    of different variants compare by rank alone.
//! 2. **Integer**: numeric comparison.
//! 3. **Atom / Bitstring**: lexicographic byte order. Both are normalised
//!    UTF-8 at the boundary, so byte order is sufficient.
//! 4. **Tuple**: shorter arity sorts first; equal arity compares element-wise.
//! 5. **List**: element-wise up to the shorter length; all-equal prefixes make
//!    the shorter list smaller.
//!
//! The rank table is implemented explicitly in [`Term::variant_rank`]; it is
//! the source of truth for cross-variant ordering, and every comparison in
//! the container goes through it. Equality is defined as `cmp == Equal`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamic term value
///
/// Composite variants own their children; a `Term` passed by value transfers
/// ownership of the whole subtree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Term {
    /// 64-bit signed integer
    Integer(i64),
    /// Atom identified by its UTF-8 name
    Atom(String),
    /// UTF-8 validated binary payload
    Bitstring(String),
    /// Fixed-arity ordered sequence of terms
    Tuple(Vec<Term>),
    /// Variable-length ordered sequence of terms
    List(Vec<Term>),
}

impl Term {
    /// Cross-variant rank for ordering
    ///
    /// Lower rank sorts earlier. The ordering is
    /// `Integer < Atom < Tuple < List < Bitstring`.
    fn variant_rank(&self) -> u8 {
        match self {
            Term::Integer(_) => 0,
            Term::Atom(_) => 1,
            Term::Tuple(_) => 2,
            Term::List(_) => 3,
            Term::Bitstring(_) => 4,
        }
    }

    /// Variant name for diagnostics
    pub fn variant_name(&self) -> &'static str {
        match self {
            Term::Integer(_) => "integer",
            Term::Atom(_) => "atom",
            Term::Bitstring(_) => "bitstring",
            Term::Tuple(_) => "tuple",
            Term::List(_) => "list",
        }
    }

    /// Total, deterministic comparison of two terms
    ///
    /// Different variants compare by rank; same variants compare by content.
    /// Runs in O(size of the smaller term).
    pub fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Term::Integer(a), Term::Integer(b)) => a.cmp(b),
            (Term::Atom(a), Term::Atom(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Term::Bitstring(a), Term::Bitstring(b)) => a.as_bytes().cmp(b.as_bytes()),
            // Tuples: arity dominates, then element-wise
            (Term::Tuple(a), Term::Tuple(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| cmp_elementwise(a, b)),
            // Lists: element-wise up to the shorter length, then shorter-first
            (Term::List(a), Term::List(b)) => {
                cmp_elementwise(a, b).then_with(|| a.len().cmp(&b.len()))
            }
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

/// Element-wise comparison of two term sequences over their shared prefix
fn cmp_elementwise(a: &[Term], b: &[Term]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = x.cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

// === Strict Total Ordering ===
// Equality is comparison: two terms are equal iff cmp returns Equal.

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        Term::cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Term {}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Term::cmp(self, other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        Term::cmp(self, other)
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant_rank().hash(state);
        match self {
            Term::Integer(i) => i.hash(state),
            Term::Atom(s) | Term::Bitstring(s) => s.hash(state),
            Term::Tuple(items) | Term::List(items) => {
                for item in items {
                    item.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Integer(i) => write!(f, "{}", i),
            Term::Atom(a) => write!(f, "{}", a),
            Term::Bitstring(s) => write!(f, "\"{}\"", s),
            Term::Tuple(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            Term::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
