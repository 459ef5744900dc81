//! Ordered map, multimap, set and multiset implementations stored as a
//! flat, sorted sequence of entries.
//!
//! ---
//!
//! [`FlatMultimap`] is an ordered [multimap](https://en.wikipedia.org/wiki/Multimap)
//! where entries are stored as one flat sequence, sorted by key:
//!  - `a -> 1`
//!  - `a -> 2`
//!  - `b -> 3`
//!
//! as opposed to a tree of nodes, each holding a collection of values:
//!  - `a -> 1, 2`
//!  - `b -> 3`
//!
//! [`FlatMap`] wraps a [`FlatMultimap`] and keeps every key unique.
//! [`FlatSet`] and [`FlatMultiset`] are the same containers without values.
//!
//! ---
//!
//! The sequence is a double-ended buffer, so entries live in at most two
//! contiguous runs of memory and are found with a binary search. Keys that
//! arrive in ascending order are appended, keys that arrive in descending
//! order are prepended, both in amortized O(1). Inserting into or removing
//! from the interior shifts entries, which makes these containers a good fit
//! wherever lookups are much more frequent than modifications.
//!
//! ---
//!
//! Keys are ordered by a [`Compare`] implementation, [`Natural`] by default.
//! Lookups accept any probe type the comparator can compare a key against,
//! so a map keyed by `String` can be searched with a `&str`.
//!
//! None of the containers synchronize access internally.

mod compare;
mod entry;

/// Iterator types shared by the ordered containers.
pub mod iter;

/// Ordered map where every key is unique.
pub mod map;

/// Ordered multimap where equal keys are stored next to each other.
pub mod multimap;

/// Ordered set and multiset.
pub mod set;

#[cfg(feature = "rayon")]
mod rayon;

#[cfg(feature = "serde")]
mod serde;

pub use compare::{Compare, Descending, Natural};
pub use entry::Entry;
pub use map::FlatMap;
pub use multimap::FlatMultimap;
pub use set::{FlatMultiset, FlatSet};
pub use std::collections::TryReserveError;
