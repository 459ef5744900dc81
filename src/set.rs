#[cfg(feature = "rayon")]
pub use crate::rayon::set as rayon;

use crate::compare::{Compare, Natural};
use crate::iter::{self, IntoKeys, Keys};
use crate::map::FlatMap;
use crate::multimap::FlatMultimap;
use std::collections::TryReserveError;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;

/// Ordered set implementation where items are stored sorted in a single
/// double-ended buffer.
///
/// # Examples
///
/// ```
/// use flat_ordmap::FlatSet;
///
/// let mut set = FlatSet::new();
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
#[derive(Clone)]
pub struct FlatSet<T, C = Natural> {
    pub(crate) map: FlatMap<T, (), C>,
}

/// Ordered multiset implementation where items are stored sorted in a single
/// double-ended buffer, equal items next to each other.
///
/// # Examples
///
/// ```
/// use flat_ordmap::FlatMultiset;
///
/// let mut set = FlatMultiset::new();
/// set.insert(1);
/// set.insert(1);
/// set.insert(2);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.count(&1), 2);
/// ```
#[derive(Clone)]
pub struct FlatMultiset<T, C = Natural> {
    pub(crate) map: FlatMultimap<T, (), C>,
}

impl<T> FlatSet<T, Natural> {
    /// Creates an empty `FlatSet` ordered by [`Ord`].
    ///
    /// The set will not allocate until it is first inserted into.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: FlatMap::new(),
        }
    }

    /// Creates an empty `FlatSet` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FlatMap::with_capacity(capacity),
        }
    }
}

impl<T> FlatMultiset<T, Natural> {
    /// Creates an empty `FlatMultiset` ordered by [`Ord`].
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMultiset;
    ///
    /// let set: FlatMultiset<i32> = FlatMultiset::new();
    ///
    /// assert_eq!(set.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: FlatMultimap::new(),
        }
    }

    /// Creates an empty `FlatMultiset` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FlatMultimap::with_capacity(capacity),
        }
    }
}

// Everything that does not depend on uniqueness is shared by both sets.
macro_rules! common_set_methods {
    ($set:ident, $map:ident) => {
        impl<T, C> $set<T, C> {
            /// Creates an empty set which will order its items with `cmp`.
            pub const fn with_comparator(cmp: C) -> Self {
                Self {
                    map: $map::with_comparator(cmp),
                }
            }

            /// Creates an empty set with at least the specified capacity, ordering its items with `cmp`.
            pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
                Self {
                    map: $map::with_capacity_and_comparator(capacity, cmp),
                }
            }

            /// Returns a reference to the set's comparator.
            pub const fn comparator(&self) -> &C {
                self.map.comparator()
            }

            /// Returns the number of elements the set can hold without reallocating.
            pub fn capacity(&self) -> usize {
                self.map.capacity()
            }

            /// Returns the number of elements in the set.
            pub fn len(&self) -> usize {
                self.map.len()
            }

            /// Returns `true` if the set contains no elements.
            pub fn is_empty(&self) -> bool {
                self.map.is_empty()
            }

            /// Clears the set, removing all values.
            pub fn clear(&mut self) {
                self.map.clear();
            }

            /// Reserves capacity for at least `additional` more elements.
            pub fn reserve(&mut self, additional: usize) {
                self.map.reserve(additional);
            }

            /// Tries to reserve capacity for at least `additional` more elements.
            pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
                self.map.try_reserve(additional)
            }

            /// Shrinks the capacity of the set as much as possible.
            pub fn shrink_to_fit(&mut self) {
                self.map.shrink_to_fit();
            }

            /// Shrinks the capacity of the set with a lower limit.
            pub fn shrink_to(&mut self, min_capacity: usize) {
                self.map.shrink_to(min_capacity);
            }

            /// Clears the set, returning all elements as an iterator in order.
            pub fn drain(&mut self) -> Drain<'_, T> {
                Drain {
                    iter: self.map.drain(),
                }
            }

            /// Retains only the elements specified by the predicate.
            pub fn retain<F>(&mut self, mut f: F)
            where
                F: FnMut(&T) -> bool,
            {
                self.map.retain(|k, _| f(k));
            }

            /// An iterator visiting all elements in ascending order. The iterator element type is `&'a T`.
            pub fn iter(&self) -> Iter<'_, T> {
                Iter {
                    iter: self.map.keys(),
                }
            }

            /// Returns the smallest element.
            pub fn first(&self) -> Option<&T> {
                self.map.first().map(|(k, _)| k)
            }

            /// Returns the largest element.
            pub fn last(&self) -> Option<&T> {
                self.map.last().map(|(k, _)| k)
            }

            /// Removes and returns the smallest element.
            pub fn pop_first(&mut self) -> Option<T> {
                self.map.pop_first().map(|(k, _)| k)
            }

            /// Removes and returns the largest element.
            pub fn pop_last(&mut self) -> Option<T> {
                self.map.pop_last().map(|(k, _)| k)
            }

            /// Returns the element at `position` in order.
            pub fn get_index(&self, position: usize) -> Option<&T> {
                self.map.get_index(position).map(|(k, _)| k)
            }
        }

        impl<T, C> $set<T, C>
        where
            C: Compare<T>,
        {
            /// Returns `true` if the set contains the value.
            pub fn contains<Q>(&self, value: &Q) -> bool
            where
                C: Compare<T, Q>,
                Q: ?Sized,
            {
                self.map.contains_key(value)
            }

            /// Returns the number of elements equal to the value.
            pub fn count<Q>(&self, value: &Q) -> usize
            where
                C: Compare<T, Q>,
                Q: ?Sized,
            {
                self.map.count(value)
            }

            /// Returns the first element equal to the value.
            pub fn get<Q>(&self, value: &Q) -> Option<&T>
            where
                C: Compare<T, Q>,
                Q: ?Sized,
            {
                self.map.get_key_value(value).map(|(k, _)| k)
            }

            /// Returns the position of the first element not ordered before the value.
            pub fn lower_bound<Q>(&self, value: &Q) -> usize
            where
                C: Compare<T, Q>,
                Q: ?Sized,
            {
                self.map.lower_bound(value)
            }

            /// Returns the position of the first element ordered after the value.
            pub fn upper_bound<Q>(&self, value: &Q) -> usize
            where
                C: Compare<T, Q>,
                Q: ?Sized,
            {
                self.map.upper_bound(value)
            }
        }

        impl<T, C> FromIterator<T> for $set<T, C>
        where
            C: Compare<T> + Default,
        {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                Self {
                    map: iter.into_iter().map(|k| (k, ())).collect(),
                }
            }
        }

        impl<T, C> Extend<T> for $set<T, C>
        where
            C: Compare<T>,
        {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                self.map.extend(iter.into_iter().map(|k| (k, ())));
            }
        }

        impl<'a, T, C> Extend<&'a T> for $set<T, C>
        where
            T: 'a + Copy,
            C: Compare<T>,
        {
            fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
                self.extend(iter.into_iter().copied());
            }
        }

        impl<'a, T, C> IntoIterator for &'a $set<T, C> {
            type Item = &'a T;
            type IntoIter = Iter<'a, T>;

            fn into_iter(self) -> Iter<'a, T> {
                self.iter()
            }
        }

        impl<T, C> IntoIterator for $set<T, C> {
            type Item = T;
            type IntoIter = IntoIter<T>;

            fn into_iter(self) -> IntoIter<T> {
                IntoIter {
                    iter: self.map.into_keys(),
                }
            }
        }

        impl<T, C> Default for $set<T, C>
        where
            C: Default,
        {
            fn default() -> Self {
                Self {
                    map: $map::default(),
                }
            }
        }

        impl<T, C> PartialEq for $set<T, C>
        where
            T: PartialEq,
        {
            fn eq(&self, other: &Self) -> bool {
                self.map == other.map
            }
        }

        impl<T, C> Eq for $set<T, C> where T: Eq {}

        impl<T, C> Debug for $set<T, C>
        where
            T: Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.iter()).finish()
            }
        }

        impl<T, const N: usize> From<[T; N]> for $set<T, Natural>
        where
            T: Ord,
        {
            fn from(arr: [T; N]) -> Self {
                arr.into_iter().collect()
            }
        }
    };
}

common_set_methods!(FlatSet, FlatMap);
common_set_methods!(FlatMultiset, FlatMultimap);

impl<T, C> FlatSet<T, C>
where
    C: Compare<T>,
{
    /// Adds a value to the set. Returns whether the value was newly inserted;
    /// an equal value already in the set is kept.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).1
    }

    /// Removes a value from the set. Returns whether the value was present in the set.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        C: Compare<T, Q>,
        Q: ?Sized,
    {
        self.map.remove(value)
    }

    /// Removes and returns the element equal to the value, if any.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        C: Compare<T, Q>,
        Q: ?Sized,
    {
        let position = self.map.find_index(value)?;
        self.map.remove_index(position).map(|(k, _)| k)
    }
}

impl<T, C> FlatMultiset<T, C>
where
    C: Compare<T>,
{
    /// Adds a value to the set, after any equal values. Returns its position.
    pub fn insert(&mut self, value: T) -> usize {
        self.map.insert(value, ())
    }

    /// Removes one value from the set. Returns whether the value was present in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMultiset;
    ///
    /// let mut set = FlatMultiset::new();
    /// set.insert(1);
    /// set.insert(1);
    ///
    /// assert!(set.remove(&1));
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        C: Compare<T, Q>,
        Q: ?Sized,
    {
        self.map.remove_one(value).is_some()
    }

    /// Removes every value equal to the given one. Returns how many were removed.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        C: Compare<T, Q>,
        Q: ?Sized,
    {
        self.map.remove_all(value)
    }
}

/// A draining iterator over the items of a set.
pub struct Drain<'a, T> {
    iter: iter::Drain<'a, T, ()>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.next().map(|(v, _)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back().map(|(v, _)| v)
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

/// An iterator over the items of a set, in ascending order.
pub struct Iter<'a, T> {
    iter: Keys<'a, T, ()>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.iter.nth(n)
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the items of a set, in ascending order.
pub struct IntoIter<T> {
    iter: IntoKeys<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::{FlatMultiset, FlatSet};
    use crate::compare::Descending;

    #[test]
    fn set_keeps_one_of_each() {
        let set: FlatSet<_> = [3, 1, 3, 2, 1].into();

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(set.count(&3), 1);
        assert_eq!(set.first(), Some(&1));
        assert_eq!(set.last(), Some(&3));
    }

    #[test]
    fn set_lookup_by_borrowed_form() {
        let mut set: FlatSet<String> = ["pear", "apple"].iter().map(|s| s.to_string()).collect();

        assert!(set.contains("apple"));
        assert_eq!(set.take("pear").as_deref(), Some("pear"));
        assert!(!set.remove("pear"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn multiset_counts_and_removes() {
        let mut set = FlatMultiset::with_comparator(Descending);
        set.extend([1, 4, 4, 2, 4]);

        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [4, 4, 4, 2, 1]);
        assert_eq!(set.count(&4), 3);
        assert!(set.remove(&4));
        assert_eq!(set.remove_all(&4), 2);
        assert_eq!(set.remove_all(&9), 0);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [2, 1]);
    }

    #[test]
    fn drain_and_retain() {
        let mut set: FlatMultiset<_> = (0..10).collect();
        set.retain(|v| v % 2 == 0);

        let drained: Vec<_> = set.drain().rev().collect();
        assert_eq!(drained, [8, 6, 4, 2, 0]);
        assert!(set.is_empty());
    }
}
