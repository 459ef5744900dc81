#[cfg(feature = "rayon")]
pub use crate::rayon::map as rayon;

use crate::compare::{Compare, Natural, Transparent};
use crate::entry::Entry;
use crate::iter::{Drain, IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
use std::cmp::Ordering;
use std::collections::{TryReserveError, VecDeque};
use std::fmt::{self, Debug};
use std::ops::{Range, RangeBounds};
use tracing::trace;

/// Ordered multimap implementation where entries are stored sorted by key in a
/// single double-ended buffer.
///
/// Entries with equal keys sit next to each other; a new duplicate is placed
/// after the ones already present. Appending keys in ascending order, or
/// prepending them in descending order, costs amortized O(1) per entry; only
/// inserts into the interior shift existing entries.
///
/// Positions returned by [`insert`](Self::insert), [`lower_bound`](Self::lower_bound)
/// and friends are indices into the sorted order. They are invalidated by any
/// insertion or removal.
///
/// # Examples
///
/// ```
/// use flat_ordmap::FlatMultimap;
///
/// let mut map = FlatMultimap::new();
/// map.insert(5, "e");
/// map.insert(1, "a");
/// map.insert(3, "c");
/// map.insert(1, "b");
///
/// assert_eq!(map.len(), 4);
/// assert_eq!(map.count(&1), 2);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, [1, 1, 3, 5]);
/// ```
#[derive(Clone)]
pub struct FlatMultimap<K, V, C = Natural> {
    pub(crate) cmp: C,
    pub(crate) entries: VecDeque<Entry<K, V>>,
}

impl<K, V> FlatMultimap<K, V, Natural> {
    /// Creates an empty `FlatMultimap` ordered by [`Ord`].
    ///
    /// The map will not allocate until it is first inserted into.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty `FlatMultimap` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> FlatMultimap<K, V, C> {
    /// Creates an empty `FlatMultimap` which will order its keys with `cmp`.
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            cmp,
            entries: VecDeque::new(),
        }
    }

    /// Creates an empty `FlatMultimap` with at least the specified capacity, ordering its keys with `cmp`.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            cmp,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns a reference to the map's comparator.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of elements the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns the number of entries in the map, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears the map, removing all key-value pairs. Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    /// Tries to reserve capacity for at least `additional` more entries.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve(additional)
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    /// Shrinks the capacity of the map with a lower limit.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.entries.shrink_to(min_capacity);
    }

    /// An iterator visiting all key-value pairs in ascending key order. The iterator element type is `(&'a K, &'a V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.entries)
    }

    /// An iterator visiting all key-value pairs in ascending key order, with mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.entries)
    }

    /// An iterator visiting all keys in ascending order, duplicates included.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// An iterator visiting all values mutably in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }

    /// Creates a consuming iterator visiting all the keys in ascending order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            iter: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values in key order.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            iter: self.into_iter(),
        }
    }

    /// Returns the entries in key order as a pair of contiguous slices.
    ///
    /// The second slice is empty unless the buffer currently wraps around.
    pub fn as_slices(&self) -> (&[Entry<K, V>], &[Entry<K, V>]) {
        self.entries.as_slices()
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.front().map(Entry::as_pair)
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.back().map(Entry::as_pair)
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.entries.pop_front().map(Entry::into_parts)
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.entries.pop_back().map(Entry::into_parts)
    }

    /// Returns the entry at `position` in key order.
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
        self.entries.get(position).map(Entry::as_pair)
    }

    /// Returns the entry at `position` in key order, with a mutable value.
    pub fn get_index_mut(&mut self, position: usize) -> Option<(&K, &mut V)> {
        self.entries.get_mut(position).map(Entry::as_pair_mut)
    }

    /// Removes the entry at `position`, returning it if the position was in bounds.
    pub fn remove_index(&mut self, position: usize) -> Option<(K, V)> {
        self.entries.remove(position).map(Entry::into_parts)
    }

    /// Removes the entries in the given range of positions, returning them as an iterator.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends past [`len`](Self::len).
    pub fn remove_range<R>(&mut self, range: R) -> Drain<'_, K, V>
    where
        R: RangeBounds<usize>,
    {
        Drain {
            inner: self.entries.drain(range),
        }
    }

    /// Clears the map, returning all entries as an iterator in key order.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.remove_range(..)
    }

    /// Retains only the entries specified by the predicate.
    ///
    /// Removing entries cannot break the order, so the predicate may freely
    /// modify the values.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.entries.retain_mut(|entry| {
            let (key, value) = entry.as_pair_mut();
            f(key, value)
        });
    }

    pub(crate) fn with_entries(cmp: C, entries: VecDeque<Entry<K, V>>) -> Self {
        Self { cmp, entries }
    }
}

impl<K, V, C> FlatMultimap<K, V, C>
where
    C: Compare<K>,
{
    pub(crate) fn transparent(&self) -> Transparent<'_, C> {
        Transparent::new(&self.cmp)
    }

    /// Builds a map from unsorted entries with a single stable sort.
    pub(crate) fn from_unsorted(cmp: C, entries: VecDeque<Entry<K, V>>) -> Self {
        let mut map = Self::with_entries(cmp, entries);
        map.sort_entries();
        map
    }

    /// Restores the order after entries were appended out of place. Entries
    /// with equal keys keep their relative order.
    pub(crate) fn sort_entries(&mut self) {
        trace!(len = self.entries.len(), "sorting bulk-loaded entries");

        let cmp = Transparent::new(&self.cmp);
        self.entries
            .make_contiguous()
            .sort_by(|a, b| cmp.entries(a, b));
    }

    /// Returns `true` if `probe` sorts strictly before the first key or
    /// strictly after the last one, or if the map is empty.
    pub(crate) fn out_of_range<Q>(&self, probe: &Q) -> bool
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        let cmp = self.transparent();

        match (self.entries.front(), self.entries.back()) {
            (Some(front), Some(back)) => {
                cmp.key_entry(probe, front) == Ordering::Less
                    || cmp.key_entry(probe, back) == Ordering::Greater
            }
            _ => true,
        }
    }

    pub(crate) fn place(&mut self, position: usize, entry: Entry<K, V>) {
        if position == 0 {
            self.entries.push_front(entry);
        } else if position == self.entries.len() {
            self.entries.push_back(entry);
        } else {
            self.entries.insert(position, entry);
        }
    }

    /// Finds where a new entry with `key` goes: before the first key, after
    /// the last key, or after every equal key in the interior.
    fn insert_position(&self, key: &K) -> usize {
        let cmp = self.transparent();

        match self.entries.front() {
            Some(front) if cmp.key_entry(key, front) != Ordering::Less => {}
            _ => return 0,
        }

        match self.entries.back() {
            Some(back) if cmp.key_entry(key, back) == Ordering::Less => self.upper_bound(key),
            _ => self.entries.len(),
        }
    }

    /// Inserts a key-value pair into the map, returning its position.
    ///
    /// An entry with a key equal to existing ones is placed after them.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMultimap;
    ///
    /// let mut map = FlatMultimap::new();
    /// assert_eq!(map.insert(2, "b"), 0);
    /// assert_eq!(map.insert(3, "c"), 1);
    /// assert_eq!(map.insert(1, "a"), 0);
    /// assert_eq!(map.insert(2, "bb"), 2);
    ///
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(values, ["a", "b", "bb", "c"]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> usize {
        let position = self.insert_position(&key);
        self.place(position, Entry::new(key, value));
        position
    }

    /// Inserts an entry whose value is built by `make` once its position is
    /// known, returning the position.
    pub fn emplace<F>(&mut self, key: K, make: F) -> usize
    where
        F: FnOnce() -> V,
    {
        let position = self.insert_position(&key);
        self.place(position, Entry::new(key, make()));
        position
    }

    /// Returns the position of the first entry whose key is not ordered before `probe`.
    pub fn lower_bound<Q>(&self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        let cmp = self.transparent();
        self.entries
            .partition_point(|entry| cmp.entry_key(entry, probe) == Ordering::Less)
    }

    /// Returns the position of the first entry whose key is ordered after `probe`.
    pub fn upper_bound<Q>(&self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        let cmp = self.transparent();
        self.entries
            .partition_point(|entry| cmp.entry_key(entry, probe) != Ordering::Greater)
    }

    /// Returns the positions of all entries whose key is equal to `probe`.
    pub fn equal_range<Q>(&self, probe: &Q) -> Range<usize>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.lower_bound(probe)..self.upper_bound(probe)
    }

    /// Returns the position of the first entry with a key equal to `probe`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMultimap;
    ///
    /// let mut map = FlatMultimap::new();
    /// map.insert(String::from("b"), 1);
    /// map.insert(String::from("a"), 2);
    /// map.insert(String::from("b"), 3);
    ///
    /// // Lookups borrow the key, no `String` is built for the probe.
    /// assert_eq!(map.find_index("b"), Some(1));
    /// assert_eq!(map.find_index("c"), None);
    /// ```
    pub fn find_index<Q>(&self, probe: &Q) -> Option<usize>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        if self.out_of_range(probe) {
            return None;
        }

        let position = self.lower_bound(probe);
        let entry = self.entries.get(position)?;

        match self.transparent().entry_key(entry, probe) {
            Ordering::Equal => Some(position),
            _ => None,
        }
    }

    /// Returns a reference to the first value stored for the key.
    pub fn get<Q>(&self, probe: &Q) -> Option<&V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.get_key_value(probe).map(|(_, value)| value)
    }

    /// Returns the first entry stored for the key.
    pub fn get_key_value<Q>(&self, probe: &Q) -> Option<(&K, &V)>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        let position = self.find_index(probe)?;
        self.get_index(position)
    }

    /// Returns a mutable reference to the first value stored for the key.
    pub fn get_mut<Q>(&mut self, probe: &Q) -> Option<&mut V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        let position = self.find_index(probe)?;
        self.entries.get_mut(position).map(Entry::value_mut)
    }

    /// An iterator visiting every entry stored for the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMultimap;
    ///
    /// let map: FlatMultimap<_, _> = [(1, 'a'), (2, 'b'), (1, 'c')].into();
    ///
    /// let values: Vec<_> = map.get_all(&1).map(|(_, v)| *v).collect();
    /// assert_eq!(values, ['a', 'c']);
    /// ```
    pub fn get_all<Q>(&self, probe: &Q) -> Iter<'_, K, V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        if self.out_of_range(probe) {
            return Iter::with_range(&self.entries, 0..0);
        }

        let range = self.equal_range(probe);
        Iter::with_range(&self.entries, range)
    }

    /// A mutable iterator visiting every entry stored for the key.
    pub fn get_all_mut<Q>(&mut self, probe: &Q) -> IterMut<'_, K, V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        if self.out_of_range(probe) {
            return IterMut::with_range(&mut self.entries, 0..0);
        }

        let range = self.equal_range(probe);
        IterMut::with_range(&mut self.entries, range)
    }

    /// Returns `true` if the map contains at least a single value for the specified key.
    pub fn contains_key<Q>(&self, probe: &Q) -> bool
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.find_index(probe).is_some()
    }

    /// Returns the number of values stored for the key.
    pub fn count<Q>(&self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        if self.out_of_range(probe) {
            return 0;
        }

        self.equal_range(probe).len()
    }

    /// Removes the first value stored for the key, returning it if there was one.
    pub fn remove_one<Q>(&mut self, probe: &Q) -> Option<V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        let position = self.find_index(probe)?;
        self.entries.remove(position).map(Entry::into_value)
    }

    /// Removes every value stored for the key, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMultimap;
    ///
    /// let mut map: FlatMultimap<_, _> = [(1, 'a'), (2, 'b'), (1, 'c')].into();
    ///
    /// assert_eq!(map.remove_all(&1), 2);
    /// assert_eq!(map.remove_all(&1), 0);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove_all<Q>(&mut self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        if self.out_of_range(probe) {
            return 0;
        }

        let range = self.equal_range(probe);
        let removed = range.len();
        self.entries.drain(range);
        removed
    }
}

impl<K, V, C> Default for FlatMultimap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Debug for FlatMultimap<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for FlatMultimap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K, V, C> Eq for FlatMultimap<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> FromIterator<(K, V)> for FlatMultimap<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(Entry::from).collect();
        Self::from_unsorted(C::default(), entries)
    }
}

impl<K, V, C> Extend<(K, V)> for FlatMultimap<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();

        match iter.size_hint() {
            (_, Some(0)) => {}
            (_, Some(1)) => {
                if let Some((key, value)) = iter.next() {
                    self.insert(key, value);
                }
            }
            _ => {
                let before = self.entries.len();
                self.entries.extend(iter.map(Entry::from));

                if self.entries.len() > before {
                    self.sort_entries();
                }
            }
        }
    }
}

impl<'a, K, V, C> Extend<(&'a K, &'a V)> for FlatMultimap<K, V, C>
where
    K: Copy,
    V: Copy,
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FlatMultimap<K, V, Natural>
where
    K: Ord,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a FlatMultimap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut FlatMultimap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for FlatMultimap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}
