#[cfg(feature = "rayon")]
pub use crate::rayon::map as rayon;

use crate::compare::{Compare, Natural, Transparent};
use crate::entry::Entry;
use crate::iter::{Drain, IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Values, ValuesMut};
use crate::multimap::FlatMultimap;
use std::cmp::Ordering;
use std::collections::{TryReserveError, VecDeque};
use std::fmt::{self, Debug};
use std::mem;
use std::ops::{Index, Range, RangeBounds};
use tracing::debug;

/// Ordered map implementation where entries are stored sorted by key in a
/// single double-ended buffer.
///
/// Lookups are binary searches over contiguous memory. Appending keys in
/// ascending order, or prepending them in descending order, costs amortized
/// O(1) per entry; only inserts into the interior shift existing entries.
///
/// Building a map from an iterator with repeated keys keeps the *first*
/// occurrence of each key, the same way [`insert`](Self::insert) never
/// overwrites an existing value.
///
/// # Examples
///
/// ```
/// use flat_ordmap::FlatMap;
///
/// let mut map = FlatMap::new();
/// map.insert(3, "c");
/// map.insert(1, "a");
/// map.insert(2, "b");
///
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&1, &"a"), (&2, &"b"), (&3, &"c")]);
/// ```
#[derive(Clone)]
pub struct FlatMap<K, V, C = Natural> {
    pub(crate) base: FlatMultimap<K, V, C>,
}

impl<K, V> FlatMap<K, V, Natural> {
    /// Creates an empty `FlatMap` ordered by [`Ord`].
    ///
    /// The map will not allocate until it is first inserted into.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty `FlatMap` with at least the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> FlatMap<K, V, C> {
    /// Creates an empty `FlatMap` which will order its keys with `cmp`.
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            base: FlatMultimap::with_comparator(cmp),
        }
    }

    /// Creates an empty `FlatMap` with at least the specified capacity, ordering its keys with `cmp`.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            base: FlatMultimap::with_capacity_and_comparator(capacity, cmp),
        }
    }

    /// Returns a reference to the map's comparator.
    pub const fn comparator(&self) -> &C {
        self.base.comparator()
    }

    /// Returns the number of elements the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.base.capacity()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Clears the map, removing all key-value pairs. Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        self.base.clear();
    }

    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.base.reserve(additional);
    }

    /// Tries to reserve capacity for at least `additional` more entries.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.base.try_reserve(additional)
    }

    /// Shrinks the capacity of the map as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.base.shrink_to_fit();
    }

    /// Shrinks the capacity of the map with a lower limit.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.base.shrink_to(min_capacity);
    }

    /// An iterator visiting all key-value pairs in ascending key order. The iterator element type is `(&'a K, &'a V)`.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.base.iter()
    }

    /// An iterator visiting all key-value pairs in ascending key order, with mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.base.iter_mut()
    }

    /// An iterator visiting all keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.base.keys()
    }

    /// An iterator visiting all values in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        self.base.values()
    }

    /// An iterator visiting all values mutably in key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        self.base.values_mut()
    }

    /// Creates a consuming iterator visiting all the keys in ascending order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        self.base.into_keys()
    }

    /// Creates a consuming iterator visiting all the values in key order.
    pub fn into_values(self) -> IntoValues<K, V> {
        self.base.into_values()
    }

    /// Returns the entries in key order as a pair of contiguous slices.
    ///
    /// The second slice is empty unless the buffer currently wraps around.
    pub fn as_slices(&self) -> (&[Entry<K, V>], &[Entry<K, V>]) {
        self.base.as_slices()
    }

    /// Returns the entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.base.first()
    }

    /// Returns the entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.base.last()
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.base.pop_first()
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.base.pop_last()
    }

    /// Returns the entry at `position` in key order.
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> {
        self.base.get_index(position)
    }

    /// Returns the entry at `position` in key order, with a mutable value.
    pub fn get_index_mut(&mut self, position: usize) -> Option<(&K, &mut V)> {
        self.base.get_index_mut(position)
    }

    /// Removes the entry at `position`, returning it if the position was in bounds.
    pub fn remove_index(&mut self, position: usize) -> Option<(K, V)> {
        self.base.remove_index(position)
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
        self.base.remove_range(range)
    }

    /// Clears the map, returning all entries as an iterator in key order.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        self.base.drain()
    }

    /// Retains only the entries specified by the predicate.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.base.retain(f);
    }

    /// Converts the map into a multimap holding the same entries.
    pub fn into_multimap(self) -> FlatMultimap<K, V, C> {
        self.base
    }
}

impl<K, V, C> FlatMap<K, V, C>
where
    C: Compare<K>,
{
    /// Collapses every run of equal keys in the sorted `base` to its first
    /// entry.
    pub(crate) fn collapse_duplicates(base: &mut FlatMultimap<K, V, C>) {
        let cmp = Transparent::new(&base.cmp);
        let before = base.entries.len();

        let mut entries = Vec::from(mem::take(&mut base.entries));
        entries.dedup_by(|later, earlier| cmp.entries(earlier, later) == Ordering::Equal);

        let dropped = before - entries.len();
        if dropped > 0 {
            debug!(dropped, kept = entries.len(), "collapsed duplicate keys");
        }

        base.entries = VecDeque::from(entries);
    }

    /// Finds `key`: `Ok` with its position if present, otherwise `Err` with
    /// the position it would be inserted at.
    fn locate(&self, key: &K) -> Result<usize, usize> {
        let cmp = self.base.transparent();
        let entries = &self.base.entries;

        match entries.front().map(|front| cmp.key_entry(key, front)) {
            None | Some(Ordering::Less) => return Err(0),
            Some(Ordering::Equal) => return Ok(0),
            Some(Ordering::Greater) => {}
        }

        let last = entries.len() - 1;
        match entries.back().map(|back| cmp.key_entry(key, back)) {
            Some(Ordering::Less) => {}
            Some(Ordering::Equal) => return Ok(last),
            _ => return Err(entries.len()),
        }

        let position = self.base.lower_bound(key);
        match entries.get(position).map(|entry| cmp.entry_key(entry, key)) {
            Some(Ordering::Equal) => Ok(position),
            _ => Err(position),
        }
    }

    fn value_at(&mut self, position: usize) -> &mut V {
        self.base.entries[position].value_mut()
    }

    /// Inserts a key-value pair if the key is not present yet.
    ///
    /// Returns the position of the entry for `key` and whether it was
    /// inserted. An existing entry is left untouched and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// assert_eq!(map.insert(37, "a"), (0, true));
    /// assert_eq!(map.insert(37, "b"), (0, false));
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (usize, bool) {
        self.try_emplace(key, || value)
    }

    /// Inserts a key-value pair, overwriting the value of an existing entry.
    ///
    /// Returns the position of the entry and whether it was newly inserted.
    /// The stored key is kept when the value is overwritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// assert_eq!(map.insert_or_assign(37, "a"), (0, true));
    /// assert_eq!(map.insert_or_assign(37, "b"), (0, false));
    /// assert_eq!(map[&37], "b");
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (usize, bool) {
        self.emplace_or_assign(key, || value)
    }

    /// Like [`insert_or_assign`](Self::insert_or_assign), building the value
    /// with `make` once the position is known.
    pub fn emplace_or_assign<F>(&mut self, key: K, make: F) -> (usize, bool)
    where
        F: FnOnce() -> V,
    {
        match self.locate(&key) {
            Ok(position) => {
                *self.value_at(position) = make();
                (position, false)
            }
            Err(position) => {
                self.base.place(position, Entry::new(key, make()));
                (position, true)
            }
        }
    }

    /// Inserts an entry whose value is built by `make`, only if the key is not
    /// present yet. `make` is not called for an existing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMap;
    ///
    /// let mut map = FlatMap::new();
    /// map.try_emplace(7, || "x");
    /// map.try_emplace(7, || unreachable!());
    ///
    /// assert_eq!(map.get(&7), Some(&"x"));
    /// ```
    pub fn try_emplace<F>(&mut self, key: K, make: F) -> (usize, bool)
    where
        F: FnOnce() -> V,
    {
        match self.locate(&key) {
            Ok(position) => (position, false),
            Err(position) => {
                self.base.place(position, Entry::new(key, make()));
                (position, true)
            }
        }
    }

    /// Returns a mutable reference to the value for `key`, inserting the
    /// value built by `make` first if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let (position, _) = self.try_emplace(key, make);
        self.value_at(position)
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMap;
    ///
    /// let mut map: FlatMap<i32, i32> = FlatMap::new();
    /// *map.get_or_default(5) += 10;
    /// *map.get_or_default(5) += 1;
    ///
    /// assert_eq!(map[&5], 11);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    /// Returns the position of the first entry whose key is not ordered before `probe`.
    pub fn lower_bound<Q>(&self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.lower_bound(probe)
    }

    /// Returns the position of the first entry whose key is ordered after `probe`.
    pub fn upper_bound<Q>(&self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.upper_bound(probe)
    }

    /// Returns the positions of the entries whose key is equal to `probe`.
    ///
    /// The range is empty or holds a single position.
    pub fn equal_range<Q>(&self, probe: &Q) -> Range<usize>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        match self.find_index(probe) {
            Some(position) => position..position + 1,
            None => {
                let position = self.lower_bound(probe);
                position..position
            }
        }
    }

    /// Returns the position of the entry for the key.
    pub fn find_index<Q>(&self, probe: &Q) -> Option<usize>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.find_index(probe)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMap;
    ///
    /// let map: FlatMap<String, u32> = [(String::from("one"), 1)].into_iter().collect();
    ///
    /// assert_eq!(map.get("one"), Some(&1));
    /// assert_eq!(map.get("two"), None);
    /// ```
    pub fn get<Q>(&self, probe: &Q) -> Option<&V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.get(probe)
    }

    /// Returns the key-value pair corresponding to the key.
    pub fn get_key_value<Q>(&self, probe: &Q) -> Option<(&K, &V)>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.get_key_value(probe)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, probe: &Q) -> Option<&mut V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.get_mut(probe)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, probe: &Q) -> bool
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.contains_key(probe)
    }

    /// Returns `1` if the map contains the key, `0` otherwise.
    pub fn count<Q>(&self, probe: &Q) -> usize
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        usize::from(self.contains_key(probe))
    }

    /// Removes the entry for the key, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::FlatMap;
    ///
    /// let mut map: FlatMap<_, _> = [(1, String::from("a"))].into();
    ///
    /// assert_eq!(map.take(&1).as_deref(), Some("a"));
    /// assert_eq!(map.take(&1), None);
    /// assert!(map.is_empty());
    /// ```
    pub fn take<Q>(&mut self, probe: &Q) -> Option<V>
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.base.remove_one(probe)
    }

    /// Removes the entry for the key. Returns whether the key was present.
    pub fn remove<Q>(&mut self, probe: &Q) -> bool
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.take(probe).is_some()
    }
}

impl<K, V, C> From<FlatMultimap<K, V, C>> for FlatMap<K, V, C>
where
    C: Compare<K>,
{
    /// Keeps the first entry stored for every key.
    fn from(mut base: FlatMultimap<K, V, C>) -> Self {
        Self::collapse_duplicates(&mut base);
        Self { base }
    }
}

impl<K, V, C> Default for FlatMap<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> Debug for FlatMap<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for FlatMap<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<K, V, C> Eq for FlatMap<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C, Q> Index<&Q> for FlatMap<K, V, C>
where
    C: Compare<K> + Compare<K, Q>,
    Q: ?Sized,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C> FromIterator<(K, V)> for FlatMap<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut base: FlatMultimap<K, V, C> = iter.into_iter().collect();
        Self::collapse_duplicates(&mut base);
        Self { base }
    }
}

impl<K, V, C> Extend<(K, V)> for FlatMap<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts every pair whose key is not present yet. Entries already in
    /// the map, and earlier pairs of the iterator, win over later ones.
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
                let before = self.base.len();
                self.base.entries.extend(iter.map(Entry::from));

                if self.base.len() > before {
                    self.base.sort_entries();
                    Self::collapse_duplicates(&mut self.base);
                }
            }
        }
    }
}

impl<'a, K, V, C> Extend<(&'a K, &'a V)> for FlatMap<K, V, C>
where
    K: Copy,
    V: Copy,
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FlatMap<K, V, Natural>
where
    K: Ord,
{
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a FlatMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, C> IntoIterator for &'a mut FlatMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, C> IntoIterator for FlatMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        self.base.into_iter()
    }
}
