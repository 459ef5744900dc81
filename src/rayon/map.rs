use super::collect_sorted;
use crate::compare::Compare;
use crate::entry::Entry;
use crate::{FlatMap, FlatMultimap};
use rayon::collections::vec_deque;
use rayon::iter::plumbing::UnindexedConsumer;
use rayon::iter::{
    FromParallelIterator, IntoParallelIterator, IntoParallelRefIterator,
    IntoParallelRefMutIterator, ParallelExtend, ParallelIterator,
};
use std::collections::VecDeque;

/// Parallel iterator over shared references to entries in a map.
pub struct ParIter<'a, K: Sync, V: Sync> {
    inner: vec_deque::Iter<'a, Entry<K, V>>,
}

impl<'a, K: Sync, V: Sync> ParallelIterator for ParIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(Entry::as_pair).drive_unindexed(consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        self.inner.opt_len()
    }
}

/// Parallel iterator over shared references to keys in a map.
pub struct ParKeys<'a, K: Sync, V: Sync> {
    inner: vec_deque::Iter<'a, Entry<K, V>>,
}

impl<'a, K: Sync, V: Sync> ParallelIterator for ParKeys<'a, K, V> {
    type Item = &'a K;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(Entry::key).drive_unindexed(consumer)
    }
}

/// Parallel iterator over shared references to values in a map.
pub struct ParValues<'a, K: Sync, V: Sync> {
    inner: vec_deque::Iter<'a, Entry<K, V>>,
}

impl<'a, K: Sync, V: Sync> ParallelIterator for ParValues<'a, K, V> {
    type Item = &'a V;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(Entry::value).drive_unindexed(consumer)
    }
}

/// Parallel iterator over entries in a map, with mutable references to the values.
pub struct ParIterMut<'a, K: Send, V: Send> {
    inner: vec_deque::IterMut<'a, Entry<K, V>>,
}

impl<'a, K: Sync + Send, V: Send> ParallelIterator for ParIterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(Entry::as_pair_mut).drive_unindexed(consumer)
    }
}

/// Parallel iterator over mutable references to values in a map.
pub struct ParValuesMut<'a, K: Send, V: Send> {
    inner: vec_deque::IterMut<'a, Entry<K, V>>,
}

impl<'a, K: Send, V: Send> ParallelIterator for ParValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(Entry::value_mut).drive_unindexed(consumer)
    }
}

/// Parallel iterator over entries of a consumed map.
pub struct IntoParIter<K: Send, V: Send> {
    inner: vec_deque::IntoIter<Entry<K, V>>,
}

impl<K: Send, V: Send> ParallelIterator for IntoParIter<K, V> {
    type Item = (K, V);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(Entry::into_parts).drive_unindexed(consumer)
    }
}

impl<K: Sync, V: Sync, C> FlatMultimap<K, V, C> {
    /// Visits (potentially in parallel) immutably borrowed keys. Collecting keeps the key order.
    pub fn par_keys(&self) -> ParKeys<'_, K, V> {
        ParKeys {
            inner: self.entries.par_iter(),
        }
    }

    /// Visits (potentially in parallel) immutably borrowed values.
    pub fn par_values(&self) -> ParValues<'_, K, V> {
        ParValues {
            inner: self.entries.par_iter(),
        }
    }
}

impl<K: Send, V: Send, C> FlatMultimap<K, V, C> {
    /// Visits (potentially in parallel) mutably borrowed values.
    pub fn par_values_mut(&mut self) -> ParValuesMut<'_, K, V> {
        ParValuesMut {
            inner: self.entries.par_iter_mut(),
        }
    }
}

impl<K: Send, V: Send, C> IntoParallelIterator for FlatMultimap<K, V, C> {
    type Item = (K, V);
    type Iter = IntoParIter<K, V>;

    fn into_par_iter(self) -> Self::Iter {
        IntoParIter {
            inner: self.entries.into_par_iter(),
        }
    }
}

impl<'a, K: Sync, V: Sync, C> IntoParallelIterator for &'a FlatMultimap<K, V, C> {
    type Item = (&'a K, &'a V);
    type Iter = ParIter<'a, K, V>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter {
            inner: self.entries.par_iter(),
        }
    }
}

impl<'a, K: Sync + Send, V: Send, C> IntoParallelIterator for &'a mut FlatMultimap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type Iter = ParIterMut<'a, K, V>;

    fn into_par_iter(self) -> Self::Iter {
        ParIterMut {
            inner: self.entries.par_iter_mut(),
        }
    }
}

impl<K, V, C> FromParallelIterator<(K, V)> for FlatMultimap<K, V, C>
where
    K: Send,
    V: Send,
    C: Compare<K> + Default + Sync,
{
    fn from_par_iter<P>(par_iter: P) -> Self
    where
        P: IntoParallelIterator<Item = (K, V)>,
    {
        let cmp = C::default();
        let entries = collect_sorted(&cmp, par_iter);
        FlatMultimap::with_entries(cmp, VecDeque::from(entries))
    }
}

impl<K, V, C> ParallelExtend<(K, V)> for FlatMultimap<K, V, C>
where
    K: Send,
    V: Send,
    C: Compare<K> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let incoming = collect_sorted(&self.cmp, par_iter);

        if !incoming.is_empty() {
            // two sorted runs, merged by the stable sort with existing entries first
            self.entries.extend(incoming);
            self.sort_entries();
        }
    }
}

impl<'a, K, V, C> ParallelExtend<(&'a K, &'a V)> for FlatMultimap<K, V, C>
where
    K: Copy + Send + Sync,
    V: Copy + Send + Sync,
    C: Compare<K> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (&'a K, &'a V)>,
    {
        self.par_extend(par_iter.into_par_iter().map(|(&k, &v)| (k, v)));
    }
}

impl<K: Sync, V: Sync, C> FlatMap<K, V, C> {
    /// Visits (potentially in parallel) immutably borrowed keys. Collecting keeps the key order.
    pub fn par_keys(&self) -> ParKeys<'_, K, V> {
        self.base.par_keys()
    }

    /// Visits (potentially in parallel) immutably borrowed values.
    pub fn par_values(&self) -> ParValues<'_, K, V> {
        self.base.par_values()
    }
}

impl<K: Send, V: Send, C> FlatMap<K, V, C> {
    /// Visits (potentially in parallel) mutably borrowed values.
    pub fn par_values_mut(&mut self) -> ParValuesMut<'_, K, V> {
        self.base.par_values_mut()
    }
}

impl<K: Send, V: Send, C> IntoParallelIterator for FlatMap<K, V, C> {
    type Item = (K, V);
    type Iter = IntoParIter<K, V>;

    fn into_par_iter(self) -> Self::Iter {
        self.base.into_par_iter()
    }
}

impl<'a, K: Sync, V: Sync, C> IntoParallelIterator for &'a FlatMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type Iter = ParIter<'a, K, V>;

    fn into_par_iter(self) -> Self::Iter {
        (&self.base).into_par_iter()
    }
}

impl<'a, K: Sync + Send, V: Send, C> IntoParallelIterator for &'a mut FlatMap<K, V, C> {
    type Item = (&'a K, &'a mut V);
    type Iter = ParIterMut<'a, K, V>;

    fn into_par_iter(self) -> Self::Iter {
        (&mut self.base).into_par_iter()
    }
}

impl<K, V, C> FromParallelIterator<(K, V)> for FlatMap<K, V, C>
where
    K: Send,
    V: Send,
    C: Compare<K> + Default + Sync,
{
    /// Repeated keys keep the value the parallel iterator produced first.
    fn from_par_iter<P>(par_iter: P) -> Self
    where
        P: IntoParallelIterator<Item = (K, V)>,
    {
        FlatMap::from(FlatMultimap::<K, V, C>::from_par_iter(par_iter))
    }
}

impl<K, V, C> ParallelExtend<(K, V)> for FlatMap<K, V, C>
where
    K: Send,
    V: Send,
    C: Compare<K> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (K, V)>,
    {
        let before = self.base.len();
        self.base.par_extend(par_iter);

        if self.base.len() > before {
            Self::collapse_duplicates(&mut self.base);
        }
    }
}

impl<'a, K, V, C> ParallelExtend<(&'a K, &'a V)> for FlatMap<K, V, C>
where
    K: Copy + Send + Sync,
    V: Copy + Send + Sync,
    C: Compare<K> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = (&'a K, &'a V)>,
    {
        self.par_extend(par_iter.into_par_iter().map(|(&k, &v)| (k, v)));
    }
}
