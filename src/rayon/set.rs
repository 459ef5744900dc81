use super::map;
use crate::compare::Compare;
use crate::{FlatMap, FlatMultimap, FlatMultiset, FlatSet};
use rayon::iter::plumbing::UnindexedConsumer;
use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelExtend, ParallelIterator};

/// Parallel iterator over elements of a consumed set.
pub struct IntoParIter<T: Send> {
    inner: map::IntoParIter<T, ()>,
}

impl<T: Send> ParallelIterator for IntoParIter<T> {
    type Item = T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.map(|(k, _)| k).drive_unindexed(consumer)
    }
}

/// Parallel iterator over shared references to elements in a set.
pub struct ParIter<'a, T: Sync> {
    inner: map::ParKeys<'a, T, ()>,
}

impl<'a, T: Sync> ParallelIterator for ParIter<'a, T> {
    type Item = &'a T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        self.inner.drive_unindexed(consumer)
    }
}

impl<T: Send, C> IntoParallelIterator for FlatSet<T, C> {
    type Item = T;
    type Iter = IntoParIter<T>;

    fn into_par_iter(self) -> Self::Iter {
        IntoParIter {
            inner: self.map.into_par_iter(),
        }
    }
}

impl<'a, T: Sync, C> IntoParallelIterator for &'a FlatSet<T, C> {
    type Item = &'a T;
    type Iter = ParIter<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter {
            inner: self.map.par_keys(),
        }
    }
}

impl<T: Send, C> IntoParallelIterator for FlatMultiset<T, C> {
    type Item = T;
    type Iter = IntoParIter<T>;

    fn into_par_iter(self) -> Self::Iter {
        IntoParIter {
            inner: self.map.into_par_iter(),
        }
    }
}

impl<'a, T: Sync, C> IntoParallelIterator for &'a FlatMultiset<T, C> {
    type Item = &'a T;
    type Iter = ParIter<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter {
            inner: self.map.par_keys(),
        }
    }
}

impl<T, C> FromParallelIterator<T> for FlatSet<T, C>
where
    T: Send,
    C: Compare<T> + Default + Sync,
{
    fn from_par_iter<P>(par_iter: P) -> Self
    where
        P: IntoParallelIterator<Item = T>,
    {
        FlatSet {
            map: FlatMap::from_par_iter(par_iter.into_par_iter().map(|k| (k, ()))),
        }
    }
}

impl<T, C> ParallelExtend<T> for FlatSet<T, C>
where
    T: Send,
    C: Compare<T> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        self.map
            .par_extend(par_iter.into_par_iter().map(|k| (k, ())));
    }
}

impl<T, C> FromParallelIterator<T> for FlatMultiset<T, C>
where
    T: Send,
    C: Compare<T> + Default + Sync,
{
    fn from_par_iter<P>(par_iter: P) -> Self
    where
        P: IntoParallelIterator<Item = T>,
    {
        FlatMultiset {
            map: FlatMultimap::from_par_iter(par_iter.into_par_iter().map(|k| (k, ()))),
        }
    }
}

impl<T, C> ParallelExtend<T> for FlatMultiset<T, C>
where
    T: Send,
    C: Compare<T> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        self.map
            .par_extend(par_iter.into_par_iter().map(|k| (k, ())));
    }
}

impl<'a, T, C> ParallelExtend<&'a T> for FlatMultiset<T, C>
where
    T: 'a + Copy + Send + Sync,
    C: Compare<T> + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = &'a T>,
    {
        self.par_extend(par_iter.into_par_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use crate::{FlatMultiset, FlatSet};
    use rayon::iter::{IntoParallelIterator, ParallelExtend, ParallelIterator};

    #[test]
    fn collect_sets() {
        let set: FlatSet<u32> = (0..500u32).into_par_iter().map(|i| i % 7).collect();
        let multiset: FlatMultiset<u32> = (0..500u32).into_par_iter().map(|i| i % 7).collect();

        assert_eq!(set.len(), 7);
        assert_eq!(multiset.len(), 500);
        assert_eq!(multiset.count(&0), 72);

        let items: Vec<_> = (&set).into_par_iter().copied().collect();
        assert_eq!(items, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn extend_multiset() {
        let mut multiset: FlatMultiset<_> = [3, 1].into();
        multiset.par_extend(vec![2, 3]);

        assert_eq!(multiset.into_par_iter().collect::<Vec<_>>(), [1, 2, 3, 3]);
    }
}
