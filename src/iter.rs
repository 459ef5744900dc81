//! Iterators shared by the ordered containers.
//!
//! Borrowing iterators walk the two contiguous halves of the backing
//! [`VecDeque`] through [`Halves`], which keeps them double-ended, exact-size
//! and O(1) to skip through, whatever the current wrap-around point is.

use crate::entry::Entry;
use std::collections::{vec_deque, VecDeque};
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::ops::Range;
use std::slice;

/// A pair of random-access iterators visited one after the other.
#[derive(Clone)]
pub(crate) struct Halves<I> {
    front: I,
    back: I,
}

impl<I> Iterator for Halves<I>
where
    I: ExactSizeIterator + DoubleEndedIterator,
{
    type Item = I::Item;

    #[inline]
    fn next(&mut self) -> Option<I::Item> {
        match self.front.next() {
            Some(item) => Some(item),
            None => self.back.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.back.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<I::Item> {
        let front_len = self.front.len();

        if n < front_len {
            return self.front.nth(n);
        }

        // exhausts `front` without visiting it
        self.front.nth(front_len);
        self.back.nth(n - front_len)
    }

    #[inline]
    fn last(mut self) -> Option<I::Item> {
        self.next_back()
    }
}

impl<I> DoubleEndedIterator for Halves<I>
where
    I: ExactSizeIterator + DoubleEndedIterator,
{
    #[inline]
    fn next_back(&mut self) -> Option<I::Item> {
        match self.back.next_back() {
            Some(item) => Some(item),
            None => self.front.next_back(),
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<I::Item> {
        let back_len = self.back.len();

        if n < back_len {
            return self.back.nth_back(n);
        }

        self.back.nth_back(back_len);
        self.front.nth_back(n - back_len)
    }
}

impl<I> ExactSizeIterator for Halves<I> where I: ExactSizeIterator + DoubleEndedIterator {}

impl<I> FusedIterator for Halves<I> where I: FusedIterator + ExactSizeIterator + DoubleEndedIterator {}

fn split_range<T>(front: &[T], back: &[T], range: Range<usize>) -> (usize, usize, usize, usize) {
    let mid = front.len();
    assert!(
        range.start <= range.end && range.end <= mid + back.len(),
        "position range {:?} out of bounds for length {}",
        range,
        mid + back.len()
    );

    if range.end <= mid {
        (range.start, range.end, 0, 0)
    } else if range.start >= mid {
        (mid, mid, range.start - mid, range.end - mid)
    } else {
        (range.start, mid, 0, range.end - mid)
    }
}

/// An iterator over the entries of an ordered container, in key order.
///
/// The iterator element type is `(&'a K, &'a V)`. Use [`Iterator::rev`] to
/// walk the entries in descending order.
pub struct Iter<'a, K, V> {
    inner: Halves<slice::Iter<'a, Entry<K, V>>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(entries: &'a VecDeque<Entry<K, V>>) -> Self {
        Self::with_range(entries, 0..entries.len())
    }

    pub(crate) fn with_range(entries: &'a VecDeque<Entry<K, V>>, range: Range<usize>) -> Self {
        let (front, back) = entries.as_slices();
        let (a, b, c, d) = split_range(front, back, range);

        Self {
            inner: Halves {
                front: front[a..b].iter(),
                back: back[c..d].iter(),
            },
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(Entry::as_pair)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<(&'a K, &'a V)> {
        self.inner.nth(n).map(Entry::as_pair)
    }

    #[inline]
    fn last(mut self) -> Option<(&'a K, &'a V)> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::as_pair)
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth_back(n).map(Entry::as_pair)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> From<IterMut<'a, K, V>> for Iter<'a, K, V> {
    fn from(iter: IterMut<'a, K, V>) -> Self {
        let front: &'a [Entry<K, V>] = iter.inner.front.into_slice();
        let back: &'a [Entry<K, V>] = iter.inner.back.into_slice();

        Self {
            inner: Halves {
                front: front.iter(),
                back: back.iter(),
            },
        }
    }
}

/// A mutable iterator over the entries of an ordered container, in key order.
///
/// The iterator element type is `(&'a K, &'a mut V)`; keys stay read-only.
pub struct IterMut<'a, K, V> {
    inner: Halves<slice::IterMut<'a, Entry<K, V>>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(entries: &'a mut VecDeque<Entry<K, V>>) -> Self {
        let len = entries.len();
        Self::with_range(entries, 0..len)
    }

    pub(crate) fn with_range(entries: &'a mut VecDeque<Entry<K, V>>, range: Range<usize>) -> Self {
        let (front, back) = entries.as_mut_slices();
        let (a, b, c, d) = split_range(front, back, range);

        Self {
            inner: Halves {
                front: front[a..b].iter_mut(),
                back: back[c..d].iter_mut(),
            },
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next().map(Entry::as_pair_mut)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<(&'a K, &'a mut V)> {
        self.inner.nth(n).map(Entry::as_pair_mut)
    }

    #[inline]
    fn last(mut self) -> Option<(&'a K, &'a mut V)> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Entry::as_pair_mut)
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth_back(n).map(Entry::as_pair_mut)
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let front = self.inner.front.as_slice().iter();
        let back = self.inner.back.as_slice().iter();

        f.debug_list()
            .entries(front.chain(back).map(Entry::as_pair))
            .finish()
    }
}

/// An iterator over the keys of an ordered container, in key order.
pub struct Keys<'a, K, V> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a K> {
        self.iter.nth(n).map(|(key, _)| key)
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K: Debug, V> Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of an ordered container, in key order.
pub struct Values<'a, K, V> {
    pub(crate) iter: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.iter.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V: Debug> Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over the values of an ordered container, in key order.
pub struct ValuesMut<'a, K, V> {
    pub(crate) iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<&'a mut V> {
        self.iter.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the entries of an ordered container, in key order.
pub struct IntoIter<K, V> {
    pub(crate) inner: vec_deque::IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(Entry::into_parts)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back().map(Entry::into_parts)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: Debug, V: Debug> Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

/// An owning iterator over the keys of an ordered container, in key order.
pub struct IntoKeys<K, V> {
    pub(crate) iter: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        self.iter.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<K> {
        self.iter.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

/// An owning iterator over the values of an ordered container, in key order.
pub struct IntoValues<K, V> {
    pub(crate) iter: IntoIter<K, V>,
}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<V> {
        self.iter.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<V> {
        self.iter.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

impl<K, V> FusedIterator for IntoValues<K, V> {}

/// A draining iterator over a run of entries of an ordered container.
///
/// Entries not yet yielded are still removed when the iterator is dropped.
pub struct Drain<'a, K, V> {
    pub(crate) inner: vec_deque::Drain<'a, Entry<K, V>>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(Entry::into_parts)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Drain<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back().map(Entry::into_parts)
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Drain<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Iter, IterMut};
    use crate::entry::Entry;
    use std::collections::VecDeque;

    // Builds a deque whose storage wraps around, so both halves are non-empty.
    fn wrapped() -> VecDeque<Entry<i32, i32>> {
        let mut entries = VecDeque::with_capacity(8);
        for key in 4..8 {
            entries.push_back(Entry::new(key, key * 10));
        }
        for key in (0..4).rev() {
            entries.push_front(Entry::new(key, key * 10));
        }
        entries
    }

    #[test]
    fn walks_both_halves() {
        let entries = wrapped();
        let keys: Vec<_> = Iter::new(&entries).map(|(k, _)| *k).collect();
        let rev: Vec<_> = Iter::new(&entries).rev().map(|(k, _)| *k).collect();

        assert_eq!(keys, (0..8).collect::<Vec<_>>());
        assert_eq!(rev, (0..8).rev().collect::<Vec<_>>());
    }

    #[test]
    fn nth_crosses_the_seam() {
        let entries = wrapped();

        for n in 0..8 {
            assert_eq!(Iter::new(&entries).nth(n).map(|(k, _)| *k), Some(n as i32));
            assert_eq!(
                Iter::new(&entries).nth_back(n).map(|(k, _)| *k),
                Some(7 - n as i32)
            );
        }

        let mut iter = Iter::new(&entries);
        assert_eq!(iter.nth(5).map(|(k, _)| *k), Some(5));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.nth(2), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn ranges() {
        let entries = wrapped();

        for start in 0..=8 {
            for end in start..=8 {
                let keys: Vec<_> = Iter::with_range(&entries, start..end)
                    .map(|(k, _)| *k)
                    .collect();
                assert_eq!(keys, (start as i32..end as i32).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    #[should_panic]
    fn range_past_end() {
        let entries = wrapped();
        let _ = Iter::with_range(&entries, 3..9);
    }

    #[test]
    fn mutable_values_then_shared() {
        let mut entries = wrapped();
        let mut iter = IterMut::new(&mut entries);

        for (_, value) in iter.by_ref().take(3) {
            *value = -1;
        }

        let rest: Iter<'_, _, _> = iter.into();
        assert_eq!(rest.len(), 5);
        assert_eq!(rest.map(|(k, _)| *k).next(), Some(3));

        let values: Vec<_> = Iter::new(&entries).map(|(_, v)| *v).collect();
        assert_eq!(values, [-1, -1, -1, 30, 40, 50, 60, 70]);
    }
}
