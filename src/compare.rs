use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// A total order between a stored key of type `L` and a probe of type `R`.
///
/// The containers always pass the stored key as `left`, so a comparator that
/// supports heterogeneous lookup only has to implement one direction. The
/// order must agree with `Compare<L, L>` for the probes it is used with:
/// a probe compares equal to exactly the keys it is equal to, and the ones
/// ordered before and after it form a prefix and a suffix of the sorted keys.
///
/// Any `Fn(&L, &R) -> Ordering` closure is a comparator.
///
/// # Examples
///
/// ```
/// use flat_ordmap::FlatMap;
/// use std::cmp::Ordering;
///
/// let by_len = |a: &String, b: &String| a.len().cmp(&b.len()).then_with(|| a.cmp(b));
/// let mut map = FlatMap::with_comparator(by_len);
/// map.insert(String::from("ccc"), 3);
/// map.insert(String::from("a"), 1);
/// map.insert(String::from("bb"), 2);
///
/// let keys: Vec<_> = map.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["a", "bb", "ccc"]);
/// ```
pub trait Compare<L: ?Sized, R: ?Sized = L> {
    /// Compares a stored key against a probe.
    fn compare(&self, left: &L, right: &R) -> Ordering;
}

impl<F, L, R> Compare<L, R> for F
where
    F: Fn(&L, &R) -> Ordering,
    L: ?Sized,
    R: ?Sized,
{
    #[inline]
    fn compare(&self, left: &L, right: &R) -> Ordering {
        self(left, right)
    }
}

/// Ascending order through [`Ord`], looking keys up through [`Borrow`].
///
/// A container keyed by `String` can be searched with a `&str`, the same way
/// the standard maps allow it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K, Q> Compare<K, Q> for Natural
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    #[inline]
    fn compare(&self, left: &K, right: &Q) -> Ordering {
        left.borrow().cmp(right)
    }
}

/// Descending order through [`Ord`], looking keys up through [`Borrow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descending;

impl<K, Q> Compare<K, Q> for Descending
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    #[inline]
    fn compare(&self, left: &K, right: &Q) -> Ordering {
        right.cmp(left.borrow())
    }
}

/// Lifts a key comparator to the four operand shapes the containers search
/// with: key/key, entry/entry, entry/key and key/entry.
///
/// Every shape ends in exactly one call to the wrapped comparator, with the
/// stored side on the left.
pub(crate) struct Transparent<'c, C> {
    cmp: &'c C,
}

impl<C> Clone for Transparent<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Transparent<'_, C> {}

impl<'c, C> Transparent<'c, C> {
    #[inline]
    pub(crate) const fn new(cmp: &'c C) -> Self {
        Self { cmp }
    }

    #[inline]
    pub(crate) fn keys<K, Q>(self, key: &K, probe: &Q) -> Ordering
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.cmp.compare(key, probe)
    }

    #[inline]
    pub(crate) fn entries<K, V>(self, left: &Entry<K, V>, right: &Entry<K, V>) -> Ordering
    where
        C: Compare<K>,
    {
        self.keys(left.key(), right.key())
    }

    #[inline]
    pub(crate) fn entry_key<K, V, Q>(self, entry: &Entry<K, V>, probe: &Q) -> Ordering
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.keys(entry.key(), probe)
    }

    #[inline]
    pub(crate) fn key_entry<K, V, Q>(self, probe: &Q, entry: &Entry<K, V>) -> Ordering
    where
        C: Compare<K, Q>,
        Q: ?Sized,
    {
        self.entry_key(entry, probe).reverse()
    }
}

#[cfg(test)]
mod tests {
    use super::{Compare, Descending, Natural, Transparent};
    use crate::entry::Entry;
    use std::cell::Cell;
    use std::cmp::Ordering;

    #[test]
    fn natural_borrows() {
        let owned = String::from("pear");

        assert_eq!(Natural.compare(&owned, "apple"), Ordering::Greater);
        assert_eq!(Natural.compare(&owned, "pear"), Ordering::Equal);
        assert_eq!(Natural.compare(&3, &3), Ordering::Equal);
    }

    #[test]
    fn descending_flips() {
        assert_eq!(Descending.compare(&1, &2), Ordering::Greater);
        assert_eq!(Descending.compare(&String::from("b"), "a"), Ordering::Less);
    }

    #[test]
    fn every_shape_calls_once() {
        let calls = Cell::new(0);
        let counting = |a: &i32, b: &i32| {
            calls.set(calls.get() + 1);
            a.cmp(b)
        };
        let cmp = Transparent::new(&counting);
        let low = Entry::new(1, "one");
        let high = Entry::new(2, "two");

        assert_eq!(cmp.keys(&1, &2), Ordering::Less);
        assert_eq!(cmp.entries(&low, &high), Ordering::Less);
        assert_eq!(cmp.entry_key(&high, &1), Ordering::Greater);
        assert_eq!(cmp.key_entry(&1, &high), Ordering::Less);
        assert_eq!(calls.get(), 4);
    }
}
