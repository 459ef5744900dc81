use std::fmt::{self, Debug};
use std::mem;

/// A key-value pair stored inside one of the flat containers.
///
/// The key can only be read from the outside. Containers relocate whole
/// entries by move when they shift their storage, so a key is never rewritten
/// in place once the entry is stored.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a new entry from a key and a value.
    #[must_use]
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key of this entry.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value of this entry.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns a mutable reference to the value of this entry.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replaces the value, returning the old one. The key is left untouched.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        mem::replace(&mut self.value, value)
    }

    /// Exchanges the key and value of two entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use flat_ordmap::Entry;
    ///
    /// let mut a = Entry::new(1, "a");
    /// let mut b = Entry::new(2, "b");
    /// a.swap(&mut b);
    ///
    /// assert_eq!(a.as_pair(), (&2, &"b"));
    /// assert_eq!(b.as_pair(), (&1, &"a"));
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Borrows the entry as a `(key, value)` tuple.
    #[inline]
    pub const fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Borrows the entry as a `(key, value)` tuple with a mutable value.
    #[inline]
    pub fn as_pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    /// Converts this entry into its key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Converts this entry into its value.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the contained key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    #[inline]
    fn from(entry: Entry<K, V>) -> Self {
        entry.into_parts()
    }
}

impl<K: Debug, V: Debug> Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key)
            .field(&self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn clone_is_deep() {
        let original = Entry::new(String::from("k"), vec![1, 2]);
        let mut copy = original.clone();
        copy.value_mut().push(3);

        assert_eq!(original.value(), &vec![1, 2]);
        assert_eq!(copy.value(), &vec![1, 2, 3]);
        assert_eq!(copy.key(), original.key());
    }

    #[test]
    fn moving_out_keeps_both_fields() {
        let entry = Entry::new(String::from("key"), String::from("value"));
        let (key, value) = entry.into();

        assert_eq!(key, "key");
        assert_eq!(value, "value");
    }

    #[test]
    fn replace_value_leaves_key() {
        let mut entry = Entry::new(4, "old");

        assert_eq!(entry.replace_value("new"), "old");
        assert_eq!(entry.as_pair(), (&4, &"new"));
    }

    #[test]
    fn pair_views() {
        let mut entry = Entry::new('x', 1);
        let (key, value) = entry.as_pair_mut();
        *value += *key as i32;

        assert_eq!(entry.into_value(), 1 + 'x' as i32);
    }
}
