use crate::compare::Compare;
use crate::entry::Entry;
use crate::{FlatMap, FlatMultimap, FlatMultiset, FlatSet};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;
use std::fmt;
use std::marker::PhantomData;

impl<K, V, C> Serialize for FlatMultimap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<K, V, C> Serialize for FlatMap<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self)
    }
}

/// Gathers every entry of a serialized map and sorts them once at the end.
struct MapVisitor<K, V, C> {
    marker: PhantomData<FlatMultimap<K, V, C>>,
}

impl<'de, K, V, C> Visitor<'de> for MapVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    type Value = FlatMultimap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = VecDeque::with_capacity(map.size_hint().unwrap_or(0));

        while let Some((key, value)) = map.next_entry()? {
            entries.push_back(Entry::new(key, value));
        }

        Ok(FlatMultimap::from_unsorted(C::default(), entries))
    }
}

impl<'de, K, V, C> Deserialize<'de> for FlatMultimap<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor = MapVisitor {
            marker: PhantomData,
        };

        deserializer.deserialize_map(visitor)
    }
}

impl<'de, K, V, C> Deserialize<'de> for FlatMap<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    /// Repeated keys keep their first value, as when collecting from an iterator.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlatMultimap::<K, V, C>::deserialize(deserializer).map(FlatMap::from)
    }
}

impl<T, C> Serialize for FlatMultiset<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self)
    }
}

impl<T, C> Serialize for FlatSet<T, C>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self)
    }
}

struct SeqVisitor<T, C> {
    marker: PhantomData<FlatMultiset<T, C>>,
}

impl<'de, T, C> Visitor<'de> for SeqVisitor<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    type Value = FlatMultiset<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut entries = VecDeque::with_capacity(seq.size_hint().unwrap_or(0));

        while let Some(value) = seq.next_element()? {
            entries.push_back(Entry::new(value, ()));
        }

        Ok(FlatMultiset {
            map: FlatMultimap::from_unsorted(C::default(), entries),
        })
    }
}

impl<'de, T, C> Deserialize<'de> for FlatMultiset<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let visitor = SeqVisitor {
            marker: PhantomData,
        };

        deserializer.deserialize_seq(visitor)
    }
}

impl<'de, T, C> Deserialize<'de> for FlatSet<T, C>
where
    T: Deserialize<'de>,
    C: Compare<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let multiset = FlatMultiset::<T, C>::deserialize(deserializer)?;

        Ok(FlatSet {
            map: FlatMap::from(multiset.map),
        })
    }
}
