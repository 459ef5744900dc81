use flat_ordmap::{FlatMap, FlatMultimap, FlatSet};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u16),
    Assign(u8, u16),
    Take(u8),
    RemoveAll(u8),
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => (0..24u8, any::<u16>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => (0..24u8, any::<u16>()).prop_map(|(k, v)| Op::Assign(k, v)),
        1 => (0..24u8).prop_map(Op::Take),
        1 => (0..24u8).prop_map(Op::RemoveAll),
    ];
    prop::collection::vec(op, 0..300)
}

fn pairs() -> impl Strategy<Value = Vec<(u8, u16)>> {
    prop::collection::vec((0..32u8, any::<u16>()), 0..200)
}

/// Values per key in the order they were inserted.
fn model(pairs: &[(u8, u16)]) -> BTreeMap<u8, Vec<u16>> {
    let mut model: BTreeMap<u8, Vec<u16>> = BTreeMap::new();
    for &(k, v) in pairs {
        model.entry(k).or_default().push(v);
    }
    model
}

proptest! {
    #[test]
    fn multimap_inserts_match_model(pairs in pairs()) {
        let mut map = FlatMultimap::new();
        for &(k, v) in &pairs {
            map.insert(k, v);
        }
        let model = model(&pairs);

        prop_assert_eq!(map.len(), pairs.len());
        prop_assert!(map.keys().zip(map.keys().skip(1)).all(|(a, b)| a <= b));

        for (k, values) in &model {
            let found: Vec<_> = map.get_all(k).map(|(_, v)| *v).collect();
            prop_assert_eq!(&found, values);
            prop_assert_eq!(map.count(k), values.len());
            prop_assert_eq!(map.get(k), values.first());
        }
    }

    #[test]
    fn reverse_iteration_mirrors_forward(pairs in pairs()) {
        let map: FlatMultimap<_, _> = pairs.into_iter().collect();

        let forward: Vec<_> = map.iter().collect();
        let mut backward: Vec<_> = map.iter().rev().collect();
        backward.reverse();

        prop_assert_eq!(forward.len(), map.len());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn collecting_equals_inserting(pairs in pairs()) {
        let collected: FlatMultimap<_, _> = pairs.iter().copied().collect();

        let mut inserted = FlatMultimap::new();
        for &(k, v) in &pairs {
            inserted.insert(k, v);
        }

        prop_assert_eq!(collected, inserted);
    }

    #[test]
    fn rebuilding_from_iteration_is_identity(pairs in pairs()) {
        let map: FlatMultimap<_, _> = pairs.into_iter().collect();
        let rebuilt: FlatMultimap<_, _> = map.clone().into_iter().collect();

        prop_assert_eq!(map, rebuilt);
    }

    #[test]
    fn remove_all_clears_the_key(pairs in pairs(), probe in 0..40u8) {
        let mut map: FlatMultimap<_, _> = pairs.iter().copied().collect();
        let expected = pairs.iter().filter(|(k, _)| *k == probe).count();

        prop_assert_eq!(map.remove_all(&probe), expected);
        prop_assert!(!map.contains_key(&probe));
        prop_assert_eq!(map.len(), pairs.len() - expected);
    }

    #[test]
    fn bounds_bracket_the_equal_run(pairs in pairs(), probe in 0..40u8) {
        let map: FlatMultimap<_, _> = pairs.into_iter().collect();
        let range = map.equal_range(&probe);

        prop_assert!(map.keys().take(range.start).all(|k| *k < probe));
        prop_assert!(map.keys().skip(range.end).all(|k| *k > probe));
        prop_assert_eq!(range.len(), map.count(&probe));
    }

    #[test]
    fn map_keeps_first_value(pairs in pairs()) {
        let map: FlatMap<_, _> = pairs.iter().copied().collect();
        let model = model(&pairs);

        prop_assert_eq!(map.len(), model.len());
        for (k, values) in &model {
            prop_assert_eq!(map.get(k), values.first());
            prop_assert_eq!(map.count(k), 1);
        }
    }

    #[test]
    fn assign_keeps_last_value(pairs in pairs()) {
        let mut map = FlatMap::new();
        let mut model = BTreeMap::new();
        for &(k, v) in &pairs {
            let (_, inserted) = map.insert_or_assign(k, v);
            prop_assert_eq!(inserted, model.insert(k, v).is_none());
        }

        let entries: Vec<_> = map.into_iter().collect();
        let expected: Vec<_> = model.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn get_or_default_is_idempotent(keys in prop::collection::vec(0..16u8, 0..50)) {
        let mut map: FlatMap<u8, u32> = FlatMap::new();
        for &k in &keys {
            let first: *mut u32 = map.get_or_default(k);
            let len = map.len();
            let second: *mut u32 = map.get_or_default(k);
            prop_assert_eq!(first, second);
            prop_assert_eq!(map.len(), len);

            *map.get_or_default(k) += 1;
        }

        let distinct: BTreeSet<_> = keys.iter().copied().collect();
        prop_assert_eq!(map.len(), distinct.len());
        for k in distinct {
            let hits = keys.iter().filter(|&&x| x == k).count() as u32;
            prop_assert_eq!(map[&k], hits);
        }
    }

    #[test]
    fn take_removes_the_entry(pairs in pairs(), probe in 0..40u8) {
        let mut map: FlatMap<_, _> = pairs.iter().copied().collect();
        let expected = model(&pairs).get(&probe).and_then(|values| values.first().copied());
        let len = map.len();

        prop_assert_eq!(map.take(&probe), expected);
        prop_assert!(!map.contains_key(&probe));
        prop_assert_eq!(map.len(), len - usize::from(expected.is_some()));
    }

    #[test]
    fn mixed_operations_stay_sorted(ops in ops()) {
        let mut map = FlatMap::new();
        let mut multi = FlatMultimap::new();
        let mut map_model: BTreeMap<u8, u16> = BTreeMap::new();
        let mut multi_model: BTreeMap<u8, Vec<u16>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let (_, inserted) = map.insert(k, v);
                    prop_assert_eq!(inserted, !map_model.contains_key(&k));
                    map_model.entry(k).or_insert(v);

                    multi.insert(k, v);
                    multi_model.entry(k).or_default().push(v);
                }
                Op::Assign(k, v) => {
                    let (_, inserted) = map.insert_or_assign(k, v);
                    prop_assert_eq!(inserted, map_model.insert(k, v).is_none());

                    multi.insert(k, v);
                    multi_model.entry(k).or_default().push(v);
                }
                Op::Take(k) => {
                    prop_assert_eq!(map.take(&k), map_model.remove(&k));

                    let expected = match multi_model.get_mut(&k) {
                        Some(values) => {
                            let first = values.remove(0);
                            if values.is_empty() {
                                multi_model.remove(&k);
                            }
                            Some(first)
                        }
                        None => None,
                    };
                    prop_assert_eq!(multi.remove_one(&k), expected);
                }
                Op::RemoveAll(k) => {
                    prop_assert_eq!(map.remove(&k), map_model.remove(&k).is_some());

                    let expected = multi_model.remove(&k).map_or(0, |values| values.len());
                    prop_assert_eq!(multi.remove_all(&k), expected);
                }
            }

            prop_assert!(map.keys().zip(map.keys().skip(1)).all(|(a, b)| a < b));
            prop_assert!(multi.keys().zip(multi.keys().skip(1)).all(|(a, b)| a <= b));
            prop_assert_eq!(map.len(), map_model.len());
            prop_assert_eq!(multi.len(), multi_model.values().map(Vec::len).sum::<usize>());

            let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<_> = map_model.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(entries, expected);

            let entries: Vec<_> = multi.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<_> = multi_model
                .iter()
                .flat_map(|(k, values)| values.iter().map(move |v| (*k, *v)))
                .collect();
            prop_assert_eq!(entries, expected);
        }
    }

    #[test]
    fn set_matches_btree_set(items in prop::collection::vec(any::<i16>(), 0..100)) {
        let set: FlatSet<_> = items.iter().copied().collect();
        let model: BTreeSet<_> = items.iter().copied().collect();

        prop_assert!(set.iter().eq(model.iter()));
    }
}
