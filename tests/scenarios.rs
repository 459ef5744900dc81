use flat_ordmap::{Descending, FlatMap, FlatMultimap, FlatMultiset, FlatSet};
use std::cell::Cell;

#[test]
fn map_iterates_in_key_order() {
    let map: FlatMap<i32, &str> = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();

    let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);
}

#[test]
fn map_construction_keeps_first_of_duplicates() {
    let map: FlatMap<i32, &str> = [(1, "a"), (1, "b")].into_iter().collect();

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&1), Some(&"a"));
}

#[test]
fn multimap_keeps_duplicates_adjacent() {
    let mut map = FlatMultimap::new();
    for key in [5, 1, 3, 1] {
        map.insert(key, key.to_string());
    }

    assert_eq!(map.count(&1), 2);
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, [1, 1, 3, 5]);
}

#[test]
fn default_value_on_first_access() {
    let mut map: FlatMap<i32, i32> = FlatMap::new();
    *map.get_or_default(5) += 10;

    assert_eq!(map[&5], 10);
    assert_eq!(map.len(), 1);
}

#[test]
fn try_emplace_keeps_existing_value() {
    let mut map = FlatMap::new();

    assert_eq!(map.try_emplace(7, || "x"), (0, true));
    assert_eq!(map.try_emplace(7, || "y"), (0, false));
    assert_eq!(map[&7], "x");
}

#[test]
fn out_of_range_removal_only_checks_the_ends() {
    let calls = Cell::new(0);
    let counting = |a: &i32, b: &i32| {
        calls.set(calls.get() + 1);
        a.cmp(b)
    };

    let mut map = FlatMultimap::with_comparator(counting);
    for key in [10, 20, 20, 30, 40, 50, 60, 70] {
        map.insert(key, ());
    }

    calls.set(0);
    assert_eq!(map.remove_all(&5), 0);
    assert!(calls.get() <= 2);

    calls.set(0);
    assert_eq!(map.remove_all(&99), 0);
    assert!(calls.get() <= 2);

    calls.set(0);
    assert_eq!(map.count(&0), 0);
    assert!(calls.get() <= 2);

    assert_eq!(map.remove_all(&20), 2);
    assert_eq!(map.len(), 6);
}

#[test]
fn end_insertions_skip_the_search() {
    let calls = Cell::new(0);
    let counting = |a: &u32, b: &u32| {
        calls.set(calls.get() + 1);
        a.cmp(b)
    };

    let mut map = FlatMultimap::with_comparator(counting);
    for key in 0..64u32 {
        calls.set(0);
        map.insert(key, ());
        assert!(calls.get() <= 2);
    }
}

#[test]
fn string_keys_looked_up_by_str() {
    let mut map = FlatMap::new();
    map.insert(String::from("pear"), 3);
    map.insert(String::from("apple"), 1);

    assert_eq!(map.get("apple"), Some(&1));
    assert_eq!(map.find_index("pear"), Some(1));
    assert!(map.remove("pear"));
    assert!(!map.contains_key("pear"));
}

#[test]
fn descending_order() {
    let mut set: FlatSet<i32, Descending> = FlatSet::with_comparator(Descending);
    set.extend([2, 9, 4, 9]);

    let items: Vec<_> = set.iter().copied().collect();
    assert_eq!(items, [9, 4, 2]);
    assert_eq!(set.lower_bound(&4), 1);
}

#[test]
fn positions_point_at_entries() {
    let mut map: FlatMultimap<_, _> = [(1, 'a'), (3, 'c'), (3, 'd'), (5, 'e')].into();

    let range = map.equal_range(&3);
    assert_eq!(range, 1..3);
    assert_eq!(map.get_index(range.start), Some((&3, &'c')));

    let removed: Vec<_> = map.remove_range(range).collect();
    assert_eq!(removed, [(3, 'c'), (3, 'd')]);
    assert_eq!(map.lower_bound(&3), 1);
    assert_eq!(map.upper_bound(&5), 2);
}

#[test]
fn iterators_run_both_ways() {
    let map: FlatMap<_, _> = (0..10).map(|i| (i, i * i)).collect();

    let mut iter = map.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next(), Some((&0, &0)));
    assert_eq!(iter.next_back(), Some((&9, &81)));
    assert_eq!(iter.nth(3), Some((&4, &16)));
    assert_eq!(iter.len(), 4);

    let reversed: Vec<_> = map.keys().rev().copied().collect();
    assert_eq!(reversed, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn multiset_and_set_agree_on_members() {
    let items = [4, 1, 4, 2, 1, 4];
    let set: FlatSet<_> = items.into_iter().collect();
    let multiset: FlatMultiset<_> = items.into_iter().collect();

    assert_eq!(set.len(), 3);
    assert_eq!(multiset.len(), 6);
    assert_eq!(multiset.count(&4), 3);
    for item in &set {
        assert!(multiset.contains(item));
    }
}

#[test]
fn comparator_closure_sees_stored_key_first() {
    let seen_stored_left = Cell::new(true);
    let cmp = |stored: &(i32, i32), probe: &(i32, i32)| {
        if stored.1 != 0 {
            seen_stored_left.set(false);
        }
        stored.0.cmp(&probe.0)
    };

    let mut map = FlatMap::with_comparator(cmp);
    map.insert((1, 0), "one");
    map.insert((2, 0), "two");

    assert_eq!(map.get(&(2, 7)), Some(&"two"));
    assert!(seen_stored_left.get());
}
