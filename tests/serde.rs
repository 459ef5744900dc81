#![cfg(feature = "serde")]

use flat_ordmap::{FlatMap, FlatMultimap, FlatMultiset, FlatSet};

#[test]
fn map_serializes_in_key_order() {
    let map: FlatMap<_, _> = [(3, "c"), (1, "a"), (2, "b")].into();

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"1":"a","2":"b","3":"c"}"#);

    let back: FlatMap<u32, String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.get(&2).map(String::as_str), Some("b"));
}

#[test]
fn map_deserialization_keeps_first_duplicate() {
    let map: FlatMap<String, u32> = serde_json::from_str(r#"{"b":1,"a":2,"b":3}"#).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map["b"], 1);
}

#[test]
fn multimap_keeps_every_duplicate() {
    let map: FlatMultimap<String, u32> =
        serde_json::from_str(r#"{"b":1,"a":2,"b":3}"#).unwrap();

    let values: Vec<_> = map.get_all("b").map(|(_, v)| *v).collect();
    assert_eq!(values, [1, 3]);
    assert_eq!(
        serde_json::to_string(&map).unwrap(),
        r#"{"a":2,"b":1,"b":3}"#
    );
}

#[test]
fn sets_round_trip_as_sequences() {
    let set: FlatSet<i32> = serde_json::from_str("[3, 1, 3, 2]").unwrap();
    let multiset: FlatMultiset<i32> = serde_json::from_str("[3, 1, 3, 2]").unwrap();

    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");
    assert_eq!(serde_json::to_string(&multiset).unwrap(), "[1,2,3,3]");
}
