//! End-to-end ordering checks against a rank-sort oracle.

use coltrie::{Collation, CodepointOrder, CollationTable, TrieMap, WellFormedChecker};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

/// Sort `keys` the way the trie should order them: by the rank sequences
/// their decompositions produce.
fn rank_sorted<C: Collation>(collation: &C, keys: &[String]) -> Vec<String> {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable_by_key(|key| {
        let units = collation
            .decompose(key)
            .expect("oracle keys must decompose");
        units.iter().map(|unit| unit.rank).collect::<Vec<u32>>()
    });
    sorted
}

/// Random keys assembled from the given unit alphabet.
fn generated_keys(units: &[&str], count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys = HashSet::new();

    while keys.len() < count {
        let length = rng.random_range(0..=6);
        let mut key = String::new();
        for _ in 0..length {
            key.push_str(units[rng.random_range(0..units.len())]);
        }
        keys.insert(key);
    }

    keys.into_iter().collect()
}

#[test]
fn generated_keys_traverse_in_table_order() {
    // Accented letters out of codepoint position plus a digraph.
    let units = [
        "a", "à", "b", "c", "ch", "d", "è", "e", "f", "g", "h", "i",
    ];
    let collation = CollationTable::from_units(units);
    let keys = generated_keys(&units, 500, 0xC011A7E);

    let mut map = TrieMap::with_collation(collation.clone());
    for (value, key) in keys.iter().enumerate() {
        assert!(map.try_insert(key, value).unwrap().is_none());
    }

    assert_eq!(map.len(), keys.len());
    let traversed: Vec<String> = map.keys().collect();
    assert_eq!(traversed, rank_sorted(&collation, &keys));

    WellFormedChecker::check(&map).unwrap();
}

#[test]
fn generated_keys_traverse_in_codepoint_order() {
    let units = ["a", "b", "m", "y", "z", "é", "𝄞"];
    let keys = generated_keys(&units, 300, 42);

    let mut map = TrieMap::new();
    for (value, key) in keys.iter().enumerate() {
        map.insert(key, value);
    }

    // Codepoint rank order coincides with plain string order.
    let mut expected = keys.clone();
    expected.sort_unstable();

    let traversed: Vec<String> = map.keys().collect();
    assert_eq!(traversed, expected);
    assert_eq!(traversed, rank_sorted(&CodepointOrder, &keys));
}

#[test]
fn replacements_and_rereads_keep_the_structure_sound() {
    let units = ["k", "l", "m", "n", "o"];
    let keys = generated_keys(&units, 200, 7);

    let mut map = TrieMap::new();
    for round in 0..3u32 {
        for key in &keys {
            map.insert(key, round);
        }
        assert_eq!(map.len(), keys.len());
    }

    for key in &keys {
        assert_eq!(map.get(key), Some(&2));
    }

    WellFormedChecker::check(&map).unwrap();
}

#[test]
fn an_unorderable_key_changes_nothing() {
    let collation = CollationTable::from_graphemes("abcdefgh");
    let mut map = TrieMap::with_collation(collation);

    for key in ["be", "bed", "ace"] {
        map.try_insert(key, ()).unwrap();
    }
    let before: Vec<String> = map.keys().collect();

    for bad_key in ["bez", "z", "aceq", "béd"] {
        assert!(map.try_insert(bad_key, ()).is_err());
        assert!(map.try_get(bad_key).is_err());
        assert!(map.try_contains_key(bad_key).is_err());
    }

    assert_eq!(map.len(), 3);
    let after: Vec<String> = map.keys().collect();
    assert_eq!(before, after);
    WellFormedChecker::check(&map).unwrap();
}

#[test]
fn borrowed_values_outlive_the_map() {
    let first = String::from("first payload");
    let second = String::from("second payload");

    {
        let mut map = TrieMap::new();
        map.insert("a", first.as_str());
        map.insert("b", second.as_str());
        assert_eq!(map.get("a"), Some(&first.as_str()));
    }

    // Dropping the map released its nodes but never owned the payloads.
    assert_eq!(first, "first payload");
    assert_eq!(second, "second payload");
}

#[test]
fn rebuilding_under_a_new_collation_reorders_entries() {
    let forward = CollationTable::from_graphemes("abcdef");
    let reverse = CollationTable::from_graphemes("fedcba");

    let mut original = TrieMap::with_collation(forward);
    for key in ["ad", "da", "bb"] {
        original.try_insert(key, ()).unwrap();
    }

    // The supported way to change collation: rebuild and reinsert.
    let mut rebuilt = TrieMap::with_collation(reverse);
    let mut ok = true;
    original.traverse_pre_order(&mut |key: &str, _value: &()| {
        ok &= rebuilt.try_insert(key, ()).is_ok();
    });
    assert!(ok);

    let forward_order: Vec<String> = original.keys().collect();
    let reverse_order: Vec<String> = rebuilt.keys().collect();
    assert_eq!(forward_order, ["ad", "bb", "da"]);
    assert_eq!(reverse_order, ["da", "bb", "ad"]);
}
