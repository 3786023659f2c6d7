#![no_main]

use coltrie::{Collation, CollationTable, TrieMap, WellFormedChecker};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use std::collections::BTreeMap;

/// Alphabet with an accented letter out of byte order and a digraph.
const UNITS: [&str; 10] = ["a", "b", "c", "ch", "d", "è", "e", "f", "g", "h"];

#[derive(Arbitrary, Debug)]
enum Action {
    Insert(Vec<u8>),
    InsertRaw(String),
    Get(Vec<u8>),
    ContainsKey(Vec<u8>),
    FirstKeyValue,
    LastKeyValue,
    CheckLen,
    CheckIter,
    Traverse,
    Clear,
    CloneMap,
}

/// Map arbitrary bytes onto alphabet units so generated keys decompose.
fn key_from(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| UNITS[(*byte as usize) % UNITS.len()])
        .collect()
}

/// Canonical rank sequence of a decomposable key.
fn ranks_of(collation: &CollationTable, key: &str) -> Vec<u32> {
    collation
        .decompose(key)
        .expect("generated keys are always decomposable")
        .iter()
        .map(|unit| unit.rank)
        .collect()
}

libfuzzer_sys::fuzz_target!(|actions: Vec<Action>| {
    let collation = CollationTable::from_units(UNITS);
    let mut map = TrieMap::with_collation(collation.clone());
    // Oracle keyed by rank sequence, which is exactly the trie's order.
    let mut oracle: BTreeMap<Vec<u32>, (String, u32)> = BTreeMap::new();
    let mut next_value = 0u32;

    for action in actions {
        match action {
            Action::Insert(bytes) => {
                let key = key_from(&bytes);
                let ranks = ranks_of(&collation, &key);

                let previous = map.try_insert(&key, next_value).unwrap();
                let expected = oracle
                    .insert(ranks, (key, next_value))
                    .map(|(_, value)| value);
                assert_eq!(previous, expected);
                next_value += 1;
            },
            Action::InsertRaw(key) => {
                // Arbitrary strings usually fall outside the alphabet; a
                // failed decomposition must leave the map untouched.
                match collation.decompose(&key) {
                    Ok(units) => {
                        let ranks: Vec<u32> = units.iter().map(|unit| unit.rank).collect();
                        let previous = map.try_insert(&key, next_value).unwrap();
                        let expected = oracle
                            .insert(ranks, (key, next_value))
                            .map(|(_, value)| value);
                        assert_eq!(previous, expected);
                        next_value += 1;
                    },
                    Err(_) => {
                        let len_before = map.len();
                        assert!(map.try_insert(&key, next_value).is_err());
                        assert_eq!(map.len(), len_before);
                    },
                }
            },
            Action::Get(bytes) => {
                let key = key_from(&bytes);
                let ranks = ranks_of(&collation, &key);

                let found = map.try_get(&key).unwrap().copied();
                let expected = oracle.get(&ranks).map(|(_, value)| *value);
                assert_eq!(found, expected);
            },
            Action::ContainsKey(bytes) => {
                let key = key_from(&bytes);
                let ranks = ranks_of(&collation, &key);

                let contained = map.try_contains_key(&key).unwrap();
                assert_eq!(contained, oracle.contains_key(&ranks));
            },
            Action::FirstKeyValue => {
                let first = map.first_key_value().map(|(key, value)| (key, *value));
                let expected = oracle
                    .values()
                    .next()
                    .map(|(key, value)| (key.clone(), *value));
                assert_eq!(first, expected);
            },
            Action::LastKeyValue => {
                let last = map.last_key_value().map(|(key, value)| (key, *value));
                let expected = oracle
                    .values()
                    .next_back()
                    .map(|(key, value)| (key.clone(), *value));
                assert_eq!(last, expected);
            },
            Action::CheckLen => {
                assert_eq!(map.len(), oracle.len());
                assert_eq!(map.is_empty(), oracle.is_empty());
            },
            Action::CheckIter => {
                let entries: Vec<(String, u32)> = map
                    .iter()
                    .map(|(key, value)| (key, *value))
                    .collect();
                let expected: Vec<(String, u32)> = oracle
                    .values()
                    .map(|(key, value)| (key.clone(), *value))
                    .collect();
                assert_eq!(entries, expected);
            },
            Action::Traverse => {
                let mut entries = Vec::new();
                map.traverse_pre_order(&mut |key: &str, value: &u32| {
                    entries.push((key.to_owned(), *value));
                });
                let expected: Vec<(String, u32)> = oracle
                    .values()
                    .map(|(key, value)| (key.clone(), *value))
                    .collect();
                assert_eq!(entries, expected);

                WellFormedChecker::check(&map).unwrap();
            },
            Action::Clear => {
                map.clear();
                oracle.clear();
            },
            Action::CloneMap => {
                let cloned = map.clone();
                assert_eq!(cloned, map);
                map = cloned;
            },
        }
    }

    WellFormedChecker::check(&map).unwrap();
});
