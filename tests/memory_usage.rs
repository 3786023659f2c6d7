//! Teardown accounting: every structural allocation the trie makes must be
//! released again, verified by allocation counting rather than through the
//! map API.
//!
//! dhat supports one profiler per process, so this binary holds a single
//! test that walks through the scenarios in sequence.

use coltrie::{CollationTable, TrieMap};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[test]
#[cfg(not(miri))]
fn teardown_releases_all_structural_memory() {
    let _profiler = dhat::Profiler::builder().testing().build();

    let baseline = dhat::HeapStats::get();

    // Drop of a populated map.
    {
        let mut map = TrieMap::new();
        for index in 0..1_000u32 {
            map.insert(&format!("entry-{index:04}"), index);
        }
        assert_eq!(map.len(), 1_000);

        let populated = dhat::HeapStats::get();
        dhat::assert!(populated.curr_bytes > baseline.curr_bytes);
    }
    let after_drop = dhat::HeapStats::get();
    dhat::assert_eq!(after_drop.curr_blocks, baseline.curr_blocks);
    dhat::assert_eq!(after_drop.curr_bytes, baseline.curr_bytes);

    // `clear` releases the nodes while the map itself stays live.
    {
        let mut map = TrieMap::new();
        for index in 0..500u32 {
            map.insert(&format!("{index}"), index);
        }
        map.clear();

        let cleared = dhat::HeapStats::get();
        dhat::assert_eq!(cleared.curr_blocks, baseline.curr_blocks);
        dhat::assert_eq!(cleared.curr_bytes, baseline.curr_bytes);
    }

    // Draining through `into_iter` moves values out and still releases
    // every node, including when the iterator is abandoned partway.
    {
        let mut map = TrieMap::new();
        for index in 0..500u32 {
            map.insert(&format!("prefix-shared-{index}"), index);
        }

        let mut drained = map.into_iter();
        for _ in 0..250 {
            drained.next();
        }
        drop(drained);
    }
    let after_partial_drain = dhat::HeapStats::get();
    dhat::assert_eq!(after_partial_drain.curr_blocks, baseline.curr_blocks);
    dhat::assert_eq!(after_partial_drain.curr_bytes, baseline.curr_bytes);

    // A table collation owns its alphabet; dropping the map releases that
    // too. Long shared prefixes exercise deep teardown.
    {
        let collation = CollationTable::from_graphemes("abcdefghijklmnopqrstuvwxyz");
        let mut map = TrieMap::with_collation(collation);
        let deep_key = "a".repeat(10_000);
        map.try_insert(&deep_key, 0u8).unwrap();
        map.try_insert("b", 1).unwrap();
    }
    let after_deep = dhat::HeapStats::get();
    dhat::assert_eq!(after_deep.curr_blocks, baseline.curr_blocks);
    dhat::assert_eq!(after_deep.curr_bytes, baseline.curr_bytes);
}
