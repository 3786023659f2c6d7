//! This module contains the implementation of `clone()` for the trie.

use crate::nodes::representation::{RankedChildren, SpanArray, TrieNode};

/// A node whose children are still being cloned, along with the rank it
/// will occupy in its parent's sibling array.
struct UnfinishedNode<'a, V> {
    remaining: RankedChildren<'a, V>,
    rank: u32,
    clone: TrieNode<V>,
}

impl<'a, V: Clone> UnfinishedNode<'a, V> {
    fn start(source: &'a TrieNode<V>, rank: u32) -> Self {
        UnfinishedNode {
            remaining: source.children.iter_with_rank(),
            rank,
            clone: TrieNode {
                unit: source.unit.clone(),
                value: source.value.clone(),
                children: SpanArray::new(),
            },
        }
    }
}

/// Clone the subtree below `root`, including `root`'s own unit and value.
///
/// This function does not use recursion to clone, so it should not cause
/// stack overflow when cloning a deep trie. Children are linked into each
/// cloned parent in ascending rank order, which reproduces the source's
/// minimal window exactly.
pub(crate) fn clone_subtree<V: Clone>(root: &TrieNode<V>) -> TrieNode<V> {
    let mut unfinished = vec![UnfinishedNode::start(root, 0)];

    loop {
        let top = unfinished
            .last_mut()
            .expect("the root frame is only popped on return");

        if let Some((rank, child)) = top.remaining.next() {
            unfinished.push(UnfinishedNode::start(child, rank));
            continue;
        }

        let finished = unfinished.pop().expect("a frame was just inspected");
        match unfinished.last_mut() {
            Some(parent) => parent
                .clone
                .children
                .insert(finished.rank, Box::new(finished.clone)),
            None => return finished.clone,
        }
    }
}
