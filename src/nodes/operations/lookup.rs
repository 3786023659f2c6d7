use crate::{collation::Unit, nodes::representation::TrieNode};

/// Descend from `root` along `units` without creating or mutating any
/// node. Returns the terminal node if every unit on the path is present.
///
/// The terminal node may or may not carry a value; the caller checks.
pub(crate) fn search_in_subtree<'n, V>(
    root: &'n TrieNode<V>,
    units: &[Unit<'_>],
) -> Option<&'n TrieNode<V>> {
    let mut node = root;
    for unit in units {
        node = node.children.get(unit.rank)?;
    }
    Some(node)
}

pub(crate) fn search_in_subtree_mut<'n, V>(
    root: &'n mut TrieNode<V>,
    units: &[Unit<'_>],
) -> Option<&'n mut TrieNode<V>> {
    let mut node = root;
    for unit in units {
        node = node.children.get_mut(unit.rank)?;
    }
    Some(node)
}

/// The smallest entry in the subtree: the first value met on a pre-order
/// descent, since a node's own value sorts before every key in its
/// children.
pub(crate) fn minimum_in_subtree<V>(root: &TrieNode<V>) -> Option<(String, &V)> {
    let mut key = String::new();
    let mut node = root;
    loop {
        key.push_str(&node.unit);
        if let Some(value) = &node.value {
            return Some((key, value));
        }
        node = node.children.first()?;
    }
}

/// The largest entry in the subtree: the bottom of the last-child chain.
/// Every childless node carries a value, so the chain ends at an entry
/// whenever the subtree holds one.
pub(crate) fn maximum_in_subtree<V>(root: &TrieNode<V>) -> Option<(String, &V)> {
    let mut key = String::new();
    let mut node = root;
    loop {
        key.push_str(&node.unit);
        match node.children.last() {
            Some(child) => node = child,
            None => return node.value.as_ref().map(|value| (key, value)),
        }
    }
}
