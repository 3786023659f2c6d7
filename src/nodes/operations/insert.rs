use crate::{collation::Unit, nodes::representation::TrieNode};

/// Insert `value` at the node addressed by `units`, creating any missing
/// nodes along the path.
///
/// Returns the value previously stored at that node, which is `None` when
/// the key is new. The caller decomposes the key before calling, so a key
/// that fails to decompose never reaches the trie.
///
/// Each sibling array finishes its window growth before the new child is
/// linked into it, so an aborted allocation leaves the parent in its prior
/// state with no half-linked node.
pub(crate) fn insert_in_subtree<V>(
    root: &mut TrieNode<V>,
    units: &[Unit<'_>],
    value: V,
) -> Option<V> {
    let mut node = root;
    for unit in units {
        node = node
            .children
            .get_or_insert_with(unit.rank, || TrieNode::new(unit.text));
    }
    node.value.replace(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation::{Collation, CodepointOrder};

    fn units(key: &str) -> Vec<Unit<'_>> {
        CodepointOrder.decompose(key).unwrap()
    }

    #[test]
    fn insert_creates_one_node_per_new_unit() {
        let mut root = TrieNode::new("");

        assert_eq!(insert_in_subtree(&mut root, &units("ab"), 1), None);
        assert_eq!(insert_in_subtree(&mut root, &units("ac"), 2), None);

        let a = root.children.get('a' as u32).unwrap();
        assert!(a.value.is_none());
        assert_eq!(a.children.child_count(), 2);
        assert_eq!(a.children.get('b' as u32).unwrap().value, Some(1));
        assert_eq!(a.children.get('c' as u32).unwrap().value, Some(2));
    }

    #[test]
    fn reinsert_returns_the_previous_value() {
        let mut root = TrieNode::new("");

        assert_eq!(insert_in_subtree(&mut root, &units("k"), 1), None);
        assert_eq!(insert_in_subtree(&mut root, &units("k"), 2), Some(1));
        assert_eq!(root.children.get('k' as u32).unwrap().value, Some(2));
    }

    #[test]
    fn empty_unit_sequence_stores_at_the_root() {
        let mut root = TrieNode::new("");

        assert_eq!(insert_in_subtree(&mut root, &[], 9), None);
        assert_eq!(root.value, Some(9));
        assert!(root.children.is_empty());
    }
}
