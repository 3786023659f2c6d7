use crate::nodes::representation::TrieNode;

/// Detach and drop every node below `root` without recursing.
///
/// Each node's sibling array is drained before the node itself is dropped,
/// so no `Drop` chain ever descends more than one level. `root`'s own unit
/// and value are left in place; the caller owns those.
pub(crate) fn deallocate_subtree<V>(root: &mut TrieNode<V>) {
    let mut stack = root.children.take_children();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.children.take_children());
    }
}
