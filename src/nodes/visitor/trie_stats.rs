use crate::{collation::Collation, collections::map::TrieMap, nodes::representation::TrieNode};

/// Structural statistics of a [`TrieMap`], gathered by walking every node.
///
/// Useful for sizing the trade-off the windowed sibling arrays make:
/// `slot_count - occupied_slot_count` is the slack spent on interior holes
/// in exchange for rank-indexed child addressing.
///
/// # Examples
///
/// ```rust
/// use coltrie::{TrieMap, TrieStats};
///
/// let mut map = TrieMap::new();
/// map.insert("ad", ());
/// map.insert("af", ());
///
/// let stats = TrieStats::collect(&map);
/// assert_eq!(stats.entry_count, 2);
/// // Root -> 'a' -> {'d', 'f'}: four nodes counting the root.
/// assert_eq!(stats.node_count, 4);
/// // 'a' windows ranks 'd'..='f', leaving one hole at 'e'.
/// assert_eq!(stats.slot_count - stats.occupied_slot_count, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Number of nodes, including the root.
    pub node_count: usize,
    /// Number of stored entries.
    pub entry_count: usize,
    /// Total sibling-array slots allocated across all nodes.
    pub slot_count: usize,
    /// Slots currently holding a child.
    pub occupied_slot_count: usize,
    /// Length, in comparison units, of the longest root-to-node path.
    pub max_depth: usize,
}

impl TrieStats {
    /// Walk `map` and gather its statistics.
    pub fn collect<V, C: Collation>(map: &TrieMap<V, C>) -> TrieStats {
        let mut stats = TrieStats::default();
        let mut stack: Vec<(&TrieNode<V>, usize)> = vec![(&map.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            stats.node_count += 1;
            stats.entry_count += usize::from(node.value.is_some());
            stats.slot_count += node.children.span();
            stats.occupied_slot_count += node.children.child_count();
            stats.max_depth = stats.max_depth.max(depth);

            for child in node.children.iter() {
                stack.push((child, depth + 1));
            }
        }

        stats
    }
}
