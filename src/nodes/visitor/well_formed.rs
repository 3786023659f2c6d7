use crate::{collation::Collation, collections::map::TrieMap, nodes::representation::TrieNode};
use std::{error::Error, fmt};

/// An issue with the well-formed-ness of the trie. See the documentation on
/// [`WellFormedChecker`] for more context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTrieError {
    /// A sibling array's window is wider than the ranks present require:
    /// one of its edge slots is empty.
    UnoccupiedWindowEdge {
        /// Key spelled by the path to the node owning the array.
        key_prefix: Box<str>,
        /// The rank addressed by the window's first slot.
        base: u32,
        /// The window width in slots.
        span: usize,
    },
    /// A non-root node carries no value and has no children. Such nodes
    /// may only exist transiently inside an operation, never in a trie at
    /// rest.
    DanglingNode {
        /// Key spelled by the path to the offending node.
        key_prefix: Box<str>,
    },
    /// The entry count recorded by the map does not match the number of
    /// value-bearing nodes.
    EntryCountMismatch {
        /// The count the map reports.
        expected: usize,
        /// The count found by walking the structure.
        actual: usize,
    },
}

impl fmt::Display for MalformedTrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnoccupiedWindowEdge {
                key_prefix,
                base,
                span,
            } => write!(
                f,
                "The sibling array at key prefix {key_prefix:?} spans {span} slots from rank \
                 {base} but leaves a window edge empty.",
            ),
            Self::DanglingNode { key_prefix } => write!(
                f,
                "The node at key prefix {key_prefix:?} has neither a value nor children.",
            ),
            Self::EntryCountMismatch { expected, actual } => write!(
                f,
                "The map records {expected} entries but the structure holds {actual}.",
            ),
        }
    }
}

impl Error for MalformedTrieError {}

/// Walks a [`TrieMap`] and verifies its structural invariants: every
/// sibling array's window is minimal (both edge slots occupied), no
/// non-root node is both valueless and childless, and the recorded entry
/// count matches the number of value-bearing nodes.
///
/// Intended for tests and debugging; the checker walks every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellFormedChecker;

impl WellFormedChecker {
    /// Check `map`, returning the first violation found.
    pub fn check<V, C: Collation>(map: &TrieMap<V, C>) -> Result<(), MalformedTrieError> {
        let mut entries = usize::from(map.root.value.is_some());
        let mut stack: Vec<(&TrieNode<V>, String)> = Vec::new();

        if !map.root.children.edges_occupied() {
            return Err(MalformedTrieError::UnoccupiedWindowEdge {
                key_prefix: Box::from(""),
                base: map.root.children.base(),
                span: map.root.children.span(),
            });
        }
        for child in map.root.children.iter() {
            stack.push((child, String::new()));
        }

        while let Some((node, prefix)) = stack.pop() {
            let mut key_prefix = prefix;
            key_prefix.push_str(&node.unit);

            if node.value.is_none() && node.children.is_empty() {
                return Err(MalformedTrieError::DanglingNode {
                    key_prefix: key_prefix.into_boxed_str(),
                });
            }
            if !node.children.edges_occupied() {
                return Err(MalformedTrieError::UnoccupiedWindowEdge {
                    key_prefix: key_prefix.into_boxed_str(),
                    base: node.children.base(),
                    span: node.children.span(),
                });
            }

            entries += usize::from(node.value.is_some());
            for child in node.children.iter() {
                stack.push((child, key_prefix.clone()));
            }
        }

        if entries != map.len() {
            return Err(MalformedTrieError::EntryCountMismatch {
                expected: map.len(),
                actual: entries,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::map::TrieMap;

    #[test]
    fn populated_maps_are_well_formed() {
        let mut map = TrieMap::new();
        for (value, key) in ["", "d", "dz", "a", "zebra"].iter().enumerate() {
            map.insert(key, value);
        }

        WellFormedChecker::check(&map).unwrap();
    }

    #[test]
    fn display_names_the_offending_prefix() {
        let err = MalformedTrieError::DanglingNode {
            key_prefix: Box::from("ab"),
        };
        assert!(err.to_string().contains("\"ab\""));
    }
}
