//! An ordered, string-keyed map whose entries follow a configurable
//! collation.

use crate::{
    collation::{Collation, CodepointOrder, DecomposeError, TotalCollation},
    nodes::{
        operations::{
            clone_subtree, deallocate_subtree, insert_in_subtree, maximum_in_subtree,
            minimum_in_subtree, search_in_subtree, search_in_subtree_mut, PreorderWalk,
        },
        representation::TrieNode,
        visitor::Visitor,
    },
};
use core::fmt::Debug;
use std::mem;

mod iterators;
pub use iterators::*;

/// An ordered map from string keys to values, based on a collation trie.
///
/// Entries are kept in the order defined by the map's [`Collation`]: a
/// total order over the *comparison units* of a key, which may place
/// characters anywhere relative to their byte values. The collation is
/// fixed at construction and held for the map's whole lifetime; moving a
/// populated map to a different collation means building a new map and
/// reinserting every entry through a traversal.
///
/// Each node in the trie addresses its children by collation rank through
/// a contiguous slot array spanning exactly the ranks present at that
/// node. Insertion cost is bounded by key length plus, when a new child
/// falls outside a node's current window, the cost of widening that
/// window; lookups never allocate or mutate.
///
/// Collations whose decomposition is total ([`TotalCollation`], like the
/// default [`CodepointOrder`]) use the plain methods. Partial collations
/// such as [`CollationTable`][crate::CollationTable] use the `try_`
/// methods, which surface [`DecomposeError`] for keys the collation
/// cannot order.
///
/// # Examples
///
/// ```rust
/// use coltrie::TrieMap;
///
/// let mut map = TrieMap::new();
/// map.insert("pear", 2);
/// map.insert("apple", 1);
///
/// assert_eq!(map.get("apple"), Some(&1));
/// assert_eq!(map.len(), 2);
///
/// let keys: Vec<String> = map.keys().collect();
/// assert_eq!(keys, ["apple", "pear"]);
/// ```
pub struct TrieMap<V, C: Collation = CodepointOrder> {
    /// The number of entries present in the trie.
    pub(crate) num_entries: usize,
    /// The root node. It always exists and represents the empty key.
    pub(crate) root: TrieNode<V>,
    /// The comparator fixed at construction time.
    collation: C,
}

impl<V> TrieMap<V> {
    /// Create a new, empty [`TrieMap`] ordered by [`CodepointOrder`].
    ///
    /// This function will not pre-allocate anything beyond the root node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let map = TrieMap::<char>::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_collation(CodepointOrder)
    }
}

impl<V, C: Collation> TrieMap<V, C> {
    /// Create a new, empty [`TrieMap`] ordered by `collation`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::{CollationTable, TrieMap};
    ///
    /// let collation = CollationTable::from_graphemes("abcdèefghij");
    /// let map = TrieMap::<u32, _>::with_collation(collation);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_collation(collation: C) -> Self {
        TrieMap {
            num_entries: 0,
            root: TrieNode::new(""),
            collation,
        }
    }

    /// The collation this map was constructed with.
    pub fn collation(&self) -> &C {
        &self.collation
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert("a", 'a');
    /// map.insert("b", 'b');
    /// map.insert("a", 'z');
    ///
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.num_entries == 0
    }

    /// Removes every entry, releasing all nodes. The map stays usable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("a", 0);
    /// map.clear();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.get("a"), None);
    /// ```
    pub fn clear(&mut self) {
        deallocate_subtree(&mut self.root);
        self.root.value = None;
        self.num_entries = 0;
    }

    /// Inserts a key-value pair into the map, returning the value
    /// previously stored under `key` if there was one.
    ///
    /// The key is decomposed in full before the trie is touched, so an
    /// error leaves the map unmodified.
    ///
    /// # Errors
    ///  - If `key` contains a segment the collation cannot order, returns
    ///    a [`DecomposeError`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::{CollationTable, TrieMap};
    ///
    /// let collation = CollationTable::from_graphemes("abcdefghijklmnopqrstuvwxyz");
    /// let mut map = TrieMap::with_collation(collation);
    ///
    /// assert!(map.try_insert("cab", 1).unwrap().is_none());
    /// assert_eq!(map.try_insert("cab", 2).unwrap(), Some(1));
    /// // '!' is not in the alphabet, so the key cannot be ordered.
    /// assert!(map.try_insert("cab!", 3).is_err());
    ///
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: &str, value: V) -> Result<Option<V>, DecomposeError> {
        let units = self.collation.decompose(key)?;
        let previous = insert_in_subtree(&mut self.root, &units, value);
        if previous.is_none() {
            self.num_entries += 1;
        }
        Ok(previous)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///  - If `key` contains a segment the collation cannot order, returns
    ///    a [`DecomposeError`]. A key that fails to decompose can never
    ///    have been inserted, but the failure is reported rather than
    ///    folded into "absent".
    pub fn try_get(&self, key: &str) -> Result<Option<&V>, DecomposeError> {
        let units = self.collation.decompose(key)?;
        Ok(search_in_subtree(&self.root, &units).and_then(|node| node.value.as_ref()))
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///  - If `key` contains a segment the collation cannot order, returns
    ///    a [`DecomposeError`].
    pub fn try_get_mut(&mut self, key: &str) -> Result<Option<&mut V>, DecomposeError> {
        let units = self.collation.decompose(key)?;
        Ok(search_in_subtree_mut(&mut self.root, &units).and_then(|node| node.value.as_mut()))
    }

    /// Returns `true` if `key` has a value stored in the map.
    ///
    /// Presence is independent of what the value is: a key mapped to a
    /// "nothing" value (say, `None` when `V` is an `Option`) is still
    /// present.
    ///
    /// # Errors
    ///  - If `key` contains a segment the collation cannot order, returns
    ///    a [`DecomposeError`].
    pub fn try_contains_key(&self, key: &str) -> Result<bool, DecomposeError> {
        Ok(self.try_get(key)?.is_some())
    }

    /// Returns the entry with the smallest key under the map's collation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("pear", 2);
    /// map.insert("apple", 1);
    ///
    /// let (key, value) = map.first_key_value().unwrap();
    /// assert_eq!((key.as_str(), *value), ("apple", 1));
    /// ```
    pub fn first_key_value(&self) -> Option<(String, &V)> {
        minimum_in_subtree(&self.root)
    }

    /// Returns the entry with the largest key under the map's collation.
    pub fn last_key_value(&self) -> Option<(String, &V)> {
        maximum_in_subtree(&self.root)
    }

    /// Walks every entry in pre-order, which by construction of the
    /// sibling arrays is ascending collation order, invoking `visitor`
    /// with the reconstructed key and the value.
    ///
    /// Any `FnMut(&str, &V)` closure is a [`Visitor`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    /// map.insert("ab", 3);
    ///
    /// let mut seen = Vec::new();
    /// map.traverse_pre_order(&mut |key: &str, value: &i32| {
    ///     seen.push((key.to_owned(), *value));
    /// });
    ///
    /// let expected = [("a".to_owned(), 1), ("ab".to_owned(), 3), ("b".to_owned(), 2)];
    /// assert_eq!(seen, expected);
    /// ```
    pub fn traverse_pre_order<Vis: Visitor<V>>(&self, visitor: &mut Vis) {
        let mut walk = PreorderWalk::new(&self.root);
        while let Some(value) = walk.advance() {
            visitor.visit_entry(walk.key(), value);
        }
    }

    /// An iterator over the entries of the map, in ascending collation
    /// order. Keys are reconstructed from the trie path, so the iterator
    /// yields owned `String`s.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self)
    }

    /// An iterator over the entries with mutable value references, in
    /// ascending collation order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(self)
    }

    /// An iterator over the keys of the map, in ascending collation order.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys::new(self)
    }

    /// An iterator over the values of the map, ordered by their keys.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self)
    }

    /// An iterator over mutable value references, ordered by their keys.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self)
    }
}

impl<V, C: TotalCollation> TrieMap<V, C> {
    /// Inserts a key-value pair into the map, returning the value
    /// previously stored under `key` if there was one.
    ///
    /// Unlike [`try_insert`][TrieMap::try_insert], this function cannot
    /// return an error, because the [`TotalCollation`] contract ensures
    /// every key decomposes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    ///
    /// assert!(map.insert("abc", 'a').is_none());
    /// assert!(map.insert("abd", 'b').is_none());
    /// assert_eq!(map.insert("abd", 'c'), Some('b'));
    ///
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        // The `TotalCollation` contract makes decomposition infallible.
        self.try_insert(key, value)
            .expect("total collation failed to decompose a key")
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("abc", 'a');
    ///
    /// assert_eq!(map.get("abc"), Some(&'a'));
    /// assert_eq!(map.get("ab"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<&V> {
        self.try_get(key)
            .expect("total collation failed to decompose a key")
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("abc", 1);
    ///
    /// if let Some(value) = map.get_mut("abc") {
    ///     *value += 1;
    /// }
    /// assert_eq!(map.get("abc"), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.try_get_mut(key)
            .expect("total collation failed to decompose a key")
    }

    /// Returns `true` if `key` has a value stored in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use coltrie::TrieMap;
    ///
    /// let mut map = TrieMap::new();
    /// map.insert("abc", Some(1));
    /// map.insert("abd", None::<i32>);
    ///
    /// // Presence and "the value is nothing" are independent signals.
    /// assert!(map.contains_key("abd"));
    /// assert_eq!(map.get("abd"), Some(&None));
    /// assert!(!map.contains_key("ab"));
    /// ```
    pub fn contains_key(&self, key: &str) -> bool {
        self.try_contains_key(key)
            .expect("total collation failed to decompose a key")
    }
}

impl<V, C: Collation + Default> Default for TrieMap<V, C> {
    fn default() -> Self {
        Self::with_collation(C::default())
    }
}

impl<V, C: Collation> Drop for TrieMap<V, C> {
    fn drop(&mut self) {
        // The derived drop would recurse once per comparison unit of the
        // deepest key; drain the structure iteratively instead.
        deallocate_subtree(&mut self.root);
    }
}

impl<V: Clone, C: Collation + Clone> Clone for TrieMap<V, C> {
    fn clone(&self) -> Self {
        TrieMap {
            num_entries: self.num_entries,
            root: clone_subtree(&self.root),
            collation: self.collation.clone(),
        }
    }
}

impl<V: Debug, C: Collation> Debug for TrieMap<V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq, C: Collation> PartialEq for TrieMap<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<V: Eq, C: Collation> Eq for TrieMap<V, C> {}

impl<K: AsRef<str>, V, C: TotalCollation> Extend<(K, V)> for TrieMap<V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

impl<K: AsRef<str>, V, C: TotalCollation + Default> FromIterator<(K, V)> for TrieMap<V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_collation(C::default());
        map.extend(iter);
        map
    }
}

impl<'a, V, C: Collation> IntoIterator for &'a TrieMap<V, C> {
    type IntoIter = Iter<'a, V>;
    type Item = (String, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, C: Collation> IntoIterator for &'a mut TrieMap<V, C> {
    type IntoIter = IterMut<'a, V>;
    type Item = (String, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<V, C: Collation> IntoIterator for TrieMap<V, C> {
    type IntoIter = IntoIter<V>;
    type Item = (String, V);

    fn into_iter(mut self) -> Self::IntoIter {
        // Detach the trie so the map's `Drop` tears down only the stub.
        let root = mem::replace(&mut self.root, TrieNode::new(""));
        IntoIter::new(root, self.num_entries)
    }
}
