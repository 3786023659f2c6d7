use std::{collections::HashMap, error::Error, fmt};
use unicode_segmentation::UnicodeSegmentation;

/// One comparison unit of a key: the smallest key segment the active
/// collation orders as a whole.
///
/// A unit covers a non-empty substring of the key (a single character for
/// [`CodepointOrder`], possibly several characters for a digraph in a
/// [`CollationTable`]) and carries the unit's *rank*, its integer position
/// in the collation's total order. Ranks are what the trie uses to address
/// sibling slots, so within one collation distinct units must have distinct
/// ranks and rank order must be the collation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'k> {
    /// The substring of the key this unit covers.
    pub text: &'k str,
    /// The unit's position in the collation's total order.
    pub rank: u32,
}

/// A total order over the comparison units of keys, used by
/// [`TrieMap`][crate::TrieMap] in place of raw byte order.
///
/// The collation is fixed when the map is created and held for the map's
/// whole lifetime. Re-collating an existing map means building a new map
/// under the new collation and reinserting every entry through a traversal.
pub trait Collation {
    /// Split `key` into its ordered sequence of comparison units.
    ///
    /// The returned units must be consecutive, non-empty substrings that
    /// cover the whole key, and decomposition must be deterministic: the
    /// same key always decomposes to the same units.
    ///
    /// # Errors
    ///  - Returns a [`DecomposeError`] if the key contains a segment this
    ///    collation cannot order.
    fn decompose<'k>(&self, key: &'k str) -> Result<Vec<Unit<'k>>, DecomposeError>;
}

/// Marker for collations whose [`decompose`][Collation::decompose] is total
/// over all strings and therefore never fails.
///
/// Implementing this trait unlocks the plain (non-`try_`) methods on
/// [`TrieMap`][crate::TrieMap], the same way an infallible key contract
/// unlocks infallible map methods elsewhere. Implementations must uphold
/// the contract: `decompose` must return `Ok` for every `&str`.
pub trait TotalCollation: Collation {}

impl<C: Collation + ?Sized> Collation for &C {
    fn decompose<'k>(&self, key: &'k str) -> Result<Vec<Unit<'k>>, DecomposeError> {
        (**self).decompose(key)
    }
}

impl<C: TotalCollation + ?Sized> TotalCollation for &C {}

/// The error type produced when a key contains a segment the active
/// collation cannot order.
///
/// Decomposition runs to completion before any trie mutation, so an
/// operation that returns this error has not modified the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposeError {
    /// The key that failed to decompose.
    pub key: Box<str>,
    /// Byte offset into the key of the first segment that could not be
    /// ordered.
    pub byte_index: usize,
}

impl fmt::Display for DecomposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key {:?} contains a segment at byte offset {} that the active collation cannot \
             order.",
            self.key, self.byte_index
        )
    }
}

impl Error for DecomposeError {}

/// The identity collation: every [`char`] is one comparison unit and its
/// rank is its Unicode scalar value.
///
/// For well-formed UTF-8 this coincides with byte order, so it plays the
/// role of the untranslated "C" ordering. Decomposition never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodepointOrder;

impl Collation for CodepointOrder {
    fn decompose<'k>(&self, key: &'k str) -> Result<Vec<Unit<'k>>, DecomposeError> {
        Ok(key
            .char_indices()
            .map(|(start, ch)| Unit {
                text: &key[start..start + ch.len_utf8()],
                rank: ch as u32,
            })
            .collect())
    }
}

impl TotalCollation for CodepointOrder {}

/// A collation over a finite, explicitly ordered alphabet of units.
///
/// The rank of a unit is its position in the alphabet, so the traversal
/// order of a [`TrieMap`][crate::TrieMap] built over this collation is
/// exactly the alphabet order. Units may span several characters, which
/// admits both accented letters placed anywhere in the order (`"è"` between
/// `"d"` and `"e"`) and digraphs collated as single letters (`"ch"` in
/// traditional Spanish).
///
/// Keys are segmented into grapheme clusters and matched greedily against
/// the longest alphabet unit at each position. A key containing a cluster
/// sequence that is not in the alphabet fails to decompose, so this
/// collation is partial: use the `try_` methods of
/// [`TrieMap`][crate::TrieMap] with it.
///
/// # Examples
///
/// ```rust
/// use coltrie::{Collation, CollationTable};
///
/// let collation = CollationTable::from_units(["a", "b", "ch", "c"]);
/// let units = collation.decompose("cha").unwrap();
///
/// let texts: Vec<&str> = units.iter().map(|u| u.text).collect();
/// assert_eq!(texts, ["ch", "a"]);
///
/// assert!(collation.decompose("x").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollationTable {
    ranks: HashMap<Box<str>, u32>,
    /// Longest alphabet unit, measured in grapheme clusters.
    max_unit_clusters: usize,
}

impl CollationTable {
    /// Build a table from units in ascending collation order.
    ///
    /// If a unit occurs more than once, the first occurrence fixes its rank
    /// and later duplicates are ignored. Empty units are ignored.
    pub fn from_units<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranks = HashMap::new();
        let mut max_unit_clusters = 0;
        let mut rank = 0u32;

        for unit in units {
            let unit = unit.as_ref();
            if unit.is_empty() {
                continue;
            }

            let clusters = unit.graphemes(true).count();
            ranks.entry(Box::from(unit)).or_insert_with(|| {
                max_unit_clusters = max_unit_clusters.max(clusters);
                let unit_rank = rank;
                rank += 1;
                unit_rank
            });
        }

        CollationTable {
            ranks,
            max_unit_clusters,
        }
    }

    /// Build a table whose units are the grapheme clusters of `alphabet`,
    /// in the order they appear.
    ///
    /// Segmenting by cluster rather than by `char` keeps combining
    /// sequences (an accent written as base character plus combining mark)
    /// together as single units.
    pub fn from_graphemes(alphabet: &str) -> Self {
        Self::from_units(alphabet.graphemes(true))
    }

    /// The number of units in the alphabet.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if the alphabet has no units.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Look up the rank of a single unit, if it is in the alphabet.
    pub fn rank_of(&self, unit: &str) -> Option<u32> {
        self.ranks.get(unit).copied()
    }
}

impl Collation for CollationTable {
    fn decompose<'k>(&self, key: &'k str) -> Result<Vec<Unit<'k>>, DecomposeError> {
        let clusters: Vec<(usize, &str)> = key.grapheme_indices(true).collect();
        let mut units = Vec::with_capacity(clusters.len());
        let mut pos = 0;

        while pos < clusters.len() {
            let start = clusters[pos].0;
            let mut matched = None;

            // Greedy longest match over whole clusters, so a digraph unit
            // wins over its leading single-cluster unit.
            let longest = self.max_unit_clusters.min(clusters.len() - pos);
            for len in (1..=longest).rev() {
                let end = match clusters.get(pos + len) {
                    Some(&(end, _)) => end,
                    None => key.len(),
                };
                let candidate = &key[start..end];
                if let Some(rank) = self.rank_of(candidate) {
                    matched = Some((candidate, rank, len));
                    break;
                }
            }

            match matched {
                Some((text, rank, len)) => {
                    units.push(Unit { text, rank });
                    pos += len;
                },
                None => {
                    return Err(DecomposeError {
                        key: Box::from(key),
                        byte_index: start,
                    })
                },
            }
        }

        Ok(units)
    }
}
