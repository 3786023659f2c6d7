#![deny(
    // missing_docs,
    deprecated_in_future,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    rustdoc::invalid_codeblock_attributes
)]
#![doc(
    html_playground_url = "https://play.rust-lang.org/",
    test(attr(deny(warnings)))
)]

//! Collation trie implementation
//!
//! A [`TrieMap`] keeps string keys in the order defined by a [`Collation`],
//! a total order over the comparison units of a key, instead of raw byte
//! order. Each node addresses its children through a contiguous slot array
//! windowed over the collation ranks actually present at that node, so the
//! per-node cost tracks the children that exist rather than the whole
//! alphabet.

mod collation;
mod collections;
mod nodes;

pub use collation::*;
pub use collections::*;
pub use nodes::{visitor, *};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
