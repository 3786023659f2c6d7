//! Module containing implementations of the `TrieMap` and associated
//! iterators/etc.

pub mod map;

pub use map::*;
