//! Resolves a fully-scanned object key against the set of field names a
//! shape declares.
//!
//! The lexical design note in spec calls for incremental, byte-by-byte
//! trie narrowing so a key can resolve without ever being fully
//! materialized. In practice object field counts are small (tens, not
//! thousands) and the key has to be buffered anyway to support suspension
//! mid-key, so this resolves the complete key against a flat table once
//! scanning finishes -- same externally observable behavior (unknown vs.
//! matched field, same suspension support via the string scanner it sits
//! on top of), simpler implementation.

extern crate alloc;

use alloc::vec::Vec;

/// Maps known field-name bytes to a field index.
#[derive(Debug, Clone)]
pub struct KeyMatch {
    entries: Vec<(Vec<u8>, usize)>,
}

impl KeyMatch {
    #[must_use]
    pub fn new(entries: Vec<(Vec<u8>, usize)>) -> Self {
        KeyMatch { entries }
    }

    /// Resolves `key` to a field index, or `None` if it matches no known
    /// field name (an unknown key, to be parsed-and-discarded).
    #[must_use]
    pub fn resolve(&self, key: &[u8]) -> Option<usize> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_slice() == key)
            .map(|(_, idx)| *idx)
    }
}
