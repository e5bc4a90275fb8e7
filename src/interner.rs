//! Append-only word interner.
//!
//! Every distinct word ever indexed is stored once; the index mappings hold
//! cheap `Arc<str>` handles into this store instead of duplicating strings.
//! The store never shrinks, so handles stay valid across document removal.

use std::sync::Arc;

use ahash::AHashSet;

/// Canonical storage for indexed words.
#[derive(Debug, Default)]
pub struct WordInterner {
    words: AHashSet<Arc<str>>,
}

impl WordInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        WordInterner::default()
    }

    /// Intern a word, returning a stable shared handle.
    ///
    /// Repeated calls with the same word return handles to the same
    /// allocation.
    pub fn intern(&mut self, word: &str) -> Arc<str> {
        if let Some(existing) = self.words.get(word) {
            return Arc::clone(existing);
        }
        let handle: Arc<str> = Arc::from(word);
        self.words.insert(Arc::clone(&handle));
        handle
    }

    /// Number of distinct words interned so far.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no word has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
