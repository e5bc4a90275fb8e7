//! Parsed query representation.
//!
//! Query words borrow from the raw query text; a [`Query`] is call-scoped
//! and never outlives the text it was parsed from.

use ahash::AHashSet;

/// A single query word after minus-stripping and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWord<'a> {
    /// The word with any leading `-` removed.
    pub data: &'a str,
    /// Whether the word carried a leading `-`.
    pub is_minus: bool,
    /// Whether the stripped word is a stop word.
    pub is_stop: bool,
}

/// A structured query: words required to be present and words required to
/// be absent. Stop words appear in neither set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    /// Words a matching document must contain.
    pub plus_words: AHashSet<&'a str>,
    /// Words disqualifying any document containing them.
    pub minus_words: AHashSet<&'a str>,
}
