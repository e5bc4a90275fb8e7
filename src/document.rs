//! Document value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of an indexed document. Non-negative for live documents.
pub type DocumentId = i32;

/// Lifecycle status attached to a document at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Current document, matched by the default search filter.
    Actual,
    /// Outdated document.
    Irrelevant,
    /// Banned document.
    Banned,
    /// Document scheduled for removal.
    Removed,
}

/// A ranked search result.
///
/// Produced by [`SearchServer::find_top_documents`](crate::SearchServer::find_top_documents)
/// and friends; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Id of the matched document.
    pub id: DocumentId,
    /// TF-IDF relevance against the query's plus words.
    pub relevance: f64,
    /// Average rating recorded at ingestion time.
    pub rating: i32,
}

impl Document {
    /// Create a result record.
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Document { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Per-document metadata stored by the index.
///
/// Created on add, destroyed on remove; never mutated in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Truncating integer average of the ingestion-time ratings.
    pub rating: i32,
    /// Status supplied at ingestion time.
    pub status: DocumentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_display() {
        let document = Document::new(1, 0.5, 5);
        assert_eq!(
            document.to_string(),
            "{ document_id = 1, relevance = 0.5, rating = 5 }"
        );
    }
}
