//! The search server: inverted index, document lifecycle, and TF-IDF ranking.
//!
//! A [`SearchServer`] owns the word interner and two mirrored mappings: word
//! to per-document term frequency, and document to per-word term frequency.
//! The mirror exists so removal can find exactly the inverted entries a
//! document owns, without scanning the whole index. Both mappings are only
//! ever mutated through one internal path, which keeps them consistent.
//!
//! Mutations (`add_document`, `remove_document`) must be serialized by the
//! caller. Queries are read-only and safe to run alongside each other; the
//! per-query relevance accumulator is call-scoped and never shared across
//! queries.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use lazy_static::lazy_static;
use rayon::prelude::*;

use crate::analysis::{is_correct_query_syntax, is_valid_word, split_words, split_words_view};
use crate::concurrent::{ConcurrentMap, ConcurrentSet, DEFAULT_SHARD_COUNT};
use crate::document::{Document, DocumentId, DocumentRecord, DocumentStatus};
use crate::error::{Result, TansyError};
use crate::execution::ExecutionPolicy;
use crate::interner::WordInterner;
use crate::query::{Query, QueryWord};

/// Maximum number of documents returned by a single search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance deltas below this threshold are ties, broken by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

lazy_static! {
    static ref EMPTY_WORD_FREQS: AHashMap<Arc<str>, f64> = AHashMap::new();
}

type WordFreqs = AHashMap<Arc<str>, f64>;
type Postings = AHashMap<DocumentId, f64>;

/// An in-memory full-text index with TF-IDF ranking.
#[derive(Debug, Default)]
pub struct SearchServer {
    /// Live document ids; defines ascending enumeration order and is the
    /// source of truth for liveness.
    doc_ids: BTreeSet<DocumentId>,

    /// Words excluded from indexing and querying. Immutable after
    /// construction.
    stop_words: AHashSet<String>,

    /// Canonical storage for every distinct indexed word.
    interner: WordInterner,

    /// Inverted mapping: word -> (document id -> term frequency).
    word_to_document_freqs: AHashMap<Arc<str>, Postings>,

    /// Forward mapping: document id -> (word -> term frequency).
    document_to_word_freqs: AHashMap<DocumentId, WordFreqs>,

    /// Per-document rating and status.
    documents: AHashMap<DocumentId, DocumentRecord>,
}

impl SearchServer {
    /// Create a server with the given stop words.
    ///
    /// Empty stop words are ignored; duplicate stop words collapse. Fails
    /// if any stop word contains control characters.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut server = SearchServer::default();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(TansyError::invalid_text(format!(
                    "stop word {word:?} contains control characters"
                )));
            }
            server.stop_words.insert(word.to_string());
        }
        Ok(server)
    }

    /// Create a server from a space-separated stop word text.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        SearchServer::new(split_words_view(text))
    }

    /// Index a document.
    ///
    /// The id must be non-negative and not currently live; the text must be
    /// free of control characters. Validation happens before any state is
    /// touched, so a failed call leaves the index unchanged. The rating is
    /// the truncating integer average of `ratings` (0 if empty).
    pub fn add_document(
        &mut self,
        document_id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(TansyError::invalid_document_id(format!(
                "document id {document_id} is negative"
            )));
        }
        if self.documents.contains_key(&document_id) {
            return Err(TansyError::invalid_document_id(format!(
                "document id {document_id} already exists"
            )));
        }
        let words = self.split_into_words_no_stop(text)?;

        let inverse_word_count = 1.0 / words.len() as f64;
        for word in &words {
            let handle = self.interner.intern(word);
            self.bump_word_frequency(document_id, handle, inverse_word_count);
        }
        self.documents.insert(
            document_id,
            DocumentRecord {
                rating: compute_average_rating(ratings),
                status,
            },
        );
        self.doc_ids.insert(document_id);
        log::debug!("indexed document {document_id} with {} words", words.len());
        Ok(())
    }

    /// Remove a live document. Fails if the id is not live.
    pub fn remove_document(&mut self, document_id: DocumentId) -> Result<()> {
        self.remove_document_with(ExecutionPolicy::Sequential, document_id)
    }

    /// Remove a live document, optionally cleaning up its inverted-mapping
    /// entries across the rayon pool.
    ///
    /// Posting maps emptied by the removal stay in the inverted mapping;
    /// the interned words themselves are never freed.
    pub fn remove_document_with(
        &mut self,
        policy: ExecutionPolicy,
        document_id: DocumentId,
    ) -> Result<()> {
        if !self.doc_ids.remove(&document_id) {
            return Err(TansyError::invalid_document_id(format!(
                "document id {document_id} does not exist"
            )));
        }
        self.documents.remove(&document_id);
        let word_freqs = self.document_to_word_freqs.remove(&document_id).unwrap_or_default();

        match policy {
            ExecutionPolicy::Sequential => {
                for word in word_freqs.keys() {
                    if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                        postings.remove(&document_id);
                    }
                }
            }
            ExecutionPolicy::Parallel => {
                // Each worker gets a disjoint posting map, so the cleanup
                // needs no extra synchronization.
                self.word_to_document_freqs
                    .par_iter_mut()
                    .for_each(|(word, postings)| {
                        if word_freqs.contains_key(word) {
                            postings.remove(&document_id);
                        }
                    });
            }
        }
        log::debug!("removed document {document_id}");
        Ok(())
    }

    /// Top documents for a query, sequentially, keeping only `Actual` ones.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(
            ExecutionPolicy::Sequential,
            raw_query,
            |_, status, _| status == DocumentStatus::Actual,
        )
    }

    /// Top documents for a query, sequentially, keeping only the given
    /// status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(
            ExecutionPolicy::Sequential,
            raw_query,
            move |_, document_status, _| document_status == status,
        )
    }

    /// Top documents for a query under an arbitrary predicate.
    ///
    /// Results are sorted by descending relevance; relevances within
    /// [`RELEVANCE_EPSILON`] of each other tie-break by descending rating.
    /// At most [`MAX_RESULT_DOCUMENT_COUNT`] results are returned.
    pub fn find_top_documents_with<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = self.parse_query(policy, raw_query)?;
        let mut matched = self.find_all_documents(policy, &query, predicate);

        let compare = |lhs: &Document, rhs: &Document| {
            if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
                rhs.rating.cmp(&lhs.rating)
            } else {
                rhs.relevance
                    .partial_cmp(&lhs.relevance)
                    .unwrap_or(Ordering::Equal)
            }
        };
        match policy {
            ExecutionPolicy::Sequential => matched.sort_by(compare),
            ExecutionPolicy::Parallel => matched.par_sort_by(compare),
        }
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    /// Plus words of the query contained by the given document, and the
    /// document's status.
    ///
    /// If the document contains any minus word, the matched list is empty
    /// (the document is disqualified, not an error). Fails if the id is not
    /// live. The returned words are sorted.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<Arc<str>>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    /// [`match_document`](Self::match_document) with an explicit execution
    /// policy for query parsing and plus-word probing.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: DocumentId,
    ) -> Result<(Vec<Arc<str>>, DocumentStatus)> {
        let record = self.documents.get(&document_id).ok_or_else(|| {
            TansyError::invalid_document_id(format!("document id {document_id} does not exist"))
        })?;
        let query = self.parse_query(policy, raw_query)?;

        let word_matches = |&word: &&str| -> Option<Arc<str>> {
            let (interned, postings) = self.word_to_document_freqs.get_key_value(word)?;
            postings
                .contains_key(&document_id)
                .then(|| Arc::clone(interned))
        };
        let mut matched_words: Vec<Arc<str>> = match policy {
            ExecutionPolicy::Sequential => {
                query.plus_words.iter().filter_map(word_matches).collect()
            }
            ExecutionPolicy::Parallel => {
                query.plus_words.par_iter().filter_map(word_matches).collect()
            }
        };

        let disqualified = query.minus_words.iter().any(|&word| {
            self.word_to_document_freqs
                .get(word)
                .is_some_and(|postings| postings.contains_key(&document_id))
        });
        if disqualified {
            matched_words.clear();
        }

        matched_words.sort_unstable();
        Ok((matched_words, record.status))
    }

    /// Term frequencies of a document's words; empty if the id is not live.
    pub fn get_word_frequencies(&self, document_id: DocumentId) -> &AHashMap<Arc<str>, f64> {
        self.document_to_word_freqs
            .get(&document_id)
            .unwrap_or(&EMPTY_WORD_FREQS)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.doc_ids.iter().copied()
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    fn split_into_words_no_stop(&self, text: &str) -> Result<Vec<String>> {
        if !is_valid_word(text) {
            return Err(TansyError::invalid_text(
                "document text contains control characters".to_string(),
            ));
        }
        Ok(split_words(text)
            .into_iter()
            .filter(|word| !self.is_stop_word(word))
            .collect())
    }

    /// The one mutation path touching both mappings, so word `w` maps to
    /// document `d` with frequency `f` iff document `d` maps to word `w`
    /// with frequency `f`.
    fn bump_word_frequency(&mut self, document_id: DocumentId, word: Arc<str>, delta: f64) {
        *self
            .document_to_word_freqs
            .entry(document_id)
            .or_default()
            .entry(Arc::clone(&word))
            .or_insert(0.0) += delta;
        *self
            .word_to_document_freqs
            .entry(word)
            .or_default()
            .entry(document_id)
            .or_insert(0.0) += delta;
    }

    fn parse_query_word<'a>(&self, word: &'a str) -> Result<QueryWord<'a>> {
        if !is_valid_word(word) {
            return Err(TansyError::invalid_text(format!(
                "query word {word:?} contains control characters"
            )));
        }
        let (data, is_minus) = match word.strip_prefix('-') {
            Some(stripped) => (stripped, true),
            None => (word, false),
        };
        if data.is_empty() {
            return Err(TansyError::empty_word(format!(
                "query word {word:?} is empty after minus-stripping"
            )));
        }
        Ok(QueryWord {
            data,
            is_minus,
            is_stop: self.is_stop_word(data),
        })
    }

    fn parse_query<'a>(&self, policy: ExecutionPolicy, text: &'a str) -> Result<Query<'a>> {
        if !is_correct_query_syntax(text) {
            return Err(TansyError::invalid_query_syntax(format!(
                "minus signs are malformed in {text:?}"
            )));
        }
        let words = split_words_view(text);

        match policy {
            ExecutionPolicy::Sequential => {
                let mut query = Query::default();
                for word in words {
                    let query_word = self.parse_query_word(word)?;
                    if query_word.is_stop {
                        continue;
                    }
                    if query_word.is_minus {
                        query.minus_words.insert(query_word.data);
                    } else {
                        query.plus_words.insert(query_word.data);
                    }
                }
                Ok(query)
            }
            ExecutionPolicy::Parallel => {
                // Plus/minus classification is a pure function of each word,
                // so worker scheduling cannot change the resulting sets.
                let plus_words = ConcurrentSet::new(DEFAULT_SHARD_COUNT);
                let minus_words = ConcurrentSet::new(DEFAULT_SHARD_COUNT);
                words.par_iter().try_for_each(|&word| -> Result<()> {
                    let query_word = self.parse_query_word(word)?;
                    if !query_word.is_stop {
                        if query_word.is_minus {
                            minus_words.insert(query_word.data);
                        } else {
                            plus_words.insert(query_word.data);
                        }
                    }
                    Ok(())
                })?;
                Ok(Query {
                    plus_words: plus_words.build_ordinary_set(),
                    minus_words: minus_words.build_ordinary_set(),
                })
            }
        }
    }

    fn inverse_document_frequency(&self, postings: &Postings) -> f64 {
        (self.document_count() as f64 / postings.len() as f64).ln()
    }

    fn find_all_documents<P>(
        &self,
        policy: ExecutionPolicy,
        query: &Query<'_>,
        predicate: P,
    ) -> Vec<Document>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let accumulator: ConcurrentMap<DocumentId, f64> = ConcurrentMap::new(DEFAULT_SHARD_COUNT);

        let score_word = |&word: &&str| {
            if let Some(postings) = self.word_to_document_freqs.get(word) {
                if postings.is_empty() {
                    return;
                }
                let idf = self.inverse_document_frequency(postings);
                for (&document_id, &term_frequency) in postings.iter() {
                    *accumulator.access(document_id) += term_frequency * idf;
                }
            }
        };
        match policy {
            ExecutionPolicy::Sequential => query.plus_words.iter().for_each(&score_word),
            ExecutionPolicy::Parallel => query.plus_words.par_iter().for_each(&score_word),
        }

        // The iterators above only return once every plus contribution is
        // applied; minus removal must not start earlier, or a late plus
        // write could resurrect an excluded document.
        for &word in query.minus_words.iter() {
            if let Some(postings) = self.word_to_document_freqs.get(word) {
                for document_id in postings.keys() {
                    accumulator.erase(document_id);
                }
            }
        }

        let mut matched = Vec::new();
        for (document_id, relevance) in accumulator.build_ordinary_map() {
            let Some(record) = self.documents.get(&document_id) else {
                continue;
            };
            if predicate(document_id, record.status, record.rating) {
                matched.push(Document::new(document_id, relevance, record.rating));
            }
        }
        matched
    }
}

fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i32 = ratings.iter().sum();
    sum / ratings.len() as i32
}
