//! # Tansy
//!
//! An embeddable in-memory full-text search library for Rust.
//!
//! ## Features
//!
//! - Inverted index with mirrored forward mapping and a word interner
//! - TF-IDF relevance ranking with deterministic tie-breaking
//! - Plus/minus query words and stop-word filtering
//! - Sequential and rayon-parallel execution selectable per call
//! - Lock-striped concurrent accumulators for parallel scoring
//!
//! ## Example
//!
//! ```
//! use tansy::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::new(["and"])?;
//! server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
//! server.add_document(2, "fluffy dog and trendy collar", DocumentStatus::Actual, &[1, 2, 3])?;
//!
//! // Document 2 is excluded by the minus word.
//! let results = server.find_top_documents("fluffy -dog")?;
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].id, 1);
//! assert_eq!(results[0].rating, 5);
//! # Ok::<(), tansy::TansyError>(())
//! ```

// Core modules
pub mod analysis;
mod batch;
pub mod concurrent;
mod dedup;
mod document;
mod error;
mod execution;
mod interner;
mod query;
mod request_queue;
mod server;

// Re-exports for the public API
pub use batch::{process_queries, process_queries_joined};
pub use concurrent::{ConcurrentMap, ConcurrentSet, DEFAULT_SHARD_COUNT, ShardKey};
pub use dedup::remove_duplicates;
pub use document::{Document, DocumentId, DocumentRecord, DocumentStatus};
pub use error::{Result, TansyError};
pub use execution::ExecutionPolicy;
pub use interner::WordInterner;
pub use query::{Query, QueryWord};
pub use request_queue::RequestQueue;
pub use server::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON, SearchServer};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
