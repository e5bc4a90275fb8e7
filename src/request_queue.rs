//! Request history tracking.
//!
//! Wraps a server's search calls and keeps a sliding window of the most
//! recent requests, counting how many returned no results. The window holds
//! one entry per minute of a day.

use std::collections::VecDeque;

use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::Result;
use crate::execution::ExecutionPolicy;
use crate::server::SearchServer;

const REQUEST_WINDOW: usize = 1440;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    is_empty: bool,
}

/// Sliding-window tracker of empty search results.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_count: usize,
}

impl<'a> RequestQueue<'a> {
    /// Create a tracker over the given server.
    pub fn new(server: &'a SearchServer) -> Self {
        RequestQueue {
            server,
            requests: VecDeque::new(),
            no_result_count: 0,
        }
    }

    /// Search with the default `Actual` filter and record the outcome.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_filtered(raw_query, |_, status, _| {
            status == DocumentStatus::Actual
        })
    }

    /// Search with a status filter and record the outcome.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request_filtered(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Search with an arbitrary predicate and record the outcome.
    ///
    /// A failed search records nothing; the window only tracks completed
    /// requests.
    pub fn add_find_request_filtered<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let results =
            self.server
                .find_top_documents_with(ExecutionPolicy::Sequential, raw_query, predicate)?;
        self.record(results.is_empty());
        Ok(results)
    }

    /// Number of requests in the current window that returned no results.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_count
    }

    fn record(&mut self, is_empty: bool) {
        if is_empty {
            self.no_result_count += 1;
        }
        if self.requests.len() >= REQUEST_WINDOW {
            if let Some(oldest) = self.requests.pop_front() {
                if oldest.is_empty {
                    self.no_result_count -= 1;
                }
            }
        }
        self.requests.push_back(QueryResult { is_empty });
    }
}
