//! Batch query driver.
//!
//! Pure orchestration over [`SearchServer::find_top_documents`]: queries fan
//! out across the rayon pool, which is safe because each call is read-only.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::server::SearchServer;

/// Run every query against the server, returning one result list per query,
/// in query order.
pub fn process_queries(
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<Vec<Document>>> {
    queries
        .par_iter()
        .map(|raw_query| server.find_top_documents(raw_query))
        .collect()
}

/// Run every query against the server and concatenate the result lists in
/// query order.
pub fn process_queries_joined(
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<Document>> {
    Ok(process_queries(server, queries)?
        .into_iter()
        .flatten()
        .collect())
}
