//! Exact-duplicate document removal.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashSet;

use crate::document::DocumentId;
use crate::error::Result;
use crate::server::SearchServer;

/// Remove every document whose word set exactly matches an earlier
/// document's word set.
///
/// Documents are scanned in ascending id order, so the earliest id with a
/// given word set always survives. Order and frequency of words within a
/// document are ignored. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Result<Vec<DocumentId>> {
    let mut seen_word_sets: AHashSet<BTreeSet<Arc<str>>> = AHashSet::new();
    let mut duplicate_ids = Vec::new();

    let document_ids: Vec<DocumentId> = server.document_ids().collect();
    for document_id in document_ids {
        let word_set: BTreeSet<Arc<str>> = server
            .get_word_frequencies(document_id)
            .keys()
            .cloned()
            .collect();
        if !seen_word_sets.insert(word_set) {
            duplicate_ids.push(document_id);
        }
    }

    for &document_id in &duplicate_ids {
        log::info!("Found duplicate document id {document_id}");
        server.remove_document(document_id)?;
    }
    Ok(duplicate_ids)
}
