use std::thread;

use tansy::{
    ConcurrentMap, ConcurrentSet, DocumentStatus, ExecutionPolicy, SearchServer, TansyError,
};

fn mixed_corpus() -> tansy::Result<SearchServer> {
    let mut server = SearchServer::new(["and", "in", "on"])?;
    server.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(3, "big dog starling eugene", DocumentStatus::Actual, &[1, 3, 2])?;
    server.add_document(4, "big dog starling vasily", DocumentStatus::Banned, &[1, 1, 1])?;
    server.add_document(5, "big cat trendy collar", DocumentStatus::Actual, &[1, 2, 8])?;
    Ok(server)
}

/// Sequential and parallel ranking must agree on ids and ordering; relevances
/// may differ only by float summation order.
fn assert_same_results(server: &SearchServer, raw_query: &str) {
    let sequential = server
        .find_top_documents_with(ExecutionPolicy::Sequential, raw_query, |_, status, _| {
            status == DocumentStatus::Actual
        })
        .unwrap();
    let parallel = server
        .find_top_documents_with(ExecutionPolicy::Parallel, raw_query, |_, status, _| {
            status == DocumentStatus::Actual
        })
        .unwrap();

    let sequential_ids: Vec<_> = sequential.iter().map(|document| document.id).collect();
    let parallel_ids: Vec<_> = parallel.iter().map(|document| document.id).collect();
    assert_eq!(sequential_ids, parallel_ids, "query {raw_query:?}");
    for (lhs, rhs) in sequential.iter().zip(&parallel) {
        assert!((lhs.relevance - rhs.relevance).abs() < 1e-9, "query {raw_query:?}");
        assert_eq!(lhs.rating, rhs.rating);
    }
}

#[test]
fn test_parallel_search_matches_sequential() -> tansy::Result<()> {
    let server = mixed_corpus()?;
    for raw_query in [
        "fluffy groomed cat",
        "big -cat",
        "big dog starling -vasily",
        "cat cat cat and dog",
        "absent words only",
        "",
    ] {
        assert_same_results(&server, raw_query);
    }
    Ok(())
}

#[test]
fn test_parallel_parse_rejects_what_sequential_rejects() -> tansy::Result<()> {
    let server = mixed_corpus()?;
    for raw_query in ["cat -", "cat --dog", "- cat", "ca\u{2}t"] {
        let sequential = server
            .find_top_documents_with(ExecutionPolicy::Sequential, raw_query, |_, _, _| true)
            .unwrap_err();
        let parallel = server
            .find_top_documents_with(ExecutionPolicy::Parallel, raw_query, |_, _, _| true)
            .unwrap_err();
        assert_eq!(
            std::mem::discriminant(&sequential),
            std::mem::discriminant(&parallel),
            "query {raw_query:?}"
        );
    }
    Ok(())
}

#[test]
fn test_parallel_match_document() -> tansy::Result<()> {
    let server = mixed_corpus()?;

    let (sequential, _) = server.match_document("big starling cat", 3)?;
    let (parallel, _) =
        server.match_document_with(ExecutionPolicy::Parallel, "big starling cat", 3)?;
    assert_eq!(sequential, parallel);
    assert_eq!(sequential.len(), 2);

    let (words, status) =
        server.match_document_with(ExecutionPolicy::Parallel, "big -starling", 3)?;
    assert!(words.is_empty());
    assert_eq!(status, DocumentStatus::Actual);
    Ok(())
}

#[test]
fn test_parallel_remove_document() -> tansy::Result<()> {
    let mut server = mixed_corpus()?;
    server.remove_document_with(ExecutionPolicy::Parallel, 1)?;

    assert_eq!(server.document_count(), 5);
    assert!(server.get_word_frequencies(1).is_empty());
    assert!(server.find_top_documents("fluffy")?.is_empty());
    // Shared words still find the survivors.
    let ids: Vec<_> = server
        .find_top_documents("cat")?
        .iter()
        .map(|document| document.id)
        .collect();
    assert!(ids.contains(&0) && ids.contains(&5));

    let err = server
        .remove_document_with(ExecutionPolicy::Parallel, 1)
        .unwrap_err();
    assert!(matches!(err, TansyError::InvalidDocumentId(_)));
    Ok(())
}

#[test]
fn test_concurrent_map_has_no_lost_updates() {
    let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(16);
    let threads = 8;
    let increments = 1000;

    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| {
                for key in 0..increments {
                    *map.access(key % 40) += 1.0;
                }
            });
        }
    });

    let ordinary = map.build_ordinary_map();
    assert_eq!(ordinary.len(), 40);
    let total: f64 = ordinary.values().sum();
    assert_eq!(total, (threads * increments) as f64);
    // increments spread evenly over 40 keys
    assert!(ordinary.values().all(|&count| count == (threads * increments / 40) as f64));
}

#[test]
fn test_concurrent_set_under_contention() {
    let set: ConcurrentSet<&str> = ConcurrentSet::new(16);
    let words = ["big", "cat", "dog", "starling", "trendy", "collar"];

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for word in words {
                    set.insert(word);
                }
            });
        }
    });

    let ordinary = set.build_ordinary_set();
    assert_eq!(ordinary.len(), words.len());
    for word in words {
        assert!(ordinary.contains(word));
    }
}

#[test]
fn test_minus_phase_never_resurrects_documents() -> tansy::Result<()> {
    let mut server = SearchServer::default();
    // One document matching many plus words and one minus word: no
    // scheduling of the plus contributions may let it survive.
    server.add_document(
        1,
        "a1 a2 a3 a4 a5 a6 a7 a8 a9 a10 a11 a12 a13 a14 a15 bad",
        DocumentStatus::Actual,
        &[1],
    )?;
    let raw_query = "a1 a2 a3 a4 a5 a6 a7 a8 a9 a10 a11 a12 a13 a14 a15 -bad";
    for _ in 0..50 {
        let results = server.find_top_documents_with(
            ExecutionPolicy::Parallel,
            raw_query,
            |_, _, _| true,
        )?;
        assert!(results.is_empty());
    }
    Ok(())
}
