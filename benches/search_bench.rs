use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use tansy::{DocumentStatus, ExecutionPolicy, SearchServer};

const WORDS: &[&str] = &[
    "big", "cat", "dog", "fluffy", "trendy", "collar", "tail", "starling", "white", "groomed",
    "expressive", "eyes", "fashionable", "eugene", "vasily", "bird",
];

fn build_server(document_count: i32) -> SearchServer {
    let mut server = SearchServer::new(["and", "in", "on"]).unwrap();
    for id in 0..document_count {
        // Deterministic pseudo-random eight-word documents.
        let text: Vec<&str> = (0..8)
            .map(|slot| WORDS[(id as usize * 31 + slot * 7) % WORDS.len()])
            .collect();
        server
            .add_document(id, &text.join(" "), DocumentStatus::Actual, &[id % 10])
            .unwrap();
    }
    server
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = build_server(10_000);
    let raw_query = "fluffy cat trendy -starling";

    c.bench_function("find_top_documents_sequential", |b| {
        b.iter(|| {
            server
                .find_top_documents(black_box(raw_query))
                .unwrap()
        })
    });

    c.bench_function("find_top_documents_parallel", |b| {
        b.iter(|| {
            server
                .find_top_documents_with(ExecutionPolicy::Parallel, black_box(raw_query), |_, status, _| {
                    status == DocumentStatus::Actual
                })
                .unwrap()
        })
    });
}

fn bench_add_document(c: &mut Criterion) {
    c.bench_function("index_1000_documents", |b| {
        b.iter(|| build_server(black_box(1000)))
    });
}

criterion_group!(benches, bench_find_top_documents, bench_add_document);
criterion_main!(benches);
