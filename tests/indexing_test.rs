use std::fs;
use std::path::PathBuf;

use gutensearch::catalog::IdFilter;
use gutensearch::config::IndexConfig;
use gutensearch::error::GutensearchError;
use gutensearch::parallel_index::{IndexingPipeline, collect_documents};
use gutensearch::record::DocumentId;
use gutensearch::storage::{MemoryStore, WordStore};
use tempfile::TempDir;

fn write_library(dir: &TempDir) {
    let books = [
        (
            "2701.txt",
            "Call me Ishmael. The whale, the WHALE!\nWhales and whaling.",
        ),
        (
            "11.txt",
            "Alice was beginning to get very tired. The white rabbit; the whale?",
        ),
        (
            "1342.txt",
            "It is a truth universally acknowledged... caf\u{e9} society",
        ),
        ("readme.txt", "not a book"),
        ("cover.jpg", "binary"),
    ];
    for (name, text) in books {
        fs::write(dir.path().join(name), text).unwrap();
    }
}

fn pipeline() -> IndexingPipeline {
    IndexingPipeline::new(
        IndexConfig::default()
            .with_threads(2)
            .with_insert_batch_size(4),
    )
    .unwrap()
}

fn id(raw: &str) -> DocumentId {
    DocumentId::parse(raw).unwrap()
}

#[test]
fn test_load_directory_into_store() {
    let dir = TempDir::new().unwrap();
    write_library(&dir);

    // 1. Discover documents
    let paths = collect_documents(dir.path(), "txt").unwrap();
    assert_eq!(paths.len(), 4);

    // 2. Stream them into a store
    let store = MemoryStore::new();
    let summary = pipeline().index_into(&paths, &store).unwrap();
    assert_eq!(summary.documents_loaded, 3);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].path.ends_with("readme.txt"));
    assert!(matches!(
        summary.failures[0].error,
        GutensearchError::InvalidDocumentId(_)
    ));

    // 3. Check the fact table
    let stats = store.stats().unwrap();
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.records, summary.records_inserted);

    let moby = store.document_words(&id("2701")).unwrap();
    let count = |word: &str| moby.iter().find(|r| r.word == word).map(|r| r.count);
    assert_eq!(count("the"), Some(2));
    assert_eq!(count("whale"), Some(2));
    assert_eq!(count("whales"), Some(1));
    assert_eq!(count("ishmael"), Some(1));

    // Non-ASCII letters split words.
    let corpus = store.corpus().unwrap();
    assert!(corpus.contains(&"caf".to_string()));
    assert!(!corpus.iter().any(|w| !w.bytes().all(|b| b.is_ascii_lowercase())));
}

#[test]
fn test_reloading_keeps_counts() {
    let dir = TempDir::new().unwrap();
    write_library(&dir);
    let paths = collect_documents(dir.path(), "txt").unwrap();

    let store = MemoryStore::new();
    pipeline().index_into(&paths, &store).unwrap();
    let first = store.snapshot();

    pipeline().index_into(&paths, &store).unwrap();
    assert_eq!(store.snapshot(), first);
}

#[test]
fn test_store_survives_save_and_load() {
    let dir = TempDir::new().unwrap();
    write_library(&dir);
    let paths = collect_documents(dir.path(), "txt").unwrap();

    let store = MemoryStore::new();
    pipeline().index_into(&paths, &store).unwrap();

    let store_path = dir.path().join("library.store");
    store.save(&store_path).unwrap();

    let reopened = MemoryStore::open_or_default(&store_path).unwrap();
    assert_eq!(reopened.snapshot(), store.snapshot());
    assert_eq!(reopened.corpus().unwrap(), store.corpus().unwrap());
}

#[test]
fn test_id_filter_limits_load() {
    let dir = TempDir::new().unwrap();
    write_library(&dir);

    let paths = collect_documents(dir.path(), "txt").unwrap();
    let only = IdFilter::Only([11].into_iter().collect()).apply(paths);
    assert_eq!(only.len(), 1);

    let store = MemoryStore::new();
    let summary = pipeline().index_into(&only, &store).unwrap();
    assert_eq!(summary.documents_loaded, 1);
    assert!(summary.failures.is_empty());
    assert!(store.document_words(&id("2701")).unwrap().is_empty());
}

#[test]
fn test_in_memory_results_keep_input_order() {
    let dir = TempDir::new().unwrap();
    write_library(&dir);

    let paths: Vec<PathBuf> = ["11.txt", "2701.txt", "missing.txt", "1342.txt"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();
    let result = pipeline().index_paths(&paths);

    let ids: Vec<&str> = result
        .documents
        .iter()
        .map(|d| d.document_id.as_str())
        .collect();
    assert_eq!(ids, vec!["11", "2701", "1342"]);
    assert_eq!(result.failures.len(), 1);
    assert!(matches!(result.failures[0].error, GutensearchError::InvalidDocumentId(_)));
}
