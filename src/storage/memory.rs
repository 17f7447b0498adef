//! In-memory word store.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{GutensearchError, Result};
use crate::query::WordPattern;
use crate::record::{DocumentId, Record};
use crate::storage::{RecordSink, StoreStats, WordStore};

/// Fact table and distinct-word set kept in memory.
///
/// Safe to share between indexing workers: writers take a write lock for
/// the duration of one batch, readers a read lock per query.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    /// document -> word -> count
    documents: BTreeMap<DocumentId, BTreeMap<String, u64>>,
    /// word -> document -> count
    postings: AHashMap<String, BTreeMap<DocumentId, u64>>,
    /// Distinct words, the fuzzy matching corpus.
    words: BTreeSet<String>,
}

impl Tables {
    fn insert(&mut self, record: Record) {
        let Record {
            word,
            document_id,
            count,
        } = record;

        if !self.words.contains(&word) {
            self.words.insert(word.clone());
        }
        self.postings
            .entry(word.clone())
            .or_default()
            .insert(document_id.clone(), count);
        self.documents
            .entry(document_id)
            .or_default()
            .insert(word, count);
    }

    fn remove_document(&mut self, document_id: &DocumentId) -> usize {
        let Some(words) = self.documents.remove(document_id) else {
            return 0;
        };

        for word in words.keys() {
            let now_unused = match self.postings.get_mut(word) {
                Some(documents) => {
                    documents.remove(document_id);
                    documents.is_empty()
                }
                None => false,
            };
            if now_unused {
                self.postings.remove(word);
                self.words.remove(word);
            }
        }

        words.len()
    }

    fn postings_of(&self, word: &str, out: &mut Vec<Record>) {
        if let Some(documents) = self.postings.get(word) {
            out.extend(
                documents
                    .iter()
                    .map(|(document_id, &count)| Record::new(word, document_id.clone(), count)),
            );
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.tables.read().documents.is_empty()
    }

    /// Copy out the fact table grouped by document, in document order.
    pub fn snapshot(&self) -> Vec<(DocumentId, Vec<(String, u64)>)> {
        self.tables
            .read()
            .documents
            .iter()
            .map(|(document_id, words)| {
                (
                    document_id.clone(),
                    words.iter().map(|(w, &c)| (w.clone(), c)).collect(),
                )
            })
            .collect()
    }

    /// Rebuild a store from [`snapshot`](Self::snapshot) output.
    pub fn from_snapshot(documents: Vec<(DocumentId, Vec<(String, u64)>)>) -> Result<Self> {
        let store = MemoryStore::new();
        for (document_id, words) in documents {
            let records = words
                .into_iter()
                .map(|(word, count)| Record::new(word, document_id.clone(), count))
                .collect();
            store.insert_records(records)?;
        }
        Ok(store)
    }
}

impl RecordSink for MemoryStore {
    fn insert_records(&self, records: Vec<Record>) -> Result<usize> {
        if let Some(bad) = records.iter().find(|r| r.count == 0 || r.word.is_empty()) {
            return Err(GutensearchError::storage(format!(
                "refusing record ('{}', {}, {}): words must be non-empty and counts positive",
                bad.word, bad.document_id, bad.count
            )));
        }

        let inserted = records.len();
        let mut tables = self.tables.write();
        for record in records {
            tables.insert(record);
        }
        Ok(inserted)
    }

    fn remove_document(&self, document_id: &DocumentId) -> Result<usize> {
        Ok(self.tables.write().remove_document(document_id))
    }
}

impl WordStore for MemoryStore {
    fn corpus(&self) -> Result<Vec<String>> {
        Ok(self.tables.read().words.iter().cloned().collect())
    }

    fn find_word(&self, pattern: &WordPattern) -> Result<Vec<Record>> {
        let tables = self.tables.read();
        let mut rows = Vec::new();
        match pattern {
            WordPattern::Exact(word) => tables.postings_of(word, &mut rows),
            WordPattern::Wildcard { .. } => {
                for word in tables.words.iter().filter(|w| pattern.matches(w)) {
                    tables.postings_of(word, &mut rows);
                }
            }
        }
        Ok(rows)
    }

    fn document_words(&self, document_id: &DocumentId) -> Result<Vec<Record>> {
        let tables = self.tables.read();
        Ok(tables
            .documents
            .get(document_id)
            .map(|words| {
                words
                    .iter()
                    .map(|(word, &count)| Record::new(word.as_str(), document_id.clone(), count))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn stats(&self) -> Result<StoreStats> {
        let tables = self.tables.read();
        Ok(StoreStats {
            documents: tables.documents.len(),
            distinct_words: tables.words.len(),
            records: tables.documents.values().map(BTreeMap::len).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn id(raw: &str) -> DocumentId {
        DocumentId::parse(raw).unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let inserted = store
            .insert_records(vec![
                Record::new("the", id("1"), 5),
                Record::new("cat", id("1"), 2),
                Record::new("the", id("2"), 3),
            ])
            .unwrap();
        assert_eq!(inserted, 3);

        assert_eq!(store.corpus().unwrap(), vec!["cat", "the"]);
        let mut rows = store.find_word(&WordPattern::parse("the").unwrap()).unwrap();
        rows.sort_by(|a, b| a.document_id.cmp(&b.document_id));
        assert_eq!(
            rows,
            vec![Record::new("the", id("1"), 5), Record::new("the", id("2"), 3)]
        );
        assert_eq!(
            store.stats().unwrap(),
            StoreStats {
                documents: 2,
                distinct_words: 2,
                records: 3
            }
        );
    }

    #[test]
    fn test_reinserting_overwrites_count() {
        let store = MemoryStore::new();
        store.insert_records(vec![Record::new("sea", id("9"), 1)]).unwrap();
        store.insert_records(vec![Record::new("sea", id("9"), 4)]).unwrap();

        assert_eq!(
            store.document_words(&id("9")).unwrap(),
            vec![Record::new("sea", id("9"), 4)]
        );
        assert_eq!(store.stats().unwrap().records, 1);
    }

    #[test]
    fn test_invalid_batch_is_rejected_whole() {
        let store = MemoryStore::new();
        let result = store.insert_records(vec![
            Record::new("ok", id("1"), 1),
            Record::new("zero", id("1"), 0),
        ]);
        assert!(matches!(result, Err(GutensearchError::Storage(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_document_prunes_corpus() {
        let store = MemoryStore::new();
        store
            .insert_records(vec![
                Record::new("shared", id("1"), 1),
                Record::new("only", id("1"), 1),
                Record::new("shared", id("2"), 2),
            ])
            .unwrap();

        assert_eq!(store.remove_document(&id("1")).unwrap(), 2);
        assert_eq!(store.remove_document(&id("1")).unwrap(), 0);
        assert_eq!(store.corpus().unwrap(), vec!["shared"]);
        assert!(store.document_words(&id("1")).unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let store = MemoryStore::new();
        store
            .insert_records(vec![Record::new("a", id("3"), 1), Record::new("b", id("4"), 2)])
            .unwrap();

        let restored = MemoryStore::from_snapshot(store.snapshot()).unwrap();
        assert_eq!(restored.snapshot(), store.snapshot());
        assert_eq!(restored.corpus().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_concurrent_inserts() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let records = (0..50)
                        .map(|w| Record::new(format!("w{w}"), id(&i.to_string()), w + 1))
                        .collect();
                    store.insert_records(records).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = store.stats().unwrap();
        assert_eq!(stats.documents, 8);
        assert_eq!(stats.distinct_words, 50);
        assert_eq!(stats.records, 400);
    }
}
