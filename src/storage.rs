//! Storage abstraction layer for gutensearch.
//!
//! The indexing pipeline hands finished records to a [`RecordSink`]; queries
//! read them back through a [`WordStore`]. A store keeps two logical
//! structures: the `(word, document_id, count)` fact table and the set of
//! distinct words used as the fuzzy matching corpus.
//!
//! [`MemoryStore`] implements both traits and can be persisted to a single
//! file, which is what the command line tool uses. A relational backend only
//! has to implement the two traits to be used instead.
//!
//! # Example
//!
//! ```
//! use gutensearch::record::{DocumentId, Record};
//! use gutensearch::storage::{MemoryStore, RecordSink, WordStore};
//!
//! # fn main() -> gutensearch::error::Result<()> {
//! let store = MemoryStore::new();
//! store.insert_records(vec![Record::new("the", DocumentId::parse("1234")?, 2)])?;
//! assert_eq!(store.corpus()?, vec!["the".to_string()]);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::WordPattern;
use crate::record::{DocumentId, Record};

pub mod file;
pub mod memory;

pub use memory::MemoryStore;

/// Destination of bulk record loads.
pub trait RecordSink: Send + Sync {
    /// Insert a batch of records, returning how many were written.
    ///
    /// A record for a `(word, document_id)` pair already present replaces
    /// the stored count.
    fn insert_records(&self, records: Vec<Record>) -> Result<usize>;

    /// Remove every record of a document, returning how many were removed.
    fn remove_document(&self, document_id: &DocumentId) -> Result<usize>;
}

/// Read side of a store.
pub trait WordStore: Send + Sync {
    /// Every distinct word, sorted ascending.
    fn corpus(&self) -> Result<Vec<String>>;

    /// All records whose word matches `pattern`, in no particular order.
    fn find_word(&self, pattern: &WordPattern) -> Result<Vec<Record>>;

    /// All records of one document, in no particular order.
    fn document_words(&self, document_id: &DocumentId) -> Result<Vec<Record>>;

    /// Size figures for reporting.
    fn stats(&self) -> Result<StoreStats>;
}

/// Size figures of a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of documents with at least one record.
    pub documents: usize,
    /// Number of distinct words.
    pub distinct_words: usize,
    /// Number of records in the fact table.
    pub records: usize,
}
