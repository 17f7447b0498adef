//! Parallel indexing of document collections.
//!
//! [`IndexingPipeline`] parses documents on a dedicated thread pool and
//! either returns the records in memory or streams them into a
//! [`RecordSink`](crate::storage::RecordSink) in batches.

pub mod engine;
pub mod source;

pub use engine::{DocumentFailure, DocumentRecords, IndexingPipeline, IndexingResult, LoadSummary};
pub use source::collect_documents;
