//! Parallel document indexing engine.
//!
//! Each document runs through its own tokenize -> count -> build records
//! pipeline on one worker of a rayon pool. Documents share no mutable state,
//! and a document's records are only handed on once its count is complete,
//! so a failing document never leaves partial rows behind and never stops
//! its siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::aggregation::WordCount;
use crate::analysis::tokenizer::Tokenizer;
use crate::config::IndexConfig;
use crate::error::{GutensearchError, Result};
use crate::record::{DocumentId, Record, build_records};
use crate::storage::RecordSink;

/// Records produced for one document.
#[derive(Debug, Clone)]
pub struct DocumentRecords {
    /// File the document was read from.
    pub path: PathBuf,
    /// Identifier derived from the file name.
    pub document_id: DocumentId,
    /// Total number of tokens in the document.
    pub total_words: u64,
    /// One record per distinct word.
    pub records: Vec<Record>,
}

/// A document that could not be indexed.
#[derive(Debug)]
pub struct DocumentFailure {
    /// File the document was read from.
    pub path: PathBuf,
    /// Why it failed.
    pub error: GutensearchError,
}

/// Result of indexing a set of documents in memory.
#[derive(Debug)]
pub struct IndexingResult {
    /// Successfully indexed documents, in input order.
    pub documents: Vec<DocumentRecords>,
    /// Documents that failed, in input order.
    pub failures: Vec<DocumentFailure>,
    /// Total execution time.
    pub elapsed: Duration,
}

/// Result of streaming a set of documents into a sink.
#[derive(Debug)]
pub struct LoadSummary {
    /// Number of documents whose records reached the sink.
    pub documents_loaded: usize,
    /// Number of records the sink accepted.
    pub records_inserted: usize,
    /// Documents that failed, in completion order.
    pub failures: Vec<DocumentFailure>,
    /// Total execution time.
    pub elapsed: Duration,
}

/// Tokenize, count and flatten one document.
fn parse_document(tokenizer: &dyn Tokenizer, path: &Path) -> Result<DocumentRecords> {
    let document_id = DocumentId::from_path(path)?;
    let counts = WordCount::from_path(tokenizer, path)?;
    let records = build_records(&document_id, &counts);

    debug!(
        "parsed document {} ({} words, {} distinct)",
        document_id,
        counts.total(),
        records.len()
    );

    Ok(DocumentRecords {
        path: path.to_path_buf(),
        document_id,
        total_words: counts.total(),
        records,
    })
}

/// Engine running per-document pipelines on a bounded worker pool.
pub struct IndexingPipeline {
    /// Configuration for the engine.
    config: IndexConfig,

    /// Tokenizer shared by all workers.
    tokenizer: Arc<dyn Tokenizer>,

    /// Thread pool for parallel execution.
    thread_pool: Arc<ThreadPool>,
}

impl IndexingPipeline {
    /// Create a new pipeline.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(config.threads())
            .thread_name(|i| format!("gutensearch-index-{i}"))
            .build()
            .map_err(|e| GutensearchError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            tokenizer: config.tokenizer.build(),
            config,
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Index a single document on the calling thread.
    pub fn index_document<P: AsRef<Path>>(&self, path: P) -> Result<DocumentRecords> {
        parse_document(self.tokenizer.as_ref(), path.as_ref())
    }

    /// Index documents in parallel and keep every result in memory.
    pub fn index_paths(&self, paths: &[PathBuf]) -> IndexingResult {
        let start = Instant::now();

        let outcomes: Vec<(PathBuf, Result<DocumentRecords>)> = self.thread_pool.install(|| {
            paths
                .par_iter()
                .map(|path| (path.clone(), self.index_document(path)))
                .collect()
        });

        let mut documents = Vec::new();
        let mut failures = Vec::new();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(document) => documents.push(document),
                Err(error) => {
                    warn!("skipping {}: {}", path.display(), error);
                    failures.push(DocumentFailure { path, error });
                }
            }
        }

        let elapsed = start.elapsed();
        info!(
            "indexed {} documents ({} failed) in {:?}",
            documents.len(),
            failures.len(),
            elapsed
        );

        IndexingResult {
            documents,
            failures,
            elapsed,
        }
    }

    /// Index documents in parallel, streaming records into `sink` as
    /// documents complete.
    ///
    /// Records are grouped into insert calls of at least
    /// `insert_batch_size` records (the last call may be smaller); a
    /// document's records always travel in a single call. A sink error stops
    /// the load: documents not yet started are abandoned and the error is
    /// returned.
    pub fn index_into<S: RecordSink + ?Sized>(&self, paths: &[PathBuf], sink: &S) -> Result<LoadSummary> {
        let start = Instant::now();
        let (tx, rx) = bounded::<(PathBuf, Result<DocumentRecords>)>(self.config.threads() * 2);
        let cancelled = Arc::new(AtomicBool::new(false));

        for path in paths {
            let tx = tx.clone();
            let path = path.clone();
            let tokenizer = Arc::clone(&self.tokenizer);
            let cancelled = Arc::clone(&cancelled);

            self.thread_pool.spawn(move || {
                if cancelled.load(Ordering::Relaxed) {
                    return;
                }
                let outcome = parse_document(tokenizer.as_ref(), &path);
                let _ = tx.send((path, outcome));
            });
        }

        // Drop the original sender so the receiver knows when all tasks are done
        drop(tx);

        let mut summary = LoadSummary {
            documents_loaded: 0,
            records_inserted: 0,
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        };
        let mut batch: Vec<Record> = Vec::new();
        let mut batch_documents = 0;

        for (path, outcome) in rx.iter() {
            match outcome {
                Ok(document) => {
                    batch.extend(document.records);
                    batch_documents += 1;
                }
                Err(error) => {
                    warn!("skipping {}: {}", path.display(), error);
                    summary.failures.push(DocumentFailure { path, error });
                }
            }

            if batch.len() >= self.config.insert_batch_size {
                if let Err(e) = self.flush(sink, &mut batch, &mut batch_documents, &mut summary) {
                    cancelled.store(true, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }

        if batch_documents > 0 {
            self.flush(sink, &mut batch, &mut batch_documents, &mut summary)?;
        }

        summary.elapsed = start.elapsed();
        info!(
            "loaded {} documents, {} records ({} failed) in {:?}",
            summary.documents_loaded,
            summary.records_inserted,
            summary.failures.len(),
            summary.elapsed
        );
        Ok(summary)
    }

    fn flush<S: RecordSink + ?Sized>(
        &self,
        sink: &S,
        batch: &mut Vec<Record>,
        batch_documents: &mut usize,
        summary: &mut LoadSummary,
    ) -> Result<()> {
        let records = std::mem::take(batch);
        debug!(
            "inserting {} records from {} documents",
            records.len(),
            batch_documents
        );
        summary.records_inserted += sink.insert_records(records)?;
        summary.documents_loaded += *batch_documents;
        *batch_documents = 0;
        Ok(())
    }
}
