//! Configuration for document indexing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{GutensearchError, Result};

/// Configuration for the indexing pipeline.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use gutensearch::config::IndexConfig;
///
/// let config: IndexConfig = serde_json::from_str(r#"{"thread_pool_size": 2}"#).unwrap();
/// assert_eq!(config.thread_pool_size, Some(2));
/// assert_eq!(config.file_extension, "txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Worker threads for per-document parsing.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Records handed to the sink per insert call.
    pub insert_batch_size: usize,

    /// Tokenizer used for every document.
    pub tokenizer: TokenizerKind,

    /// Extension of the document files picked up from a directory.
    pub file_extension: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: None,
            insert_batch_size: 10_000,
            tokenizer: TokenizerKind::Letter,
            file_extension: "txt".to_string(),
        }
    }
}

impl IndexConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: IndexConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.thread_pool_size = Some(threads);
        self
    }

    /// Set the sink batch size.
    pub fn with_insert_batch_size(mut self, size: usize) -> Self {
        self.insert_batch_size = size;
        self
    }

    /// Set the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: TokenizerKind) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Effective number of worker threads.
    pub fn threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.thread_pool_size == Some(0) {
            return Err(GutensearchError::invalid_config(
                "thread_pool_size must be at least 1",
            ));
        }
        if self.insert_batch_size == 0 {
            return Err(GutensearchError::invalid_config(
                "insert_batch_size must be at least 1",
            ));
        }
        if self.file_extension.is_empty() || self.file_extension.starts_with('.') {
            return Err(GutensearchError::invalid_config(format!(
                "file_extension must be a bare extension like \"txt\", got {:?}",
                self.file_extension
            )));
        }
        Ok(())
    }
}
