//! Error types for gutensearch.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`GutensearchError`] enum.
//!
//! # Examples
//!
//! ```
//! use gutensearch::error::{GutensearchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GutensearchError::invalid_query("wildcards cannot be fuzzy"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for gutensearch operations.
#[derive(Error, Debug)]
pub enum GutensearchError {
    /// I/O errors (reading documents, store files, id lists)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No usable document identifier could be derived from a name
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(String),

    /// Fuzzy matching was asked to pick from zero candidates
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// Query-related errors (conflicting modes, empty words, bad patterns)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Binary (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with GutensearchError.
pub type Result<T> = std::result::Result<T, GutensearchError>;

impl GutensearchError {
    /// Create a new invalid document id error.
    pub fn invalid_document_id<S: Into<String>>(msg: S) -> Self {
        GutensearchError::InvalidDocumentId(msg.into())
    }

    /// Create a new empty corpus error.
    pub fn empty_corpus<S: Into<String>>(msg: S) -> Self {
        GutensearchError::EmptyCorpus(msg.into())
    }

    /// Create a new invalid query error.
    pub fn invalid_query<S: Into<String>>(msg: S) -> Self {
        GutensearchError::InvalidQuery(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        GutensearchError::Storage(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        GutensearchError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GutensearchError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        GutensearchError::Other(format!("Internal error: {}", msg.into()))
    }
}
