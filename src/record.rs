//! Flattening of per-document word counts into bulk-load records.
//!
//! Every distinct word of a document becomes one [`Record`]. Records carry no
//! ordering guarantee; the storage sink orders rows when it needs to.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregation::WordCount;
use crate::error::{GutensearchError, Result};

/// Identifier of a document, taken from its file name.
///
/// Archive documents are named after their numeric id (`18546.txt`), so a
/// valid identifier is a non-empty run of ASCII digits. It is kept as text to
/// preserve leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Validate a raw identifier.
    pub fn parse<S: AsRef<str>>(raw: S) -> Result<Self> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(GutensearchError::invalid_document_id("empty document id"));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GutensearchError::invalid_document_id(format!(
                "'{raw}' is not numeric"
            )));
        }
        Ok(DocumentId(raw.to_string()))
    }

    /// Derive the identifier from a file name: everything before the first `.`.
    ///
    /// `data/18546.txt` and `18546.txt.utf8` both yield `18546`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            GutensearchError::invalid_document_id(format!(
                "no usable file name in '{}'",
                path.display()
            ))
        })?;
        let stem = name.split('.').next().unwrap_or_default();
        Self::parse(stem)
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the fact table: a word, the document it occurs in, and how often.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// The normalized word.
    pub word: String,
    /// Identifier of the document the word occurs in.
    pub document_id: DocumentId,
    /// Number of occurrences, always positive.
    pub count: u64,
}

impl Record {
    /// Create a new record.
    pub fn new<S: Into<String>>(word: S, document_id: DocumentId, count: u64) -> Self {
        Record {
            word: word.into(),
            document_id,
            count,
        }
    }
}

/// Build one record per distinct word of `counts`.
pub fn build_records(document_id: &DocumentId, counts: &WordCount) -> Vec<Record> {
    counts
        .iter()
        .map(|(word, count)| Record::new(word, document_id.clone(), count))
        .collect()
}

/// Validate `name` as a document id, then build its records.
pub fn records_for(name: &str, counts: &WordCount) -> Result<Vec<Record>> {
    let document_id = DocumentId::parse(name)?;
    Ok(build_records(&document_id, counts))
}
