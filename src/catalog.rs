//! Document id lists.
//!
//! Two inputs select which documents a load picks up: the Project Gutenberg
//! catalog, where each title line ends with the book's number, and plain id
//! lists with one number per line.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{GutensearchError, Result};
use crate::record::DocumentId;

/// Extract the ids from a catalog listing.
///
/// For every non-empty line the last whitespace-separated field is taken and
/// kept when it parses as an integer. The result is sorted and free of
/// duplicates.
pub fn parse_catalog_ids<R: BufRead>(reader: R) -> Result<Vec<u64>> {
    let mut ids = BTreeSet::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(id) = line
            .split_whitespace()
            .last()
            .and_then(|field| field.parse::<u64>().ok())
        {
            ids.insert(id);
        }
    }
    Ok(ids.into_iter().collect())
}

/// Read the ids of a catalog file with [`parse_catalog_ids`].
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<u64>> {
    let path = path.as_ref();
    let ids = parse_catalog_ids(BufReader::new(File::open(path)?))?;
    debug!("read {} catalog ids from {}", ids.len(), path.display());
    Ok(ids)
}

/// Read a file holding one integer id per line. Blank lines are skipped.
pub fn read_id_list<P: AsRef<Path>>(path: P) -> Result<Vec<u64>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut ids = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let field = line.trim();
        if field.is_empty() {
            continue;
        }
        let id = field.parse::<u64>().map_err(|e| {
            GutensearchError::other(format!(
                "{}:{}: '{}' is not a document id: {}",
                path.display(),
                line_number + 1,
                field,
                e
            ))
        })?;
        ids.push(id);
    }

    debug!("read {} ids from {}", ids.len(), path.display());
    Ok(ids)
}

/// Restricts a load to a subset of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdFilter {
    /// Every document.
    #[default]
    All,
    /// Only the listed documents.
    Only(BTreeSet<u64>),
    /// Every document except the listed ones.
    Exclude(BTreeSet<u64>),
}

impl IdFilter {
    /// Check whether a document passes the filter.
    pub fn allows(&self, document_id: &DocumentId) -> bool {
        let numeric = document_id.as_str().parse::<u64>().ok();
        match self {
            IdFilter::All => true,
            IdFilter::Only(ids) => numeric.is_some_and(|id| ids.contains(&id)),
            IdFilter::Exclude(ids) => !numeric.is_some_and(|id| ids.contains(&id)),
        }
    }

    /// Keep the paths whose document passes the filter.
    ///
    /// A path without a usable document id is kept unless the filter is
    /// [`IdFilter::Only`], so that the indexing step reports it.
    pub fn apply(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        if *self == IdFilter::All {
            return paths;
        }
        paths
            .into_iter()
            .filter(|path| match DocumentId::from_path(path) {
                Ok(document_id) => self.allows(&document_id),
                Err(_) => !matches!(self, IdFilter::Only(_)),
            })
            .collect()
    }
}
