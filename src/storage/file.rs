//! Single-file persistence for [`MemoryStore`].
//!
//! Layout: 4 magic bytes, a little-endian `u32` format version, then the
//! fact table grouped by document, encoded with `bincode`. The header is
//! checked before any of the body is decoded, and the body is decoded with a
//! byte limit equal to the file size so a corrupt length prefix fails instead
//! of allocating. Saving writes a sibling temporary file first and renames it
//! over the target, so an interrupted save leaves the previous file intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bincode::Options;
use log::{debug, info};

use crate::error::{GutensearchError, Result};
use crate::record::DocumentId;
use crate::storage::MemoryStore;

/// Identifies store files.
const MAGIC: [u8; 4] = *b"GSWC";

/// Bumped whenever the encoded layout changes.
const FORMAT_VERSION: u32 = 1;

/// Magic plus version.
const HEADER_LEN: u64 = 8;

type Documents = Vec<(DocumentId, Vec<(String, u64)>)>;

fn body_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn read_header<R: Read>(reader: &mut R, path: &Path) -> Result<()> {
    let not_a_store = || {
        GutensearchError::storage(format!("'{}' is not a gutensearch store", path.display()))
    };

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|_| not_a_store())?;
    if magic != MAGIC {
        return Err(not_a_store());
    }

    let mut version = [0u8; 4];
    reader.read_exact(&mut version).map_err(|_| not_a_store())?;
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(GutensearchError::storage(format!(
            "'{}' uses store format {}, expected {}",
            path.display(),
            version,
            FORMAT_VERSION
        )));
    }
    Ok(())
}

impl MemoryStore {
    /// Write the store to `path`, replacing any previous file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.file_name().is_none() {
            return Err(GutensearchError::storage(format!(
                "'{}' is not a file path",
                path.display()
            )));
        }

        let documents = self.snapshot();
        let tmp = temp_path(path);
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            writer.write_all(&MAGIC)?;
            writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
            body_options().serialize_into(&mut writer, &documents)?;
            writer.flush()?;
        }
        fs::rename(&tmp, path)?;

        info!("saved {} documents to {}", documents.len(), path.display());
        Ok(())
    }

    /// Read a store previously written by [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        read_header(&mut reader, path)?;
        let documents: Documents = body_options()
            .with_limit(file_len.saturating_sub(HEADER_LEN))
            .deserialize_from(reader)
            .map_err(|e| {
                GutensearchError::storage(format!("'{}' is corrupt: {}", path.display(), e))
            })?;

        debug!("loaded {} documents from {}", documents.len(), path.display());
        MemoryStore::from_snapshot(documents)
    }

    /// Load `path` if it exists, otherwise start with an empty store.
    pub fn open_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("no store at {}, starting empty", path.display());
            Ok(MemoryStore::new())
        }
    }
}
