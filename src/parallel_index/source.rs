//! Discovery of document files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;

/// List the regular files directly inside `dir` whose extension is
/// `extension`, sorted by path.
///
/// Subdirectories are not descended into.
pub fn collect_documents<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }

    paths.sort();
    debug!(
        "found {} .{} documents in {}",
        paths.len(),
        extension,
        dir.display()
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_collect_documents() {
        let dir = TempDir::new().unwrap();
        for name in ["20.txt", "3.txt", "readme.md", "11.txt.bak"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let names: Vec<String> = collect_documents(dir.path(), "txt")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["20.txt", "3.txt"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(collect_documents(dir.path().join("absent"), "txt").is_err());
    }
}
