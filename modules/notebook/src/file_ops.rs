//! File operations for the note database
//!
//! The database is a single document that is always replaced whole: write a
//! sibling `.tmp` file, flush it to disk, then rename it over the target.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Path of the scratch file used while replacing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically replace `path` with `content` (creates parent directories as needed)
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path(path);
    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Read the document, returning `None` if it does not exist
pub fn read_document(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/data/notes.json")),
            PathBuf::from("/data/notes.json.tmp")
        );
    }

    #[test]
    fn test_write_and_read_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db").join("notes.json");

        write_atomic(&path, "{\"topics\":[]}").unwrap();
        let content = read_document(&path).unwrap().unwrap();
        assert_eq!(content, "{\"topics\":[]}");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(read_document(&path).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_read_document_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent.json");
        assert!(read_document(&path).unwrap().is_none());
    }
}
