use std::fs;
use std::path::{Path, PathBuf};

use crate::editing::Document;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document {0}: {1}")]
    InvalidDocument(PathBuf, String),
}

/// Read a document body from disk
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|e| IoError::InvalidDocument(path.to_path_buf(), e.to_string()))
}

/// Read a document body into an editable [`Document`]
pub fn open_document(path: &Path) -> Result<Document, IoError> {
    let body = read_document(path)?;
    Document::from_bytes(body.as_bytes())
        .map_err(|e| IoError::InvalidDocument(path.to_path_buf(), e.to_string()))
}

/// Write a document body, creating parent directories as needed
pub fn write_document(path: &Path, body: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_document() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.md");
        assert!(matches!(read_document(&missing), Err(IoError::NotFound(p)) if p == missing));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("lesson.md");
        let body = "Intro\r\n\n{rr%;#;Well done%rr}\n";

        write_document(&path, body).unwrap();
        assert_eq!(read_document(&path).unwrap(), body);
        assert_eq!(open_document(&path).unwrap().text(), body);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.md");
        fs::write(&path, [0xFF, 0xFE]).unwrap();
        assert!(matches!(
            read_document(&path),
            Err(IoError::InvalidDocument(..))
        ));
    }
}
