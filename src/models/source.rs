//! Uploaded source document metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An uploaded PDF, identified by an opaque random token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Unique source identifier (lowercase hex).
    pub source_id: String,
    /// Filename as supplied by the uploader.
    pub filename: String,
    /// SHA-256 of the uploaded bytes.
    pub content_hash: Option<String>,
    /// Where the uploaded bytes were written.
    pub file_path: Option<PathBuf>,
    /// When the upload was recorded.
    pub uploaded_at: DateTime<Utc>,
}

impl SourceDocument {
    /// Create a new source record stamped with the current time.
    pub fn new(source_id: String, filename: String) -> Self {
        Self {
            source_id,
            filename,
            content_hash: None,
            file_path: None,
            uploaded_at: Utc::now(),
        }
    }

    /// Attach the stored content location and its hash.
    pub fn with_content(mut self, content: &[u8], file_path: PathBuf) -> Self {
        self.content_hash = Some(Self::compute_hash(content));
        self.file_path = Some(file_path);
        self
    }

    /// Compute SHA-256 hash of content.
    pub fn compute_hash(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_hash() {
        assert_eq!(
            SourceDocument::compute_hash(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_with_content() {
        let doc = SourceDocument::new("abc".into(), "paper.pdf".into())
            .with_content(b"%PDF-1.7", PathBuf::from("/tmp/abc.pdf"));
        assert_eq!(doc.content_hash.as_deref().map(str::len), Some(64));
        assert_eq!(doc.file_path, Some(PathBuf::from("/tmp/abc.pdf")));
    }
}
