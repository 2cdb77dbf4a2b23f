//! Storage helpers for uploaded PDF content on disk.

use std::io;
use std::path::{Path, PathBuf};

/// Construct the storage path for an uploaded PDF.
///
/// `{documents_dir}/{source_id}.pdf`
pub fn pdf_storage_path(documents_dir: &Path, source_id: &str) -> PathBuf {
    documents_dir.join(format!("{}.pdf", source_id))
}

/// Write uploaded bytes to `{documents_dir}/{source_id}.pdf`.
///
/// Creates the storage directory if needed and returns the written path.
pub fn save_pdf_bytes(content: &[u8], source_id: &str, documents_dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(documents_dir)?;
    let path = pdf_storage_path(documents_dir, source_id);
    std::fs::write(&path, content)?;
    Ok(path)
}
