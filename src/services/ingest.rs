//! Upload and ingestion service.
//!
//! Ties the extraction pipeline to storage and the database: validate the
//! uploaded bytes, pick a source id, write the file, record the source, then
//! parse and persist its pages.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::extract::DocumentIngestor;
use crate::models::{SaveSummary, SourceDocument};
use crate::repository::{save_pages, DbContext, DbError};
use crate::storage::save_pdf_bytes;
use crate::utils::{is_pdf_bytes, SourceIdError, SourceIdGenerator};

/// Characters of page 1 shown after an upload.
pub const PREVIEW_CHARS: usize = 1000;

/// Errors from the upload flow.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0} does not look like a valid PDF")]
    InvalidPdf(String),

    #[error(transparent)]
    SourceId(#[from] SourceIdError),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub source_id: String,
    pub filename: String,
    pub stored_path: PathBuf,
    pub summary: SaveSummary,
    /// Leading text of page 1, when it was saved.
    pub preview: Option<String>,
}

/// Service for uploading and ingesting PDFs.
#[derive(Clone)]
pub struct IngestService {
    db: DbContext,
    ingestor: DocumentIngestor,
    documents_dir: PathBuf,
    source_id_length: Option<usize>,
}

impl IngestService {
    /// Create a new ingest service.
    pub fn new(db: DbContext, ingestor: DocumentIngestor, documents_dir: PathBuf) -> Self {
        Self {
            db,
            ingestor,
            documents_dir,
            source_id_length: None,
        }
    }

    /// Truncate generated source ids to `length` hex chars.
    pub fn with_source_id_length(mut self, length: Option<usize>) -> Self {
        self.source_id_length = length;
        self
    }

    /// Parse the PDF at `path` and store its pages under `source_id`.
    ///
    /// A document that yields no pages is logged and reported as `{0, 0}`
    /// without touching the database.
    pub async fn parse_and_store(
        &self,
        path: &Path,
        source_id: &str,
    ) -> Result<SaveSummary, UploadError> {
        let ingestor = self.ingestor.clone();
        let owned_path = path.to_path_buf();
        let owned_id = source_id.to_string();
        let pages =
            tokio::task::spawn_blocking(move || ingestor.ingest(&owned_path, &owned_id)).await?;

        if pages.is_empty() {
            warn!("No pages extracted from {}", path.display());
            return Ok(SaveSummary::default());
        }

        let tx = self.db.pages().begin().await?;
        Ok(save_pages(tx, &pages).await)
    }

    /// Validate, store and ingest an uploaded PDF.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> Result<UploadOutcome, UploadError> {
        if !is_pdf_bytes(content) {
            return Err(UploadError::InvalidPdf(filename.to_string()));
        }

        let sources = self.db.sources();
        let source_id = SourceIdGenerator::with_registry(&sources)
            .with_length(self.source_id_length)
            .unique_id()
            .await?;

        let stored_path = save_pdf_bytes(content, &source_id, &self.documents_dir)?;
        let source = SourceDocument::new(source_id.clone(), filename.to_string())
            .with_content(content, stored_path.clone());
        sources.save(&source).await?;
        info!("Stored {} as {}", filename, source_id);

        let summary = self.parse_and_store(&stored_path, &source_id).await?;

        let preview = if summary.success > 0 {
            self.db
                .pages()
                .get_page(&source_id, 1)
                .await?
                .map(|page| page.text().chars().take(PREVIEW_CHARS).collect())
        } else {
            None
        };

        Ok(UploadOutcome {
            source_id,
            filename: filename.to_string(),
            stored_path,
            summary,
            preview,
        })
    }
}
