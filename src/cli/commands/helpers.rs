//! Shared helper functions for CLI commands.

use std::sync::Arc;

use crate::config::Settings;
use crate::extract::DocumentIngestor;
use crate::ocr::{OcrBackend, PopplerOpener, TesseractBackend};
use crate::repository::DbContext;
use crate::services::IngestService;

use super::super::progress::IngestProgress;

/// Truncate a string to `max_chars` characters, adding "..." when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Open the database, creating directories and schema when missing.
pub async fn open_database(settings: &Settings) -> anyhow::Result<DbContext> {
    settings.ensure_directories()?;
    let ctx = settings.create_db_context()?;
    ctx.init_schema().await?;
    Ok(ctx)
}

/// Build the ingest service with Poppler, Tesseract and a progress bar.
pub fn ingest_service(settings: &Settings, ctx: DbContext) -> IngestService {
    let ocr = TesseractBackend::new();
    if !ocr.is_available() {
        tracing::warn!("{}; scanned pages will fail", ocr.availability_hint());
    }

    let ingestor = DocumentIngestor::new(Arc::new(PopplerOpener::new()), Arc::new(ocr))
        .with_observer(Arc::new(IngestProgress::new()));

    IngestService::new(ctx, ingestor, settings.documents_dir.clone())
        .with_source_id_length(settings.source_id_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short.pdf", 20), "short.pdf");
        assert_eq!(truncate("a-very-long-filename.pdf", 10), "a-very-...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }
}
