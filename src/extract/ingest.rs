//! Whole-document ingestion.

use std::path::Path;
use std::sync::Arc;

use super::observer::{IngestEvent, IngestObserver, TracingObserver};
use super::page::PageExtractor;
use super::DocumentOpener;
use crate::models::PageRecord;
use crate::ocr::OcrBackend;

/// Turns a PDF on disk into an ordered list of page records.
#[derive(Clone)]
pub struct DocumentIngestor {
    opener: Arc<dyn DocumentOpener>,
    ocr: Arc<dyn OcrBackend>,
    observer: Arc<dyn IngestObserver>,
}

impl DocumentIngestor {
    /// Create an ingestor that reports through `tracing`.
    pub fn new(opener: Arc<dyn DocumentOpener>, ocr: Arc<dyn OcrBackend>) -> Self {
        Self {
            opener,
            ocr,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the event observer.
    pub fn with_observer(mut self, observer: Arc<dyn IngestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Parse every page of the document at `path`.
    ///
    /// If the document cannot be opened the failure is reported to the
    /// observer and an empty list is returned. Per-page failures are recorded
    /// on the page itself.
    pub fn ingest(&self, path: &Path, source_id: &str) -> Vec<PageRecord> {
        let label = path.display().to_string();

        let doc = match self.opener.open(path) {
            Ok(doc) => doc,
            Err(e) => {
                self.observer.on_event(&IngestEvent::OpenFailed {
                    path: label,
                    error: e.to_string(),
                });
                return Vec::new();
            }
        };

        let page_count = doc.page_count();
        self.observer.on_event(&IngestEvent::Opened {
            path: label.clone(),
            page_count,
        });

        let extractor = PageExtractor::new(self.ocr.as_ref(), self.observer.as_ref());
        let pages: Vec<PageRecord> = (0..page_count)
            .map(|index| extractor.extract(doc.as_ref(), source_id, index))
            .collect();

        self.observer.on_event(&IngestEvent::Parsed {
            path: label,
            pages: pages.len(),
        });

        pages
    }
}
