//! Progress and diagnostic reporting for the extraction pipeline.

/// Events emitted while ingesting a document.
#[derive(Debug, Clone)]
pub enum IngestEvent {
    /// The document could not be opened; no pages will be produced.
    OpenFailed { path: String, error: String },
    /// The document opened successfully.
    Opened { path: String, page_count: u32 },
    /// A page finished extracting.
    PageExtracted {
        source_id: String,
        page_number: u32,
        used_ocr: bool,
        word_count: u32,
    },
    /// A page failed and was recorded with an error.
    PageFailed {
        source_id: String,
        page_number: u32,
        error: String,
    },
    /// All pages have been processed.
    Parsed { path: String, pages: usize },
}

/// Receives pipeline events.
pub trait IngestObserver: Send + Sync {
    fn on_event(&self, event: &IngestEvent);
}

/// Observer that writes events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IngestObserver for TracingObserver {
    fn on_event(&self, event: &IngestEvent) {
        match event {
            IngestEvent::OpenFailed { path, error } => {
                tracing::error!("Failed to open PDF {}: {}", path, error);
            }
            IngestEvent::Opened { path, page_count } => {
                tracing::debug!("Opened {} ({} pages)", path, page_count);
            }
            IngestEvent::PageExtracted {
                source_id,
                page_number,
                used_ocr,
                word_count,
            } => {
                tracing::debug!(
                    source = %source_id,
                    page = page_number,
                    ocr = used_ocr,
                    words = word_count,
                    "Page extracted"
                );
            }
            IngestEvent::PageFailed {
                source_id,
                page_number,
                error,
            } => {
                tracing::error!(
                    "Error parsing page {} of {}: {}",
                    page_number,
                    source_id,
                    error
                );
            }
            IngestEvent::Parsed { path, pages } => {
                tracing::info!("Parsed {} pages from {}", pages, path);
            }
        }
    }
}
