//! Page-level text extraction with OCR fallback.
//!
//! The pipeline is linear: open the document, walk its pages in order, and
//! for each page either trust the embedded text layer or render the page and
//! run OCR on the image. Every page yields exactly one [`PageRecord`], even
//! when extraction fails.
//!
//! [`PageRecord`]: crate::models::PageRecord

pub mod classify;
pub mod ingest;
pub mod normalize;
pub mod observer;
pub mod page;

use std::path::Path;

use thiserror::Error;

use crate::ocr::{OcrError, RenderedPage};

pub use classify::{classify_page, is_scanned_page, PageKind};
pub use ingest::DocumentIngestor;
pub use normalize::{normalize_opt, normalize_text, word_count};
pub use observer::{IngestEvent, IngestObserver, TracingObserver};
pub use page::PageExtractor;

/// Resolution used when rasterizing pages for OCR.
pub const OCR_RENDER_DPI: u32 = 300;

/// Errors that can occur while opening or extracting a document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to open document {path}: {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Page {0} is out of range")]
    PageOutOfRange(u32),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document opened as an ordered sequence of pages.
///
/// Page indices are 0-based.
pub trait PdfDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Text from the page's embedded text layer.
    fn page_text(&self, index: u32) -> Result<String, ExtractionError>;

    /// Rasterize the page at `dpi` for OCR input.
    fn render_page(&self, index: u32, dpi: u32) -> Result<RenderedPage, ExtractionError>;
}

/// Opens files as paged documents.
pub trait DocumentOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractionError>;
}
