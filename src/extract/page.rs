//! Single-page extraction: native text layer first, OCR when the page is scanned.

use super::classify::{classify_page, PageKind};
use super::normalize::normalize_text;
use super::observer::{IngestEvent, IngestObserver};
use super::{ExtractionError, PdfDocument, OCR_RENDER_DPI};
use crate::models::PageRecord;
use crate::ocr::OcrBackend;

/// Produces one [`PageRecord`] per page.
pub struct PageExtractor<'a> {
    ocr: &'a dyn OcrBackend,
    observer: &'a dyn IngestObserver,
}

impl<'a> PageExtractor<'a> {
    pub fn new(ocr: &'a dyn OcrBackend, observer: &'a dyn IngestObserver) -> Self {
        Self { ocr, observer }
    }

    /// Extract the page at 0-based `index`.
    ///
    /// Never fails: any error while reading the text layer, rendering or
    /// running OCR yields an empty record with `parse_errors = 1`.
    pub fn extract(&self, doc: &dyn PdfDocument, source_id: &str, index: u32) -> PageRecord {
        let page_number = index + 1;

        match self.extract_text(doc, index) {
            Ok((text, used_ocr)) => {
                let record = PageRecord::new(source_id, page_number, text, used_ocr, 0);
                self.observer.on_event(&IngestEvent::PageExtracted {
                    source_id: source_id.to_string(),
                    page_number,
                    used_ocr,
                    word_count: record.word_count(),
                });
                record
            }
            Err(e) => {
                self.observer.on_event(&IngestEvent::PageFailed {
                    source_id: source_id.to_string(),
                    page_number,
                    error: e.to_string(),
                });
                PageRecord::failed(source_id, page_number)
            }
        }
    }

    /// Returns the normalized text and whether OCR produced it.
    fn extract_text(
        &self,
        doc: &dyn PdfDocument,
        index: u32,
    ) -> Result<(String, bool), ExtractionError> {
        let native = doc.page_text(index)?;

        match classify_page(&native) {
            PageKind::TextNative => Ok((normalize_text(&native), false)),
            PageKind::Scanned => {
                let image = doc.render_page(index, OCR_RENDER_DPI)?;
                let result = self.ocr.ocr_image(&image)?;
                tracing::trace!(
                    page = index + 1,
                    backend = result.backend,
                    elapsed_ms = result.processing_time_ms,
                    "OCR complete"
                );
                Ok((normalize_text(&result.text), true))
            }
        }
    }
}
