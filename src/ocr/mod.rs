//! OCR and native text extraction.
//!
//! Reads PDFs through Poppler (`pdfinfo`, `pdftotext`, `pdftoppm`) and
//! recognizes scanned pages with Tesseract. Rendered pages stay in memory as
//! PNG bytes and are piped straight into the OCR engine.

mod backend;
mod model_utils;
mod pdf_utils;
mod poppler;
mod tesseract;

pub use backend::{OcrBackend, OcrConfig, OcrError, OcrResult};
pub use model_utils::{check_binary, check_tools, install_hint, REQUIRED_TOOLS};
pub use pdf_utils::{render_pdf_page, RenderedPage};
pub use poppler::{PopplerDocument, PopplerOpener};
pub use tesseract::TesseractBackend;
