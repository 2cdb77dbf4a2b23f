//! PDF signature detection.

/// Magic bytes every PDF file starts with.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Check whether bytes look like a PDF.
///
/// Only the leading signature is inspected; a truncated or corrupt file can
/// still pass and will fail later when opened.
pub fn is_pdf_bytes(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_SIGNATURE)
}
