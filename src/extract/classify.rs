//! Native-text-layer classification.

/// How a page's text should be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// The embedded text layer is usable.
    TextNative,
    /// No usable text layer; OCR is required.
    Scanned,
}

/// Classify a page from its native extraction result.
///
/// Only emptiness is checked: a page with garbage in its text layer is still
/// text-native, and a page whose text the native extractor missed entirely
/// goes to OCR.
pub fn classify_page(native_text: &str) -> PageKind {
    if native_text.trim().is_empty() {
        PageKind::Scanned
    } else {
        PageKind::TextNative
    }
}

/// Whether a page has no extractable text.
pub fn is_scanned_page(native_text: &str) -> bool {
    classify_page(native_text) == PageKind::Scanned
}
