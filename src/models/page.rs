//! Per-page extraction records.

use serde::{Deserialize, Serialize};

use crate::extract::normalize::word_count;

/// Extraction result for a single page of a source document.
///
/// `word_count` is always derived from `text`; the only ways to build a
/// record are [`PageRecord::new`] and [`PageRecord::failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    source_id: String,
    page_number: u32,
    text: String,
    word_count: u32,
    used_ocr: bool,
    parse_errors: u32,
}

impl PageRecord {
    /// Create a record, counting words in `text`.
    pub fn new(
        source_id: impl Into<String>,
        page_number: u32,
        text: impl Into<String>,
        used_ocr: bool,
        parse_errors: u32,
    ) -> Self {
        let text = text.into();
        Self {
            source_id: source_id.into(),
            page_number,
            word_count: word_count(&text) as u32,
            text,
            used_ocr,
            parse_errors,
        }
    }

    /// Record for a page whose extraction failed.
    pub fn failed(source_id: impl Into<String>, page_number: u32) -> Self {
        Self::new(source_id, page_number, String::new(), false, 1)
    }

    /// Parent document identifier.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Page number (1-indexed).
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Normalized page text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Whether the text came from the OCR fallback.
    pub fn used_ocr(&self) -> bool {
        self.used_ocr
    }

    pub fn parse_errors(&self) -> u32 {
        self.parse_errors
    }

    /// Whether extraction failed for this page.
    pub fn is_failed(&self) -> bool {
        self.parse_errors > 0
    }
}

/// Outcome of persisting a batch of page records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub success: usize,
    pub failed: usize,
}

impl SaveSummary {
    /// Total number of records attempted.
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_derived_from_text() {
        let page = PageRecord::new("abc", 1, "Hello world again", false, 0);
        assert_eq!(page.word_count(), 3);
        assert_eq!(page.page_number(), 1);
        assert!(!page.is_failed());
    }

    #[test]
    fn test_empty_text_has_zero_words() {
        let page = PageRecord::new("abc", 2, "", true, 0);
        assert_eq!(page.word_count(), 0);
        assert!(page.used_ocr());
    }

    #[test]
    fn test_failed_record() {
        let page = PageRecord::failed("abc", 4);
        assert_eq!(page.text(), "");
        assert_eq!(page.word_count(), 0);
        assert_eq!(page.parse_errors(), 1);
        assert!(!page.used_ocr());
        assert!(page.is_failed());
    }

    #[test]
    fn test_summary_serializes_as_counts() {
        let summary = SaveSummary {
            success: 4,
            failed: 1,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"success":4,"failed":1}"#);
        assert_eq!(summary.total(), 5);
    }
}
