//! Whitespace normalization for extracted and OCR'd text.

/// Canonicalize whitespace in raw page text.
///
/// Non-breaking spaces become ordinary spaces, every run of whitespace
/// collapses to a single space, and the result is trimmed.
pub fn normalize_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    raw.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize text that may be absent.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize_text).unwrap_or_default()
}

/// Count whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
