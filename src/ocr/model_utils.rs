//! Shared helpers for locating external tools.

pub const TESSERACT_NOT_FOUND: &str = "tesseract not found (install tesseract-ocr)";
pub const PDFTOPPM_NOT_FOUND: &str = "pdftoppm not found (install poppler-utils)";
pub const PDFTOTEXT_NOT_FOUND: &str = "pdftotext not found (install poppler-utils)";
pub const PDFINFO_NOT_FOUND: &str = "pdfinfo not found (install poppler-utils)";

/// External binaries the pipeline shells out to.
pub const REQUIRED_TOOLS: [&str; 4] = ["pdfinfo", "pdftotext", "pdftoppm", "tesseract"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Install hint for a required tool.
pub fn install_hint(tool: &str) -> Option<&'static str> {
    match tool {
        "tesseract" => Some(TESSERACT_NOT_FOUND),
        "pdftoppm" => Some(PDFTOPPM_NOT_FOUND),
        "pdftotext" => Some(PDFTOTEXT_NOT_FOUND),
        "pdfinfo" => Some(PDFINFO_NOT_FOUND),
        _ => None,
    }
}

/// Availability of every required tool.
pub fn check_tools() -> Vec<(String, bool)> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}
