//! Paged PDF access through the Poppler command-line tools.
//!
//! - `pdfinfo` opens the document and reports its page count
//! - `pdftotext` reads a single page's embedded text layer
//! - `pdftoppm` rasterizes a single page (see [`render_pdf_page`])

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::model_utils::{PDFINFO_NOT_FOUND, PDFTOTEXT_NOT_FOUND};
use super::pdf_utils::{render_pdf_page, RenderedPage};
use crate::extract::{DocumentOpener, ExtractionError, PdfDocument};

/// Handle command output, extracting stdout on success or returning appropriate error.
fn handle_cmd_output(
    result: std::io::Result<Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Parse the page count out of `pdfinfo` output.
fn parse_page_count(pdfinfo_stdout: &str) -> Option<u32> {
    pdfinfo_stdout
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|count| count.parse().ok())
}

/// Opens PDFs with `pdfinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PopplerOpener;

impl PopplerOpener {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentOpener for PopplerOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractionError> {
        let open_failed = |reason: String| ExtractionError::OpenFailed {
            path: path.display().to_string(),
            reason,
        };

        if !path.is_file() {
            return Err(open_failed("file not found".to_string()));
        }

        let output = Command::new("pdfinfo").arg(path).output();
        let info = handle_cmd_output(output, PDFINFO_NOT_FOUND, "pdfinfo failed")
            .map_err(|e| open_failed(e.to_string()))?;

        let page_count = parse_page_count(&info)
            .ok_or_else(|| open_failed("pdfinfo reported no page count".to_string()))?;

        Ok(Box::new(PopplerDocument {
            path: path.to_path_buf(),
            page_count,
        }))
    }
}

/// A PDF on disk, read page by page.
#[derive(Debug, Clone)]
pub struct PopplerDocument {
    path: PathBuf,
    page_count: u32,
}

impl PopplerDocument {
    fn page_number(&self, index: u32) -> Result<u32, ExtractionError> {
        if index >= self.page_count {
            return Err(ExtractionError::PageOutOfRange(index + 1));
        }
        Ok(index + 1)
    }
}

impl PdfDocument for PopplerDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, index: u32) -> Result<String, ExtractionError> {
        let page = self.page_number(index)?.to_string();
        let output = Command::new("pdftotext")
            .args(["-enc", "UTF-8", "-f", &page, "-l", &page])
            .arg(&self.path)
            .arg("-") // Output to stdout
            .output();

        handle_cmd_output(
            output,
            PDFTOTEXT_NOT_FOUND,
            &format!("pdftotext failed on page {}", page),
        )
    }

    fn render_page(&self, index: u32, dpi: u32) -> Result<RenderedPage, ExtractionError> {
        let page = self.page_number(index)?;
        Ok(render_pdf_page(&self.path, page, dpi)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_count() {
        let info = "Title:          Report\nProducer:       LaTeX\nPages:          12\nEncrypted:      no\n";
        assert_eq!(parse_page_count(info), Some(12));
        assert_eq!(parse_page_count("Title: x\n"), None);
        assert_eq!(parse_page_count("Pages: many\n"), None);
    }

    #[test]
    fn test_open_missing_file() {
        let err = PopplerOpener::new()
            .open(Path::new("/nonexistent/pagevault/missing.pdf"))
            .err()
            .unwrap();
        assert!(matches!(err, ExtractionError::OpenFailed { .. }));
    }

    #[test]
    fn test_page_out_of_range() {
        let doc = PopplerDocument {
            path: PathBuf::from("/tmp/none.pdf"),
            page_count: 2,
        };
        assert!(matches!(
            doc.page_text(2),
            Err(ExtractionError::PageOutOfRange(3))
        ));
    }
}
