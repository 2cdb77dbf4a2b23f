//! Tesseract OCR backend implementation.
//!
//! Uses the Tesseract command-line tool. The rendered PNG is piped on stdin
//! and the recognized text read from stdout.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use super::backend::{OcrBackend, OcrConfig, OcrError};
use super::model_utils::{check_binary, TESSERACT_NOT_FOUND};
use super::pdf_utils::RenderedPage;

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract backend with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    /// OCR language passed to `-l`.
    pub fn language(&self) -> &str {
        &self.config.language
    }

    /// Arguments for reading a PNG from stdin and writing text to stdout.
    fn tesseract_args(&self) -> [&str; 4] {
        ["stdin", "stdout", "-l", &self.config.language]
    }

    fn run_tesseract(&self, png: &[u8]) -> Result<String, OcrError> {
        let mut child = match Command::new("tesseract")
            .args(self.tesseract_args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OcrError::BackendNotAvailable(
                    TESSERACT_NOT_FOUND.to_string(),
                ))
            }
            Err(e) => return Err(OcrError::Io(e)),
        };

        // Feed stdin from a separate thread so a full stdout pipe cannot deadlock us.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(png)?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::OcrFailed(format!(
                "tesseract failed: {}",
                stderr.trim()
            )));
        }
        written?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else if !check_binary("pdftoppm") {
            "pdftoppm not installed. Install with: apt install poppler-utils".to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn run_ocr(&self, image: &RenderedPage) -> Result<String, OcrError> {
        self.run_tesseract(&image.png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(TesseractBackend::new().language(), "eng");
        assert_eq!(TesseractBackend::default().name(), "tesseract");
    }

    #[test]
    fn test_custom_language() {
        let backend = TesseractBackend::with_config(OcrConfig {
            language: "deu".to_string(),
        });
        assert_eq!(backend.language(), "deu");
        assert_eq!(backend.tesseract_args(), ["stdin", "stdout", "-l", "deu"]);
    }

    #[test]
    fn test_default_args_request_english() {
        let backend = TesseractBackend::new();
        assert_eq!(backend.tesseract_args(), ["stdin", "stdout", "-l", "eng"]);
    }
}
