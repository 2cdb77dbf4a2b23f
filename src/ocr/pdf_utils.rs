//! PDF page rasterization for OCR input.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use image::GenericImageView;

use super::backend::OcrError;
use super::model_utils::PDFTOPPM_NOT_FOUND;

/// A page rendered to an in-memory PNG.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Resolution the page was rendered at.
    pub dpi: u32,
}

impl RenderedPage {
    /// Wrap PNG bytes, verifying they decode and recording the dimensions.
    pub fn from_png(png: Vec<u8>, dpi: u32) -> Result<Self, OcrError> {
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .map_err(|e| OcrError::ImageError(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        Ok(Self {
            png,
            width,
            height,
            dpi,
        })
    }
}

/// Render one page (1-indexed) of a PDF to PNG using pdftoppm.
///
/// The image is captured from stdout; nothing is written to disk.
pub fn render_pdf_page(pdf_path: &Path, page: u32, dpi: u32) -> Result<RenderedPage, OcrError> {
    let page_str = page.to_string();
    let dpi_str = dpi.to_string();
    tracing::trace!(page, dpi, "Rendering page");

    let output = Command::new("pdftoppm")
        .args(["-png", "-r", &dpi_str, "-f", &page_str, "-l", &page_str, "-singlefile"])
        .arg(pdf_path)
        .output();

    match output {
        Ok(output) if output.status.success() => {
            if output.stdout.is_empty() {
                return Err(OcrError::OcrFailed(format!(
                    "No image generated for page {}",
                    page
                )));
            }
            RenderedPage::from_png(output.stdout, dpi)
        }
        Ok(output) => Err(OcrError::OcrFailed(format!(
            "pdftoppm failed to convert page {}: {}",
            page,
            String::from_utf8_lossy(&output.stderr).trim()
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(OcrError::BackendNotAvailable(
            PDFTOPPM_NOT_FOUND.to_string(),
        )),
        Err(e) => Err(OcrError::Io(e)),
    }
}
