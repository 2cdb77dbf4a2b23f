//! Shared fakes for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pagevault::extract::{
    DocumentIngestor, DocumentOpener, ExtractionError, IngestEvent, IngestObserver, PdfDocument,
};
use pagevault::ocr::{OcrBackend, OcrError, RenderedPage};

/// How a fake page behaves.
#[derive(Debug, Clone)]
pub enum FakePage {
    /// Embedded text layer.
    Native(&'static str),
    /// No usable text layer; OCR recognizes the given text.
    Scanned(&'static str),
    /// Reading the text layer fails.
    TextError,
    /// Text layer is empty and rendering fails.
    RenderError,
}

pub struct FakeDocument {
    pages: Vec<FakePage>,
}

impl PdfDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, index: u32) -> Result<String, ExtractionError> {
        match self.pages.get(index as usize) {
            Some(FakePage::Native(text)) => Ok(text.to_string()),
            Some(FakePage::Scanned(_)) => Ok("  \n\t ".to_string()),
            Some(FakePage::RenderError) => Ok(String::new()),
            Some(FakePage::TextError) => Err(ExtractionError::ExtractionFailed(
                "broken content stream".to_string(),
            )),
            None => Err(ExtractionError::PageOutOfRange(index + 1)),
        }
    }

    fn render_page(&self, index: u32, dpi: u32) -> Result<RenderedPage, ExtractionError> {
        match self.pages.get(index as usize) {
            // The fake OCR engine reads the "pixels" back as text.
            Some(FakePage::Scanned(text)) => Ok(RenderedPage {
                png: text.as_bytes().to_vec(),
                width: 1,
                height: 1,
                dpi,
            }),
            _ => Err(ExtractionError::Ocr(OcrError::ImageError(
                "render failed".to_string(),
            ))),
        }
    }
}

/// Opener that hands out the same fake document for every path, or fails.
pub struct FakeOpener {
    pages: Option<Vec<FakePage>>,
    pub opens: AtomicUsize,
}

impl FakeOpener {
    pub fn with_pages(pages: Vec<FakePage>) -> Self {
        Self {
            pages: Some(pages),
            opens: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: None,
            opens: AtomicUsize::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl DocumentOpener for FakeOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ExtractionError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        match &self.pages {
            Some(pages) => Ok(Box::new(FakeDocument {
                pages: pages.clone(),
            })),
            None => Err(ExtractionError::OpenFailed {
                path: path.display().to_string(),
                reason: "not a PDF".to_string(),
            }),
        }
    }
}

/// OCR engine that decodes the fake page image as UTF-8 text.
pub struct EchoOcr {
    pub calls: AtomicUsize,
    pub dpis: Mutex<Vec<u32>>,
}

impl EchoOcr {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            dpis: Mutex::new(Vec::new()),
        }
    }

    /// Resolution of every image handed to the engine.
    pub fn seen_dpis(&self) -> Vec<u32> {
        self.dpis.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrBackend for EchoOcr {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        String::new()
    }

    fn run_ocr(&self, image: &RenderedPage) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.dpis.lock().unwrap().push(image.dpi);
        Ok(String::from_utf8_lossy(&image.png).to_string())
    }
}

/// OCR engine that is never installed.
pub struct MissingOcr;

impl OcrBackend for MissingOcr {
    fn name(&self) -> &'static str {
        "missing"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn availability_hint(&self) -> String {
        "install nothing".to_string()
    }

    fn run_ocr(&self, _image: &RenderedPage) -> Result<String, OcrError> {
        Err(OcrError::BackendNotAvailable("missing".to_string()))
    }
}

/// Observer that keeps every event.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<IngestEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<IngestEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl IngestObserver for RecordingObserver {
    fn on_event(&self, event: &IngestEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Ingestor wired to fakes, returning handles to inspect them.
pub fn fake_ingestor(
    opener: FakeOpener,
) -> (
    DocumentIngestor,
    Arc<FakeOpener>,
    Arc<EchoOcr>,
    Arc<RecordingObserver>,
) {
    let opener = Arc::new(opener);
    let ocr = Arc::new(EchoOcr::new());
    let observer = Arc::new(RecordingObserver::default());
    let ingestor = DocumentIngestor::new(opener.clone(), ocr.clone()).with_observer(observer.clone());
    (ingestor, opener, ocr, observer)
}
