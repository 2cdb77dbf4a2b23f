//! Progress display for document ingestion.

use indicatif::{ProgressBar, ProgressStyle};

use crate::extract::{IngestEvent, IngestObserver, TracingObserver};

/// Drives a page progress bar from pipeline events and forwards them to `tracing`.
pub struct IngestProgress {
    pb: ProgressBar,
    inner: TracingObserver,
}

impl IngestProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Self {
            pb,
            inner: TracingObserver,
        }
    }
}

impl Default for IngestProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestObserver for IngestProgress {
    fn on_event(&self, event: &IngestEvent) {
        match event {
            IngestEvent::Opened { page_count, .. } => {
                self.pb.reset();
                self.pb.set_length(u64::from(*page_count));
                self.pb.set_message("Extracting pages...");
            }
            IngestEvent::PageExtracted {
                page_number,
                used_ocr,
                ..
            } => {
                if *used_ocr {
                    self.pb.set_message(format!("Page {} (OCR)", page_number));
                } else {
                    self.pb.set_message(format!("Page {}", page_number));
                }
                self.pb.inc(1);
            }
            IngestEvent::PageFailed { page_number, .. } => {
                self.pb.set_message(format!("Page {} failed", page_number));
                self.pb.inc(1);
            }
            IngestEvent::Parsed { .. } | IngestEvent::OpenFailed { .. } => {
                self.pb.finish_and_clear();
            }
        }
        self.pb.suspend(|| self.inner.on_event(event));
    }
}
