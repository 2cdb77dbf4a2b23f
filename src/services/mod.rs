//! Service layer for pagevault business logic.
//!
//! This module contains domain logic separated from UI concerns.
//! Services can be used by the CLI or any other interface.

pub mod ingest;

pub use ingest::{IngestService, UploadError, UploadOutcome, PREVIEW_CHARS};
