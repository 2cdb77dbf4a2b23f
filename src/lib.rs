//! pagevault - PDF ingestion with per-page text extraction.
//!
//! Uploaded PDFs are stored on disk, split into pages, and each page's text
//! is taken from the embedded text layer or, for scanned pages, recognized
//! with OCR. Page records are persisted to SQLite for later retrieval.

pub mod cli;
pub mod config;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod repository;
pub mod schema;
pub mod services;
pub mod storage;
pub mod utils;
