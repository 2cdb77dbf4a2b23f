//! Shared utility functions.
//!
//! - `pdf`: cheap signature check for uploaded bytes
//! - `source_id`: random source identifiers with optional uniqueness checks

mod pdf;
mod source_id;

pub use pdf::{is_pdf_bytes, PDF_SIGNATURE};
pub use source_id::{
    generate_source_id, SourceIdError, SourceIdGenerator, SourceIdRegistry,
    MAX_SOURCE_ID_ATTEMPTS, SOURCE_ID_HEX_LEN,
};
