//! Data models for pagevault.

mod page;
mod source;

pub use page::{PageRecord, SaveSummary};
pub use source::SourceDocument;
