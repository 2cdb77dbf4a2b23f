//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM over SQLite.

pub mod context;
pub mod models;
pub mod page;
pub mod pool;
pub mod source;
pub mod util;

pub use context::DbContext;
pub use page::{save_pages, PageRepository, PageTransaction, SqlitePageTransaction};
pub use pool::{DbError, SqliteConn, SqlitePool};
pub use source::SourceRepository;

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}
