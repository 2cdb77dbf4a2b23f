//! Database context for managing connections and repository access.
//!
//! Provides a unified entry point for database operations using Diesel ORM
//! over SQLite (via SyncConnectionWrapper).

use std::path::Path;

use diesel_async::SimpleAsyncConnection;

use super::page::PageRepository;
use super::pool::{DbError, SqlitePool};
use super::source::SourceRepository;
use super::util::{to_diesel_error, validate_database_url};

/// Database context that owns the connection factory and hands out repositories.
///
/// Create one context per command or service, then use it to access all repositories.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_path(&db_path);
/// ctx.init_schema().await?;
/// let pages = ctx.pages().get_pages("3f2a...").await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbContext {
    pool: SqlitePool,
}

impl DbContext {
    /// Create a new database context from a file path.
    pub fn from_path(db_path: &Path) -> Self {
        Self {
            pool: SqlitePool::from_path(db_path),
        }
    }

    /// Create a new database context from a database URL.
    ///
    /// Accepts `sqlite:path/to/db.sqlite` URLs or plain file paths.
    pub fn from_url(database_url: &str) -> Result<Self, DbError> {
        validate_database_url(database_url).map_err(to_diesel_error)?;
        Ok(Self {
            pool: SqlitePool::new(database_url),
        })
    }

    /// Get a source repository.
    pub fn sources(&self) -> SourceRepository {
        SourceRepository::new(self.pool.clone())
    }

    /// Get a page repository.
    pub fn pages(&self) -> PageRepository {
        PageRepository::new(self.pool.clone())
    }

    /// Initialize the database schema.
    ///
    /// This creates the necessary tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(
            r#"
            -- Uploaded source documents
            CREATE TABLE IF NOT EXISTS sources (
                source_id TEXT PRIMARY KEY,
                filename TEXT NOT NULL,
                content_hash TEXT,
                file_path TEXT,
                uploaded_at TEXT NOT NULL
            );

            -- One row per extracted page
            CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_id TEXT NOT NULL,
                page_number INTEGER NOT NULL,
                text TEXT NOT NULL,
                word_count INTEGER NOT NULL DEFAULT 0,
                used_ocr BOOLEAN NOT NULL DEFAULT 0,
                parse_errors INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                UNIQUE(source_id, page_number)
            );

            CREATE INDEX IF NOT EXISTS idx_pages_source ON pages(source_id);
            "#,
        )
        .await
    }

    /// List user tables in the database.
    pub async fn list_tables(&self) -> Result<Vec<String>, DbError> {
        #[derive(diesel::QueryableByName)]
        struct TableName {
            #[diesel(sql_type = diesel::sql_types::Text)]
            name: String,
        }

        let mut conn = self.pool.get().await?;
        let tables: Vec<TableName> = diesel_async::RunQueryDsl::load(
            diesel::sql_query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            ),
            &mut conn,
        )
        .await?;

        Ok(tables.into_iter().map(|t| t.name).collect())
    }

    /// Test that a connection can be established and queried.
    pub async fn test_connection(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute("SELECT 1").await
    }
}
