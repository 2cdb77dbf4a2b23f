//! Page repository and batch persistence.
//!
//! Pages are written through a [`PageTransaction`]: a scoped handle that owns
//! one connection with an open transaction. [`save_pages`] consumes the
//! handle and always finishes it with a commit or a rollback. A handle that
//! is dropped unfinished closes its connection, and SQLite discards the
//! pending transaction.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{RunQueryDsl, SimpleAsyncConnection};
use tracing::{error, info, warn};

use super::models::{NewPageRow, PageRow};
use super::pool::{DbError, SqliteConn, SqlitePool};
use super::util::to_diesel_error;
use crate::models::{PageRecord, SaveSummary};
use crate::schema::pages;

/// Convert a database record to a domain model.
impl From<PageRow> for PageRecord {
    fn from(row: PageRow) -> Self {
        PageRecord::new(
            row.source_id,
            u32::try_from(row.page_number).unwrap_or(0),
            row.text,
            row.used_ocr,
            u32::try_from(row.parse_errors).unwrap_or(0),
        )
    }
}

/// An open write transaction for page records.
#[async_trait]
pub trait PageTransaction: Send {
    /// Insert one page record.
    async fn insert_page(&mut self, page: &PageRecord) -> Result<(), DbError>;

    /// Commit everything inserted so far.
    async fn commit(&mut self) -> Result<(), DbError>;

    /// Discard everything inserted so far.
    async fn rollback(&mut self) -> Result<(), DbError>;

    /// Whether the transaction is still open. An engine may abort the whole
    /// transaction on some insert errors, after which nothing can commit.
    fn is_open(&self) -> bool {
        true
    }
}

/// SQLite transaction opened with `BEGIN` on a dedicated connection.
///
/// Each insert runs inside its own savepoint so a failed row is undone
/// without touching the rest of the batch.
pub struct SqlitePageTransaction {
    conn: SqliteConn,
    open: bool,
}

impl SqlitePageTransaction {
    async fn begin(mut conn: SqliteConn) -> Result<Self, DbError> {
        conn.batch_execute("BEGIN").await?;
        Ok(Self { conn, open: true })
    }

    async fn insert_row(&mut self, page: &PageRecord) -> Result<(), DbError> {
        let created_at = Utc::now().to_rfc3339();

        diesel::insert_into(pages::table)
            .values(&NewPageRow {
                source_id: page.source_id(),
                page_number: i32::try_from(page.page_number()).map_err(to_diesel_error)?,
                text: page.text(),
                word_count: i32::try_from(page.word_count()).map_err(to_diesel_error)?,
                used_ocr: page.used_ocr(),
                parse_errors: i32::try_from(page.parse_errors()).map_err(to_diesel_error)?,
                created_at: &created_at,
            })
            .execute(&mut self.conn)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PageTransaction for SqlitePageTransaction {
    async fn insert_page(&mut self, page: &PageRecord) -> Result<(), DbError> {
        if !self.open {
            return Err(to_diesel_error("transaction is no longer open"));
        }

        self.conn.batch_execute("SAVEPOINT page_insert").await?;
        match self.insert_row(page).await {
            Ok(()) => self.conn.batch_execute("RELEASE page_insert").await,
            Err(e) => {
                // The savepoint is gone if SQLite already rolled back the transaction.
                if let Err(lost) = self
                    .conn
                    .batch_execute("ROLLBACK TO page_insert; RELEASE page_insert")
                    .await
                {
                    warn!("Transaction aborted by insert error: {}", lost);
                    self.open = false;
                }
                Err(e)
            }
        }
    }

    async fn commit(&mut self) -> Result<(), DbError> {
        self.conn.batch_execute("COMMIT").await
    }

    async fn rollback(&mut self) -> Result<(), DbError> {
        self.conn.batch_execute("ROLLBACK").await
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Insert a batch of page records and commit once.
///
/// Individual insert failures are counted and do not stop the batch. If an
/// insert error aborts the transaction, or the commit fails, nothing is
/// persisted and every record counts as failed. `success + failed` always
/// equals `pages.len()`.
pub async fn save_pages(mut tx: Box<dyn PageTransaction>, pages: &[PageRecord]) -> SaveSummary {
    let mut summary = SaveSummary::default();
    let all_failed = SaveSummary {
        success: 0,
        failed: pages.len(),
    };

    for page in pages {
        match tx.insert_page(page).await {
            Ok(()) => summary.success += 1,
            Err(e) => {
                error!(
                    "Failed to save page {} of {}: {}",
                    page.page_number(),
                    page.source_id(),
                    e
                );
                summary.failed += 1;
            }
        }

        if !tx.is_open() {
            error!(
                "Transaction aborted at page {} of {}; discarding {} pages",
                page.page_number(),
                page.source_id(),
                pages.len()
            );
            return all_failed;
        }
    }

    if let Err(e) = tx.commit().await {
        error!("Failed to commit pages: {}", e);
        if let Err(e) = tx.rollback().await {
            warn!("Rollback after failed commit also failed: {}", e);
        }
        summary = all_failed;
    }

    info!(
        "Saved {} pages, failed {} pages",
        summary.success, summary.failed
    );
    summary
}

/// Page repository.
#[derive(Debug, Clone)]
pub struct PageRepository {
    pool: SqlitePool,
}

impl PageRepository {
    /// Create a new page repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a write transaction on a fresh connection.
    pub async fn begin(&self) -> Result<Box<dyn PageTransaction>, DbError> {
        let conn = self.pool.get().await?;
        Ok(Box::new(SqlitePageTransaction::begin(conn).await?))
    }

    /// Insert `records` in a single transaction.
    pub async fn save_all(&self, records: &[PageRecord]) -> Result<SaveSummary, DbError> {
        let tx = self.begin().await?;
        Ok(save_pages(tx, records).await)
    }

    /// Get a single page.
    pub async fn get_page(
        &self,
        source_id: &str,
        page_number: u32,
    ) -> Result<Option<PageRecord>, DbError> {
        let mut conn = self.pool.get().await?;
        let page_number = i32::try_from(page_number).map_err(to_diesel_error)?;

        pages::table
            .filter(pages::source_id.eq(source_id))
            .filter(pages::page_number.eq(page_number))
            .select(PageRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(PageRecord::from))
    }

    /// Get all pages of a source in page order.
    pub async fn get_pages(&self, source_id: &str) -> Result<Vec<PageRecord>, DbError> {
        let mut conn = self.pool.get().await?;

        pages::table
            .filter(pages::source_id.eq(source_id))
            .order(pages::page_number.asc())
            .select(PageRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(PageRecord::from).collect())
    }

    /// Count stored pages for a source.
    pub async fn count_pages(&self, source_id: &str) -> Result<u64, DbError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = pages::table
            .filter(pages::source_id.eq(source_id))
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count as u64)
    }
}
