//! Source repository for uploaded documents.

use std::path::PathBuf;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewSourceRow, SourceRow};
use super::parse_datetime;
use super::pool::{DbError, SqlitePool};
use crate::models::SourceDocument;
use crate::schema::sources;
use crate::utils::SourceIdRegistry;

/// Convert a database record to a domain model.
impl From<SourceRow> for SourceDocument {
    fn from(record: SourceRow) -> Self {
        SourceDocument {
            source_id: record.source_id,
            filename: record.filename,
            content_hash: record.content_hash,
            file_path: record.file_path.map(PathBuf::from),
            uploaded_at: parse_datetime(&record.uploaded_at),
        }
    }
}

/// Source repository.
#[derive(Debug, Clone)]
pub struct SourceRepository {
    pool: SqlitePool,
}

impl SourceRepository {
    /// Create a new source repository with an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a source by ID.
    pub async fn get(&self, source_id: &str) -> Result<Option<SourceDocument>, DbError> {
        let mut conn = self.pool.get().await?;

        sources::table
            .find(source_id)
            .select(SourceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(SourceDocument::from))
    }

    /// Get all sources, most recent upload first.
    pub async fn get_all(&self) -> Result<Vec<SourceDocument>, DbError> {
        let mut conn = self.pool.get().await?;

        sources::table
            .order(sources::uploaded_at.desc())
            .select(SourceRow::as_select())
            .load(&mut conn)
            .await
            .map(|records| records.into_iter().map(SourceDocument::from).collect())
    }

    /// Insert a new source. Fails if the identifier is already taken.
    pub async fn save(&self, source: &SourceDocument) -> Result<(), DbError> {
        let mut conn = self.pool.get().await?;

        let uploaded_at = source.uploaded_at.to_rfc3339();
        let file_path = source.file_path.as_ref().map(|p| p.display().to_string());

        diesel::insert_into(sources::table)
            .values(&NewSourceRow {
                source_id: &source.source_id,
                filename: &source.filename,
                content_hash: source.content_hash.as_deref(),
                file_path: file_path.as_deref(),
                uploaded_at: &uploaded_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Check if a source exists.
    pub async fn exists(&self, source_id: &str) -> Result<bool, DbError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = sources::table
            .filter(sources::source_id.eq(source_id))
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count > 0)
    }
}

#[async_trait]
impl SourceIdRegistry for SourceRepository {
    async fn is_taken(&self, candidate: &str) -> Result<bool, DbError> {
        self.exists(candidate).await
    }
}
