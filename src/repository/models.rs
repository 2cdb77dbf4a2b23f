//! Diesel ORM models for database tables.

use diesel::prelude::*;

use crate::schema;

/// Source record from the database.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = schema::sources)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SourceRow {
    pub source_id: String,
    pub filename: String,
    pub content_hash: Option<String>,
    pub file_path: Option<String>,
    pub uploaded_at: String,
}

/// New source for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::sources)]
pub struct NewSourceRow<'a> {
    pub source_id: &'a str,
    pub filename: &'a str,
    pub content_hash: Option<&'a str>,
    pub file_path: Option<&'a str>,
    pub uploaded_at: &'a str,
}

/// Page record from the database.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = schema::pages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PageRow {
    pub id: i32,
    pub source_id: String,
    pub page_number: i32,
    pub text: String,
    pub word_count: i32,
    pub used_ocr: bool,
    pub parse_errors: i32,
    pub created_at: String,
}

/// New page for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::pages)]
pub struct NewPageRow<'a> {
    pub source_id: &'a str,
    pub page_number: i32,
    pub text: &'a str,
    pub word_count: i32,
    pub used_ocr: bool,
    pub parse_errors: i32,
    pub created_at: &'a str,
}
