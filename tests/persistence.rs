//! Upload flow and page persistence against a temporary SQLite database.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{fake_ingestor, FakeOpener, FakePage};
use pagevault::models::{PageRecord, SaveSummary};
use pagevault::repository::{save_pages, DbContext, DbError};
use pagevault::services::{IngestService, UploadError};
use pagevault::utils::{SourceIdError, SourceIdGenerator, SourceIdRegistry};
use tempfile::{tempdir, TempDir};

async fn setup(opener: FakeOpener) -> (IngestService, DbContext, std::sync::Arc<FakeOpener>, TempDir) {
    let dir = tempdir().unwrap();
    let ctx = DbContext::from_path(&dir.path().join("pagevault.db"));
    ctx.init_schema().await.unwrap();

    let (ingestor, opener, _ocr, _observer) = fake_ingestor(opener);
    let service = IngestService::new(ctx.clone(), ingestor, dir.path().join("storage"));
    (service, ctx, opener, dir)
}

#[tokio::test]
async fn upload_stores_file_source_and_pages() {
    let (service, ctx, _opener, dir) = setup(FakeOpener::with_pages(vec![
        FakePage::Native("Hello world"),
        FakePage::Scanned("Scanned Text"),
        FakePage::Native("Hello world"),
    ]))
    .await;

    let content = b"%PDF-1.7\nfake body";
    let outcome = service.upload("report.pdf", content).await.unwrap();

    assert_eq!(outcome.source_id.len(), 32);
    assert_eq!(outcome.filename, "report.pdf");
    assert_eq!(outcome.summary, SaveSummary { success: 3, failed: 0 });
    assert_eq!(outcome.preview.as_deref(), Some("Hello world"));
    assert_eq!(
        outcome.stored_path,
        dir.path()
            .join("storage")
            .join(format!("{}.pdf", outcome.source_id))
    );
    assert_eq!(std::fs::read(&outcome.stored_path).unwrap(), content);

    let source = ctx.sources().get(&outcome.source_id).await.unwrap().unwrap();
    assert_eq!(source.filename, "report.pdf");
    assert_eq!(source.file_path, Some(outcome.stored_path.clone()));
    assert_eq!(source.content_hash.as_deref().map(str::len), Some(64));

    let pages = ctx.pages().get_pages(&outcome.source_id).await.unwrap();
    assert_eq!(pages.len(), 3);
    assert!(pages[1].used_ocr());
    assert_eq!(pages[1].text(), "Scanned Text");
}

#[tokio::test]
async fn invalid_signature_rejected_before_parsing() {
    let (service, ctx, opener, dir) =
        setup(FakeOpener::with_pages(vec![FakePage::Native("unused")])).await;

    let err = service
        .upload("notes.txt", b"just some text")
        .await
        .unwrap_err();

    assert!(matches!(err, UploadError::InvalidPdf(ref name) if name == "notes.txt"));
    assert_eq!(opener.open_count(), 0);
    assert!(ctx.sources().get_all().await.unwrap().is_empty());
    assert!(!dir.path().join("storage").exists());
}

#[tokio::test]
async fn unreadable_pdf_saves_nothing() {
    let (service, ctx, _opener, _dir) = setup(FakeOpener::failing()).await;

    let outcome = service.upload("corrupt.pdf", b"%PDF-garbage").await.unwrap();

    assert_eq!(outcome.summary, SaveSummary::default());
    assert!(outcome.preview.is_none());
    assert_eq!(ctx.pages().count_pages(&outcome.source_id).await.unwrap(), 0);
    // The source row is kept even though no pages were extracted.
    assert!(ctx.sources().exists(&outcome.source_id).await.unwrap());
}

#[tokio::test]
async fn preview_is_capped() {
    let long_text: &'static str = Box::leak("word ".repeat(400).into_boxed_str());
    let (service, _ctx, _opener, _dir) =
        setup(FakeOpener::with_pages(vec![FakePage::Native(long_text)])).await;

    let outcome = service.upload("long.pdf", b"%PDF-1.4").await.unwrap();

    assert_eq!(outcome.preview.map(|p| p.chars().count()), Some(1000));
}

#[tokio::test]
async fn failed_first_page_has_empty_preview() {
    let (service, _ctx, _opener, _dir) = setup(FakeOpener::with_pages(vec![
        FakePage::TextError,
        FakePage::Native("second page"),
    ]))
    .await;

    let outcome = service.upload("partial.pdf", b"%PDF-1.4").await.unwrap();

    assert_eq!(outcome.summary, SaveSummary { success: 2, failed: 0 });
    assert_eq!(outcome.preview.as_deref(), Some(""));
}

#[tokio::test]
async fn reingest_counts_duplicates_as_failed() {
    let (service, ctx, _opener, dir) = setup(FakeOpener::with_pages(vec![
        FakePage::Native("one"),
        FakePage::Native("two"),
    ]))
    .await;

    let path = dir.path().join("doc.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let first = service.parse_and_store(&path, "fixed").await.unwrap();
    assert_eq!(first, SaveSummary { success: 2, failed: 0 });

    let second = service.parse_and_store(&path, "fixed").await.unwrap();
    assert_eq!(second, SaveSummary { success: 0, failed: 2 });
    assert_eq!(ctx.pages().count_pages("fixed").await.unwrap(), 2);
}

#[tokio::test]
async fn one_bad_insert_does_not_abort_batch() {
    let dir = tempdir().unwrap();
    let ctx = DbContext::from_path(&dir.path().join("pagevault.db"));
    ctx.init_schema().await.unwrap();
    let repo = ctx.pages();

    // Page 3 already exists, so inserting it again violates the unique key.
    let seeded = repo
        .save_all(&[PageRecord::new("batch", 3, "earlier", false, 0)])
        .await
        .unwrap();
    assert_eq!(seeded.success, 1);

    let records: Vec<PageRecord> = (1..=5)
        .map(|n| PageRecord::new("batch", n, format!("page {n}"), false, 0))
        .collect();
    let summary = save_pages(repo.begin().await.unwrap(), &records).await;

    assert_eq!(summary, SaveSummary { success: 4, failed: 1 });
    assert_eq!(summary.total(), records.len());
    assert_eq!(repo.count_pages("batch").await.unwrap(), 5);
    let kept = repo.get_page("batch", 3).await.unwrap().unwrap();
    assert_eq!(kept.text(), "earlier");
}

struct AlwaysTaken {
    lookups: AtomicUsize,
}

#[async_trait]
impl SourceIdRegistry for AlwaysTaken {
    async fn is_taken(&self, _candidate: &str) -> Result<bool, DbError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

#[tokio::test]
async fn id_generation_gives_up_after_eight_collisions() {
    let registry = AlwaysTaken {
        lookups: AtomicUsize::new(0),
    };

    let err = SourceIdGenerator::with_registry(&registry)
        .with_length(Some(8))
        .unique_id()
        .await
        .unwrap_err();

    assert!(matches!(err, SourceIdError::Exhausted { attempts: 8 }));
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 8);
}
