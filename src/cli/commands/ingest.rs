//! Ingest command for files already on disk.

use std::path::Path;

use console::style;

use crate::config::Settings;

use super::helpers::{ingest_service, open_database};

/// Parse a PDF and store its pages under an existing source id.
pub async fn cmd_ingest(settings: &Settings, file: &Path, source_id: &str) -> anyhow::Result<()> {
    if !file.is_file() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let ctx = open_database(settings).await?;
    if !ctx.sources().exists(source_id).await? {
        println!(
            "{} Source '{}' is not registered; pages will still be stored",
            style("!").yellow(),
            source_id
        );
    }

    let summary = ingest_service(settings, ctx)
        .parse_and_store(file, source_id)
        .await?;

    println!(
        "{} {} | {} pages saved, {} failed",
        style("✓").green(),
        file.display(),
        summary.success,
        summary.failed
    );
    Ok(())
}
