//! Upload command.

use std::path::PathBuf;

use console::style;

use crate::config::Settings;
use crate::services::UploadError;

use super::helpers::{ingest_service, open_database};

/// Upload PDFs: store each file, then extract and save its pages.
pub async fn cmd_upload(settings: &Settings, files: &[PathBuf]) -> anyhow::Result<()> {
    if files.len() > settings.max_upload_files {
        println!(
            "{} You can upload a maximum of {} PDFs at a time.",
            style("!").yellow(),
            settings.max_upload_files
        );
        return Ok(());
    }

    let ctx = open_database(settings).await?;
    let service = ingest_service(settings, ctx);

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) => {
                println!("{} Failed to read {}: {}", style("✗").red(), name, e);
                continue;
            }
        };

        let outcome = match service.upload(&name, &content).await {
            Ok(outcome) => outcome,
            Err(e @ UploadError::InvalidPdf(_)) => {
                println!("{} {}", style("✗").red(), e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        println!(
            "{} {} uploaded as {} | {} pages saved, {} failed",
            style("✓").green(),
            outcome.filename,
            style(&outcome.source_id).cyan(),
            outcome.summary.success,
            outcome.summary.failed
        );

        if let Some(preview) = outcome.preview {
            println!("\n{}", style(format!("{} - Page 1", outcome.filename)).bold());
            println!("{}", "-".repeat(60));
            println!("{}\n", preview);
        }
    }

    println!(
        "{} All files processed and saved with unique source ids.",
        style("✓").green()
    );
    Ok(())
}
