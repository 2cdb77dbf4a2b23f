//! Source listing command.

use console::style;

use crate::config::Settings;

use super::helpers::{open_database, truncate};

/// List uploaded sources.
pub async fn cmd_sources(settings: &Settings) -> anyhow::Result<()> {
    let ctx = open_database(settings).await?;
    let sources = ctx.sources().get_all().await?;

    if sources.is_empty() {
        println!(
            "{} No sources uploaded. Run 'pagevault upload <FILE>' first.",
            style("!").yellow()
        );
        return Ok(());
    }

    let pages = ctx.pages();

    println!("\n{}", style("Sources").bold());
    println!("{}", "-".repeat(80));
    println!("{:<34} {:<28} {:>6} Uploaded", "ID", "Filename", "Pages");
    println!("{}", "-".repeat(80));

    for source in sources {
        let count = pages.count_pages(&source.source_id).await?;
        println!(
            "{:<34} {:<28} {:>6} {}",
            source.source_id,
            truncate(&source.filename, 27),
            count,
            source.uploaded_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
