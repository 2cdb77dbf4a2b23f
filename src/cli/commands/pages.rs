//! Page inspection command.

use console::style;

use crate::config::Settings;
use crate::models::PageRecord;

use super::helpers::open_database;

/// Show stored pages of a source.
pub async fn cmd_pages(
    settings: &Settings,
    source_id: &str,
    page: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let ctx = open_database(settings).await?;
    let repo = ctx.pages();

    let pages: Vec<PageRecord> = match page {
        Some(n) => repo.get_page(source_id, n).await?.into_iter().collect(),
        None => repo.get_pages(source_id).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    if pages.is_empty() {
        println!("{} No pages found for {}", style("!").yellow(), source_id);
        return Ok(());
    }

    for page in &pages {
        let mut flags = Vec::new();
        if page.used_ocr() {
            flags.push(style("ocr").cyan().to_string());
        }
        if page.is_failed() {
            flags.push(style("error").red().to_string());
        }

        println!(
            "\n{} {} ({} words) {}",
            style("Page").bold(),
            style(page.page_number()).bold(),
            page.word_count(),
            flags.join(" ")
        );
        println!("{}", "-".repeat(60));
        println!("{}", page.text());
    }

    Ok(())
}
