//! Initialize command.

use console::style;

use crate::config::Settings;

use super::helpers::open_database;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let ctx = open_database(settings).await?;
    let tables = ctx.list_tables().await?;

    println!(
        "{} Initialized pagevault in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    println!("  Database: {}", settings.database_url());
    println!("  Storage:  {}", settings.documents_dir.display());
    println!("  Tables:   {}", tables.join(", "));

    Ok(())
}
