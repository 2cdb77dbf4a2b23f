//! External tool check command.

use console::style;

use crate::ocr::{check_tools, install_hint};

/// Report whether the PDF and OCR tools are installed.
pub async fn cmd_check() -> anyhow::Result<()> {
    println!("\n{}", style("External tools").bold());
    println!("{}", "-".repeat(40));

    let mut missing = 0;
    for (tool, available) in check_tools() {
        if available {
            println!("{} {}", style("✓").green(), tool);
        } else {
            missing += 1;
            println!(
                "{} {}",
                style("✗").red(),
                install_hint(&tool).unwrap_or(tool.as_str())
            );
        }
    }

    if missing > 0 {
        println!(
            "\n{} {} tool(s) missing; affected pages will be recorded with parse errors",
            style("!").yellow(),
            missing
        );
    } else {
        println!("\n{} All tools available", style("✓").green());
    }

    Ok(())
}
