//! Seed command handler

use colored::Colorize;

use crate::context::CoachContext;
use crate::error::Result;
use crate::seed::seed_catalog;

/// Handle the seed command
pub async fn handle_seed(context: &CoachContext) -> Result<()> {
    let report = seed_catalog(context.database().clone()).await?;

    if report.added.is_empty() {
        println!("{}", "Catalog already seeded, nothing to add".yellow());
    } else {
        println!(
            "{}",
            format!("✓ Seeded {} foods", report.added.len()).green().bold()
        );
        for name in &report.added {
            println!("  + {}", name);
        }
    }

    if !report.skipped.is_empty() && !report.added.is_empty() {
        println!(
            "{}",
            format!("Skipped {} existing: {}", report.skipped.len(), report.skipped.join(", "))
                .yellow()
        );
    }

    Ok(())
}
