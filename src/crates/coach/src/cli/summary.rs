//! Day summary command handler

use colored::Colorize;
use tabled::{Table, Tabled};

use crate::cli::helpers::{fmt_macro, parse_date_arg};
use crate::context::CoachContext;
use crate::error::Result;
use crate::models::DaySummary;

/// Summary display row for table output
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Food")]
    food: String,
    #[tabled(rename = "Serving")]
    serving: String,
    #[tabled(rename = "Qty")]
    qty: String,
    #[tabled(rename = "Cal")]
    cal: String,
    #[tabled(rename = "Protein")]
    protein: String,
    #[tabled(rename = "Carbs")]
    carbs: String,
    #[tabled(rename = "Fat")]
    fat: String,
}

/// Handle the summary command
pub async fn handle_summary(context: &CoachContext, date: Option<String>) -> Result<()> {
    let date = parse_date_arg(date.as_deref())?;
    let summary = context.log_repository().summarize_day(date).await?;
    print_summary(&summary);
    Ok(())
}

/// Render a day summary to stdout
///
/// Shared with the chat loop, which prints the same view when the model
/// requests a day summary.
pub fn print_summary(summary: &DaySummary) {
    println!("Summary for {}", summary.date);

    if summary.items.is_empty() {
        println!("{}", "Nothing logged for this day".yellow());
    } else {
        let rows: Vec<SummaryRow> = summary
            .items
            .iter()
            .map(|item| SummaryRow {
                food: item.food_name.clone(),
                serving: item.serving_desc.clone(),
                qty: fmt_macro(item.qty),
                cal: fmt_macro(item.cal),
                protein: fmt_macro(item.protein),
                carbs: fmt_macro(item.carbs),
                fat: fmt_macro(item.fat),
            })
            .collect();

        println!("{}", Table::new(rows));
    }

    let totals = &summary.totals;
    println!(
        "\nTotals: {} cal, {} g protein, {} g carbs, {} g fat",
        fmt_macro(totals.cal),
        fmt_macro(totals.protein),
        fmt_macro(totals.carbs),
        fmt_macro(totals.fat)
    );

    match (&summary.goal, summary.remaining()) {
        (Some(goal), Some(remaining)) => {
            println!(
                "Goal:   {} cal, {} g protein, {} g carbs, {} g fat",
                fmt_macro(goal.calories),
                fmt_macro(goal.protein_g),
                fmt_macro(goal.carbs_g),
                fmt_macro(goal.fat_g)
            );
            // Negative remaining means the target was exceeded
            println!(
                "Left:   {} cal, {} g protein, {} g carbs, {} g fat",
                fmt_macro(remaining.cal),
                fmt_macro(remaining.protein),
                fmt_macro(remaining.carbs),
                fmt_macro(remaining.fat)
            );
        }
        _ => {
            println!("{}", "No goal set".yellow());
        }
    }
}
