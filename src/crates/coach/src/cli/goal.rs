//! Goal command handlers

use colored::Colorize;

use crate::cli::helpers::fmt_macro;
use crate::context::CoachContext;
use crate::error::{CoachError, Result};

/// Handle goal set command
pub async fn handle_set(
    context: &CoachContext,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> Result<()> {
    for (label, value) in [
        ("calories", calories),
        ("protein", protein),
        ("carbs", carbs),
        ("fat", fat),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CoachError::Other(format!(
                "{} must be a non-negative number, got {}",
                label, value
            )));
        }
    }

    context
        .goal_repository()
        .upsert(calories, protein, carbs, fat)
        .await?;

    println!("{}", "✓ Daily goal updated".green().bold());
    println!("  Calories: {}", fmt_macro(calories));
    println!("  Protein: {} g", fmt_macro(protein));
    println!("  Carbs: {} g", fmt_macro(carbs));
    println!("  Fat: {} g", fmt_macro(fat));

    Ok(())
}

/// Handle goal show command
pub async fn handle_show(context: &CoachContext) -> Result<()> {
    match context.goal_repository().get().await? {
        Some(goal) => {
            println!("Daily goal:");
            println!("  Calories: {}", fmt_macro(goal.calories));
            println!("  Protein: {} g", fmt_macro(goal.protein_g));
            println!("  Carbs: {} g", fmt_macro(goal.carbs_g));
            println!("  Fat: {} g", fmt_macro(goal.fat_g));
            println!("  Updated: {}", goal.updated_at);
        }
        None => {
            println!(
                "{}",
                "No goal set. Run 'coach goal set <cal> <protein> <carbs> <fat>'".yellow()
            );
        }
    }

    Ok(())
}
