//! Direct meal logging command handler

use colored::Colorize;

use crate::cli::helpers::{fmt_macro, parse_date_arg, today};
use crate::context::CoachContext;
use crate::error::{CoachError, Result};
use crate::executor::ActionOutcome;
use crate::turn::{Action, MealItem};

/// Handle the log command
///
/// Routes through the action dispatcher so an unknown food gets the same
/// model estimation a chat turn would trigger.
pub async fn handle_log(
    context: &CoachContext,
    food: String,
    qty: f64,
    date: Option<String>,
) -> Result<()> {
    let food = food.trim().to_string();
    if food.is_empty() {
        return Err(CoachError::Other("Food name cannot be empty".to_string()));
    }
    if !qty.is_finite() || qty <= 0.0 {
        return Err(CoachError::Other(format!(
            "Quantity must be a positive number, got {}",
            qty
        )));
    }

    let date = parse_date_arg(date.as_deref())?;

    let action = Action::LogMeal {
        date: Some(date),
        items: vec![MealItem {
            name: food,
            qty,
        }],
    };

    let report = context.dispatcher().dispatch(&action, today()).await;

    match report.result {
        Ok(ActionOutcome::MealLogged { date, items }) => {
            println!("{}", "✓ Meal logged".green().bold());
            for item in items {
                let entry = context.food_repository().find_by_id(item.food_id).await?;
                println!(
                    "  {} x {} ({}): {} cal",
                    fmt_macro(item.qty),
                    item.name,
                    entry.serving_desc,
                    fmt_macro(entry.cal * item.qty)
                );
            }
            println!("  Date: {}", date);
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => Err(e),
    }
}
