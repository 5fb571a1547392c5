//! Food catalog command handlers

use colored::Colorize;
use tabled::{Table, Tabled};

use crate::cli::helpers::fmt_macro;
use crate::context::CoachContext;
use crate::error::{CoachError, Result};
use crate::models::NewFood;

/// Food display row for table output
#[derive(Tabled)]
struct FoodRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Serving")]
    serving: String,
    #[tabled(rename = "Cal")]
    cal: String,
    #[tabled(rename = "Protein")]
    protein: String,
    #[tabled(rename = "Carbs")]
    carbs: String,
    #[tabled(rename = "Fat")]
    fat: String,
    #[tabled(rename = "Source")]
    source: String,
}

/// Handle food add command
pub async fn handle_add(
    context: &CoachContext,
    name: String,
    serving: String,
    cal: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> Result<()> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CoachError::Other("Food name cannot be empty".to_string()));
    }
    for (label, value) in [
        ("cal", cal),
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

    let food = NewFood::new(&name, &serving, cal, protein, carbs, fat);
    let existed = context.food_repository().find_id_by_name(&name).await?.is_some();
    let id = context.food_repository().upsert(&food).await?;

    if existed {
        println!("{}", format!("✓ Updated food '{}'", name).green().bold());
    } else {
        println!("{}", format!("✓ Added food '{}'", name).green().bold());
    }
    println!("  ID: {}", id);
    println!("  Serving: {}", serving);
    println!(
        "  Macros: {} cal, {} g protein, {} g carbs, {} g fat",
        fmt_macro(cal),
        fmt_macro(protein),
        fmt_macro(carbs),
        fmt_macro(fat)
    );

    Ok(())
}

/// Handle food list command
pub async fn handle_list(context: &CoachContext) -> Result<()> {
    let foods = context.food_repository().list().await?;

    if foods.is_empty() {
        println!(
            "{}",
            "No foods in the catalog. Run 'coach seed' for a starter set".yellow()
        );
        return Ok(());
    }

    // Convert to table rows
    let rows: Vec<FoodRow> = foods
        .into_iter()
        .map(|food| FoodRow {
            name: food.name,
            serving: food.serving_desc,
            cal: fmt_macro(food.cal),
            protein: fmt_macro(food.protein),
            carbs: fmt_macro(food.carbs),
            fat: fmt_macro(food.fat),
            source: food.provenance,
        })
        .collect();

    let count = rows.len();
    let table = Table::new(rows).to_string();
    println!("{}", table);
    println!("\nTotal: {} foods", count);

    Ok(())
}
