//! Meal log repository for database operations

use crate::db::Database;
use crate::error::{CoachError, Result};
use crate::models::{DaySummary, Goal, MacroTotals, SummaryItem};
use chrono::NaiveDate;
use sqlx::Row;
use std::sync::Arc;

/// Repository for daily logs and their entries
#[derive(Clone, Debug)]
pub struct LogRepository {
    db: Arc<Database>,
}

impl LogRepository {
    /// Create a new log repository
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get the log row for a day, creating it if needed
    ///
    /// Safe under concurrent callers: the UNIQUE constraint on
    /// log_date means at most one insert wins, and every caller then
    /// reads the winner's id.
    pub async fn ensure_day(&self, date: NaiveDate) -> Result<i64> {
        let date_str = date.format("%Y-%m-%d").to_string();

        sqlx::query("INSERT INTO logs (log_date) VALUES (?) ON CONFLICT(log_date) DO NOTHING")
            .bind(&date_str)
            .execute(self.db.pool())
            .await
            .map_err(|e| CoachError::Database(format!("Failed to create log day: {}", e)))?;

        let row = sqlx::query("SELECT id FROM logs WHERE log_date = ?")
            .bind(&date_str)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| CoachError::Database(format!("Failed to load log day: {}", e)))?;

        Ok(row.get("id"))
    }

    /// Add an entry to a day's log. Returns the entry id.
    pub async fn insert_item(&self, log_id: i64, food_id: i64, qty: f64) -> Result<i64> {
        // execute() rather than RETURNING + fetch_one: see upsert in
        // food_repository.rs for why RETURNING races with pooled reads.
        let result = sqlx::query("INSERT INTO log_items (log_id, food_id, qty) VALUES (?, ?, ?)")
            .bind(log_id)
            .bind(food_id)
            .bind(qty)
            .execute(self.db.pool())
            .await
            .map_err(|e| CoachError::Database(format!("Failed to insert log item: {}", e)))?;

        Ok(result.last_insert_rowid())
    }

    /// List everything logged on a day, in insertion order
    ///
    /// Each entry's macros come back scaled by its quantity.
    pub async fn list_day_items(&self, date: NaiveDate) -> Result<Vec<SummaryItem>> {
        let date_str = date.format("%Y-%m-%d").to_string();

        let rows = sqlx::query(
            "SELECT f.name, f.serving_desc, li.qty, f.cal, f.protein, f.carbs, f.fat
             FROM log_items li
             JOIN logs l ON l.id = li.log_id
             JOIN foods f ON f.id = li.food_id
             WHERE l.log_date = ?
             ORDER BY li.id ASC",
        )
        .bind(&date_str)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to list day items: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let qty: f64 = row.get("qty");
                SummaryItem {
                    food_name: row.get("name"),
                    serving_desc: row.get("serving_desc"),
                    qty,
                    cal: qty * row.get::<f64, _>("cal"),
                    protein: qty * row.get::<f64, _>("protein"),
                    carbs: qty * row.get::<f64, _>("carbs"),
                    fat: qty * row.get::<f64, _>("fat"),
                }
            })
            .collect())
    }

    /// Summarize everything logged on a day
    ///
    /// Totals accumulate over the scaled entries and the current goal (if
    /// any) is attached for comparison. A day with no log rows summarizes
    /// to zero totals.
    pub async fn summarize_day(&self, date: NaiveDate) -> Result<DaySummary> {
        let items = self.list_day_items(date).await?;

        let mut totals = MacroTotals::zero();
        for item in &items {
            totals.add(&item.totals());
        }

        let goal = self.current_goal().await?;

        Ok(DaySummary {
            date,
            items,
            totals,
            goal,
        })
    }

    async fn current_goal(&self) -> Result<Option<Goal>> {
        let row = sqlx::query(
            "SELECT calories, protein_g, carbs_g, fat_g, updated_at
             FROM goals WHERE id = 1",
        )
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to load goal: {}", e)))?;

        Ok(row.map(|r| Goal {
            calories: r.get("calories"),
            protein_g: r.get("protein_g"),
            carbs_g: r.get("carbs_g"),
            fat_g: r.get("fat_g"),
            updated_at: r.get("updated_at"),
        }))
    }
}
