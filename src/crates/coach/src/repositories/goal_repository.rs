//! Goal repository for database operations

use crate::db::Database;
use crate::error::{CoachError, Result};
use crate::models::Goal;
use sqlx::Row;
use std::sync::Arc;

/// Repository for the daily macro goal
///
/// The goal is a single row pinned to id 1; every set replaces the
/// previous values.
#[derive(Clone, Debug)]
pub struct GoalRepository {
    db: Arc<Database>,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Set the daily targets, replacing any existing goal
    pub async fn upsert(
        &self,
        calories: f64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO goals (id, calories, protein_g, carbs_g, fat_g, updated_at)
             VALUES (1, ?, ?, ?, ?, datetime('now'))
             ON CONFLICT(id) DO UPDATE SET
                 calories = excluded.calories,
                 protein_g = excluded.protein_g,
                 carbs_g = excluded.carbs_g,
                 fat_g = excluded.fat_g,
                 updated_at = excluded.updated_at",
        )
        .bind(calories)
        .bind(protein_g)
        .bind(carbs_g)
        .bind(fat_g)
        .execute(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to save goal: {}", e)))?;

        Ok(())
    }

    /// Load the current goal, if one has been set
    pub async fn get(&self) -> Result<Option<Goal>> {
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
