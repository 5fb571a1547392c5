//! Food catalog repository for database operations

use crate::db::Database;
use crate::error::{CoachError, Result};
use crate::models::{Food, NewFood};
use sqlx::Row;
use std::sync::Arc;

/// Repository for the food catalog
#[derive(Clone, Debug)]
pub struct FoodRepository {
    db: Arc<Database>,
}

impl FoodRepository {
    /// Create a new food repository
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a food, or update the existing row with the same name
    ///
    /// Names compare case-insensitively. An update keeps the original
    /// row id, so existing log entries keep pointing at the food they
    /// were logged against. Returns the row id.
    pub async fn upsert(&self, food: &NewFood) -> Result<i64> {
        // Write with execute(), then read the id back. A RETURNING clause
        // driven by fetch_one leaves the implicit transaction uncommitted
        // until the statement is reset, so the write may not be visible to
        // reads served by another pooled connection.
        sqlx::query(
            "INSERT INTO foods (name, serving_desc, cal, protein, carbs, fat, provenance)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                 serving_desc = excluded.serving_desc,
                 cal = excluded.cal,
                 protein = excluded.protein,
                 carbs = excluded.carbs,
                 fat = excluded.fat,
                 provenance = excluded.provenance",
        )
        .bind(&food.name)
        .bind(&food.serving_desc)
        .bind(food.cal)
        .bind(food.protein)
        .bind(food.carbs)
        .bind(food.fat)
        .bind(food.provenance.as_str())
        .execute(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to upsert food: {}", e)))?;

        self.find_id_by_name(&food.name)
            .await?
            .ok_or_else(|| CoachError::Database("Upserted food not found".to_string()))
    }

    /// Look up a food id by name (case-insensitive)
    pub async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let row = sqlx::query("SELECT id FROM foods WHERE name = ?")
            .bind(name)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| CoachError::Database(format!("Failed to look up food: {}", e)))?;

        Ok(row.map(|r| r.get("id")))
    }

    /// Load a food by name (case-insensitive)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Food>> {
        let row = sqlx::query(
            "SELECT id, name, serving_desc, cal, protein, carbs, fat, provenance, created_at
             FROM foods WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to load food: {}", e)))?;

        Ok(row.map(|r| Self::map_row(&r)))
    }

    /// Load a food by id
    pub async fn find_by_id(&self, id: i64) -> Result<Food> {
        let row = sqlx::query(
            "SELECT id, name, serving_desc, cal, protein, carbs, fat, provenance, created_at
             FROM foods WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to load food: {}", e)))?
        .ok_or_else(|| CoachError::NotFound(format!("food id {}", id)))?;

        Ok(Self::map_row(&row))
    }

    /// List all foods ordered by name
    pub async fn list(&self) -> Result<Vec<Food>> {
        let rows = sqlx::query(
            "SELECT id, name, serving_desc, cal, protein, carbs, fat, provenance, created_at
             FROM foods
             ORDER BY name ASC",
        )
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| CoachError::Database(format!("Failed to list foods: {}", e)))?;

        Ok(rows.iter().map(Self::map_row).collect())
    }

    fn map_row(row: &sqlx::sqlite::SqliteRow) -> Food {
        Food {
            id: row.get("id"),
            name: row.get("name"),
            serving_desc: row.get("serving_desc"),
            cal: row.get("cal"),
            protein: row.get("protein"),
            carbs: row.get("carbs"),
            fat: row.get("fat"),
            provenance: row.get("provenance"),
            created_at: row.get("created_at"),
        }
    }
}
