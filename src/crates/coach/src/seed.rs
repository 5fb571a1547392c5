//! Starter food catalog
//!
//! Seeds the database with a handful of everyday foods so chat works out of
//! the box. Seeding is idempotent: a name that already exists in the catalog
//! is skipped, never overwritten, so user edits survive re-seeding.

use std::sync::Arc;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::models::{NewFood, Provenance};
use crate::repositories::FoodRepository;

/// Outcome of a seeding run
#[derive(Debug, Default)]
pub struct SeedReport {
    /// Foods inserted by this run
    pub added: Vec<String>,
    /// Foods skipped because the name already existed
    pub skipped: Vec<String>,
}

/// The starter catalog, averaged macros per single serving
fn starter_foods() -> Vec<NewFood> {
    vec![
        NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0),
        NewFood::new("chicken breast", "100 g cooked", 165.0, 31.0, 0.0, 3.6),
        NewFood::new("white rice", "1 cup cooked", 205.0, 4.3, 45.0, 0.4),
        NewFood::new("tortilla wrap", "1 large", 210.0, 6.0, 36.0, 5.0),
        NewFood::new("apple", "1 medium", 95.0, 0.5, 25.0, 0.3),
        NewFood::new("greek yogurt", "170 g", 100.0, 17.0, 6.0, 0.7),
        NewFood::new("oats", "40 g dry", 150.0, 5.0, 27.0, 3.0),
        NewFood::new("banana", "1 medium", 105.0, 1.3, 27.0, 0.4),
    ]
    .into_iter()
    .map(|food| food.with_provenance(Provenance::Seed))
    .collect()
}

/// Insert the starter catalog, skipping names that already exist
pub async fn seed_catalog(database: Arc<Database>) -> Result<SeedReport> {
    let repo = FoodRepository::new(database);
    let mut report = SeedReport::default();

    for food in starter_foods() {
        if repo.find_id_by_name(&food.name).await?.is_some() {
            report.skipped.push(food.name);
            continue;
        }
        repo.upsert(&food).await?;
        report.added.push(food.name);
    }

    info!(
        added = report.added.len(),
        skipped = report.skipped.len(),
        "Seeded starter catalog"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDatabase;

    #[test]
    fn test_starter_catalog_shape() {
        let foods = starter_foods();
        assert_eq!(foods.len(), 8);
        assert!(foods.iter().all(|f| f.provenance == Provenance::Seed));
        assert!(foods.iter().all(|f| f.cal > 0.0));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let test_db = TestDatabase::new().await.unwrap();
        let database = test_db.database();

        let first = seed_catalog(database.clone()).await.unwrap();
        assert_eq!(first.added.len(), 8);
        assert!(first.skipped.is_empty());

        let second = seed_catalog(database.clone()).await.unwrap();
        assert!(second.added.is_empty());
        assert_eq!(second.skipped.len(), 8);
    }

    #[tokio::test]
    async fn test_seed_preserves_existing_entries() {
        let test_db = TestDatabase::new().await.unwrap();
        let database = test_db.database();
        let repo = FoodRepository::new(database.clone());

        // User already defined their own egg
        let custom = NewFood::new("egg", "1 jumbo", 90.0, 8.0, 0.8, 6.5);
        repo.upsert(&custom).await.unwrap();

        let report = seed_catalog(database.clone()).await.unwrap();
        assert_eq!(report.added.len(), 7);
        assert_eq!(report.skipped, vec!["egg".to_string()]);

        let egg = repo.find_by_name("egg").await.unwrap().unwrap();
        assert_eq!(egg.cal, 90.0);
        assert_eq!(egg.provenance, "user");
    }
}
