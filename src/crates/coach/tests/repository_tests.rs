//! Integration tests for the storage repositories

mod common;

use chrono::NaiveDate;
use coach::models::{NewFood, Provenance};
use coach::repositories::{FoodRepository, GoalRepository, LogRepository};
use common::setup_test_db;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_food_upsert_is_last_write_wins() {
    let (_temp, db) = setup_test_db().await;
    let repo = FoodRepository::new(db);

    let first_id = repo
        .upsert(&NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0))
        .await
        .unwrap();
    let second_id = repo
        .upsert(&NewFood::new("egg", "1 jumbo", 90.0, 8.0, 0.8, 6.5))
        .await
        .unwrap();

    assert_eq!(first_id, second_id);

    let egg = repo.find_by_name("egg").await.unwrap().unwrap();
    assert_eq!(egg.cal, 90.0);
    assert_eq!(egg.serving_desc, "1 jumbo");
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_food_names_are_case_insensitive() {
    let (_temp, db) = setup_test_db().await;
    let repo = FoodRepository::new(db);

    repo.upsert(&NewFood::new("Greek Yogurt", "170 g", 100.0, 17.0, 6.0, 0.7))
        .await
        .unwrap();

    assert!(repo.find_id_by_name("greek yogurt").await.unwrap().is_some());
    assert!(repo.find_id_by_name("GREEK YOGURT").await.unwrap().is_some());
    assert!(repo.find_id_by_name("kefir").await.unwrap().is_none());
}

#[tokio::test]
async fn test_food_provenance_round_trips() {
    let (_temp, db) = setup_test_db().await;
    let repo = FoodRepository::new(db);

    repo.upsert(
        &NewFood::new("kiwi", "1 medium", 42.0, 0.8, 10.0, 0.4)
            .with_provenance(Provenance::LlmEstimate),
    )
    .await
    .unwrap();

    let kiwi = repo.find_by_name("kiwi").await.unwrap().unwrap();
    assert_eq!(kiwi.provenance, "llm_estimate");
}

#[tokio::test]
async fn test_goal_upsert_replaces_single_row() {
    let (_temp, db) = setup_test_db().await;
    let repo = GoalRepository::new(db);

    assert!(repo.get().await.unwrap().is_none());

    repo.upsert(2000.0, 150.0, 200.0, 70.0).await.unwrap();
    repo.upsert(1800.0, 140.0, 170.0, 60.0).await.unwrap();

    let goal = repo.get().await.unwrap().unwrap();
    assert_eq!(goal.calories, 1800.0);
    assert_eq!(goal.protein_g, 140.0);
    assert_eq!(goal.carbs_g, 170.0);
    assert_eq!(goal.fat_g, 60.0);
}

#[tokio::test]
async fn test_ensure_day_is_idempotent() {
    let (_temp, db) = setup_test_db().await;
    let repo = LogRepository::new(db);

    let first = repo.ensure_day(day(2025, 3, 1)).await.unwrap();
    let second = repo.ensure_day(day(2025, 3, 1)).await.unwrap();
    let other = repo.ensure_day(day(2025, 3, 2)).await.unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_summary_scales_macros_by_quantity() {
    let (_temp, db) = setup_test_db().await;
    let foods = FoodRepository::new(db.clone());
    let logs = LogRepository::new(db);

    let egg = foods
        .upsert(&NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0))
        .await
        .unwrap();

    let log_id = logs.ensure_day(day(2025, 3, 1)).await.unwrap();
    logs.insert_item(log_id, egg, 2.0).await.unwrap();

    let summary = logs.summarize_day(day(2025, 3, 1)).await.unwrap();
    assert_eq!(summary.totals.cal, 140.0);
    assert_eq!(summary.totals.protein, 12.0);
    assert!((summary.totals.carbs - 1.2).abs() < 1e-9);
    assert_eq!(summary.totals.fat, 10.0);
}

#[tokio::test]
async fn test_empty_day_summarizes_to_zero() {
    let (_temp, db) = setup_test_db().await;
    let logs = LogRepository::new(db);

    let summary = logs.summarize_day(day(2025, 3, 1)).await.unwrap();
    assert!(summary.items.is_empty());
    assert_eq!(summary.totals.cal, 0.0);
    assert_eq!(summary.totals.protein, 0.0);
    assert_eq!(summary.totals.carbs, 0.0);
    assert_eq!(summary.totals.fat, 0.0);
}

#[tokio::test]
async fn test_food_update_keeps_existing_log_items_correct() {
    // Re-adding a food must not strand log entries made before the update
    let (_temp, db) = setup_test_db().await;
    let foods = FoodRepository::new(db.clone());
    let logs = LogRepository::new(db);

    let egg = foods
        .upsert(&NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0))
        .await
        .unwrap();
    let log_id = logs.ensure_day(day(2025, 3, 1)).await.unwrap();
    logs.insert_item(log_id, egg, 1.0).await.unwrap();

    foods
        .upsert(&NewFood::new("egg", "1 jumbo", 90.0, 8.0, 0.8, 6.5))
        .await
        .unwrap();

    // The logged item now reflects the updated macros
    let summary = logs.summarize_day(day(2025, 3, 1)).await.unwrap();
    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.totals.cal, 90.0);
}

#[tokio::test]
async fn test_days_are_isolated() {
    let (_temp, db) = setup_test_db().await;
    let foods = FoodRepository::new(db.clone());
    let logs = LogRepository::new(db);

    let rice = foods
        .upsert(&NewFood::new("white rice", "1 cup cooked", 205.0, 4.3, 45.0, 0.4))
        .await
        .unwrap();

    let monday = logs.ensure_day(day(2025, 3, 3)).await.unwrap();
    let tuesday = logs.ensure_day(day(2025, 3, 4)).await.unwrap();
    logs.insert_item(monday, rice, 1.0).await.unwrap();
    logs.insert_item(tuesday, rice, 2.0).await.unwrap();

    let mon = logs.summarize_day(day(2025, 3, 3)).await.unwrap();
    let tue = logs.summarize_day(day(2025, 3, 4)).await.unwrap();
    assert_eq!(mon.totals.cal, 205.0);
    assert_eq!(tue.totals.cal, 410.0);
}
