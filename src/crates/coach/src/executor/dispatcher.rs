//! Action Dispatcher
//!
//! Applies validated actions to the database, one at a time, and reports a
//! per-action outcome. A failing action never aborts the rest of the turn;
//! within a single log_meal the first item failure stops the remaining items
//! but keeps everything already inserted.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::Database;
use crate::error::Result;
use crate::executor::resolver::FoodResolver;
use crate::models::DaySummary;
use crate::repositories::{FoodRepository, GoalRepository, LogRepository};
use crate::turn::{Action, MealItem};

/// What a single dispatched action produced
#[derive(Debug)]
pub enum ActionOutcome {
    /// Daily targets replaced
    GoalSet,

    /// Food inserted or updated in the catalog
    FoodAdded { name: String, id: i64 },

    /// Meal items appended to a day's log
    MealLogged {
        date: NaiveDate,
        items: Vec<LoggedItem>,
    },

    /// Totals computed for a day
    Summary(DaySummary),

    /// Unrecognized action, skipped
    Ignored { name: String },
}

/// One successfully logged meal item
#[derive(Debug, Clone)]
pub struct LoggedItem {
    pub name: String,
    pub qty: f64,
    pub food_id: i64,
}

/// Outcome report for one dispatched action
#[derive(Debug)]
pub struct ActionReport {
    /// Wire name of the action
    pub action: String,

    /// Success outcome, or the failure that stopped it
    pub result: Result<ActionOutcome>,
}

/// Applies actions against the database
pub struct ActionDispatcher {
    foods: FoodRepository,
    goals: GoalRepository,
    logs: LogRepository,
    resolver: FoodResolver,
}

impl ActionDispatcher {
    pub fn new(database: Arc<Database>, resolver: FoodResolver) -> Self {
        Self {
            foods: FoodRepository::new(database.clone()),
            goals: GoalRepository::new(database.clone()),
            logs: LogRepository::new(database),
            resolver,
        }
    }

    /// Dispatch one action, defaulting absent dates to `today`
    pub async fn dispatch(&self, action: &Action, today: NaiveDate) -> ActionReport {
        let result = self.apply(action, today).await;
        if let Err(e) = &result {
            warn!(action = action.name(), error = %e, "Action failed");
        }
        ActionReport {
            action: action.name().to_string(),
            result,
        }
    }

    async fn apply(&self, action: &Action, today: NaiveDate) -> Result<ActionOutcome> {
        match action {
            Action::SetGoal {
                calories,
                protein_g,
                carbs_g,
                fat_g,
            } => {
                self.goals
                    .upsert(*calories, *protein_g, *carbs_g, *fat_g)
                    .await?;
                info!(calories, protein_g, carbs_g, fat_g, "Goal updated");
                Ok(ActionOutcome::GoalSet)
            }

            Action::AddFood { food } => {
                let id = self.foods.upsert(food).await?;
                info!(name = %food.name, id, "Food saved");
                Ok(ActionOutcome::FoodAdded {
                    name: food.name.clone(),
                    id,
                })
            }

            Action::LogMeal { date, items } => {
                let date = date.unwrap_or(today);
                let items = self.log_meal(date, items).await?;
                info!(date = %date, count = items.len(), "Meal logged");
                Ok(ActionOutcome::MealLogged { date, items })
            }

            Action::DaySummary { date } => {
                let date = date.unwrap_or(today);
                let summary = self.logs.summarize_day(date).await?;
                Ok(ActionOutcome::Summary(summary))
            }

            Action::Unknown { name } => {
                warn!(action = %name, "Ignoring unknown action");
                Ok(ActionOutcome::Ignored { name: name.clone() })
            }
        }
    }

    /// Insert meal items in order; the first failure stops the rest while
    /// already inserted items stay
    async fn log_meal(&self, date: NaiveDate, items: &[MealItem]) -> Result<Vec<LoggedItem>> {
        let log_id = self.logs.ensure_day(date).await?;

        let mut logged = Vec::with_capacity(items.len());
        for item in items {
            let food_id = self.resolver.resolve(&item.name).await?;
            self.logs.insert_item(log_id, food_id, item.qty).await?;
            logged.push(LoggedItem {
                name: item.name.clone(),
                qty: item.qty,
                food_id,
            });
        }

        Ok(logged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoachError;
    use crate::executor::llm_provider::ModelBackend;
    use crate::models::NewFood;
    use async_trait::async_trait;
    use llm::Message;
    use sqlx::sqlite::SqlitePoolOptions;

    /// Backend whose estimates always fail to decode
    struct NoEstimates;

    #[async_trait]
    impl ModelBackend for NoEstimates {
        async fn complete(&self, _transcript: &[Message]) -> Result<String> {
            unreachable!("dispatcher never completes turns")
        }

        async fn estimate(&self, _food_name: &str) -> Result<String> {
            Ok("no estimate available".to_string())
        }

        async fn repair(&self, raw: &str, _errors: &[String]) -> Result<String> {
            Ok(raw.to_string())
        }
    }

    async fn setup() -> (Arc<Database>, ActionDispatcher) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Arc::new(Database {
            pool: Arc::new(pool),
        });
        db.run_migrations().await.unwrap();

        let resolver = FoodResolver::new(db.clone(), Arc::new(NoEstimates));
        let dispatcher = ActionDispatcher::new(db.clone(), resolver);
        (db, dispatcher)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn test_set_goal_and_summary_roundtrip() {
        let (_db, dispatcher) = setup().await;

        let report = dispatcher
            .dispatch(
                &Action::SetGoal {
                    calories: 1800.0,
                    protein_g: 140.0,
                    carbs_g: 170.0,
                    fat_g: 60.0,
                },
                today(),
            )
            .await;
        assert!(matches!(report.result, Ok(ActionOutcome::GoalSet)));

        let report = dispatcher
            .dispatch(&Action::DaySummary { date: None }, today())
            .await;
        match report.result.unwrap() {
            ActionOutcome::Summary(summary) => {
                assert_eq!(summary.date, today());
                assert_eq!(summary.totals.cal, 0.0);
                assert_eq!(summary.goal.unwrap().calories, 1800.0);
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_log_meal_defaults_date_to_today() {
        let (db, dispatcher) = setup().await;

        FoodRepository::new(db.clone())
            .upsert(&NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0))
            .await
            .unwrap();

        let report = dispatcher
            .dispatch(
                &Action::LogMeal {
                    date: None,
                    items: vec![MealItem {
                        name: "egg".to_string(),
                        qty: 2.0,
                    }],
                },
                today(),
            )
            .await;

        match report.result.unwrap() {
            ActionOutcome::MealLogged { date, items } => {
                assert_eq!(date, today());
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].qty, 2.0);
            }
            other => panic!("expected meal logged, got {:?}", other),
        }

        let summary = LogRepository::new(db).summarize_day(today()).await.unwrap();
        assert_eq!(summary.totals.cal, 140.0);
    }

    #[tokio::test]
    async fn test_log_meal_keeps_items_before_a_failure() {
        let (db, dispatcher) = setup().await;

        FoodRepository::new(db.clone())
            .upsert(&NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0))
            .await
            .unwrap();

        // "mystery" cannot be resolved: the estimate reply never decodes
        let report = dispatcher
            .dispatch(
                &Action::LogMeal {
                    date: None,
                    items: vec![
                        MealItem {
                            name: "egg".to_string(),
                            qty: 1.0,
                        },
                        MealItem {
                            name: "mystery".to_string(),
                            qty: 1.0,
                        },
                        MealItem {
                            name: "egg".to_string(),
                            qty: 3.0,
                        },
                    ],
                },
                today(),
            )
            .await;

        let err = report.result.unwrap_err();
        assert!(matches!(err, CoachError::UnknownFood(_)));

        // The first item persisted, the item after the failure never ran
        let summary = LogRepository::new(db).summarize_day(today()).await.unwrap();
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.totals.cal, 70.0);
    }

    #[tokio::test]
    async fn test_unknown_action_is_ignored() {
        let (_db, dispatcher) = setup().await;

        let report = dispatcher
            .dispatch(
                &Action::Unknown {
                    name: "fly_to_moon".to_string(),
                },
                today(),
            )
            .await;

        assert_eq!(report.action, "fly_to_moon");
        match report.result.unwrap() {
            ActionOutcome::Ignored { name } => assert_eq!(name, "fly_to_moon"),
            other => panic!("expected ignored, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_food_reports_id() {
        let (db, dispatcher) = setup().await;

        let report = dispatcher
            .dispatch(
                &Action::AddFood {
                    food: NewFood::new("oats", "40 g dry", 150.0, 5.0, 27.0, 3.0),
                },
                today(),
            )
            .await;

        match report.result.unwrap() {
            ActionOutcome::FoodAdded { name, id } => {
                assert_eq!(name, "oats");
                let found = FoodRepository::new(db).find_by_id(id).await.unwrap();
                assert_eq!(found.cal, 150.0);
            }
            other => panic!("expected food added, got {:?}", other),
        }
    }
}
