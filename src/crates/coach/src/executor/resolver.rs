//! Food Resolution
//!
//! Turns a free-form food name into a catalog row id. A miss triggers a
//! model estimate whose add_food actions run through the normal upsert path;
//! a name that still cannot be found afterwards fails the surrounding
//! log_meal item. A food materialized by one estimate is found directly on
//! every later lookup, so repeats never estimate twice.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::db::Database;
use crate::error::{CoachError, Result};
use crate::executor::llm_provider::ModelBackend;
use crate::models::NewFood;
use crate::repositories::FoodRepository;
use crate::turn::{canonicalize, parse_reply, validate, Action, TurnPlan};

/// Resolves food names against the catalog, estimating on a miss
pub struct FoodResolver {
    backend: Arc<dyn ModelBackend>,
    foods: FoodRepository,
    max_estimate_attempts: u32,
}

impl FoodResolver {
    /// Create a resolver with a single estimate attempt per unknown food
    pub fn new(database: Arc<Database>, backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            backend,
            foods: FoodRepository::new(database),
            max_estimate_attempts: 1,
        }
    }

    /// Set how many estimate attempts an unknown food gets
    pub fn with_max_estimate_attempts(mut self, attempts: u32) -> Self {
        self.max_estimate_attempts = attempts;
        self
    }

    /// Resolve a food name to its catalog id
    pub async fn resolve(&self, name: &str) -> Result<i64> {
        if let Some(id) = self.foods.find_id_by_name(name).await? {
            return Ok(id);
        }

        info!(food = %name, "Food not in catalog, requesting estimate");
        let attempts = self.max_estimate_attempts.max(1);
        for attempt in 1..=attempts {
            match self.request_estimate(name).await {
                Ok(foods) => {
                    for food in &foods {
                        let id = self.foods.upsert(food).await?;
                        debug!(food = %food.name, id, "Estimated food saved");
                    }
                    if let Some(id) = self.foods.find_id_by_name(name).await? {
                        return Ok(id);
                    }
                    warn!(food = %name, attempt, "Estimate did not materialize the food");
                }
                Err(e) => {
                    warn!(food = %name, attempt, error = %e, "Estimate attempt failed");
                }
            }
        }

        Err(CoachError::UnknownFood(name.to_string()))
    }

    /// Ask the model for an estimate and pull the add_food inputs out of it
    ///
    /// The reply goes through the same decode and validation steps as a
    /// normal turn but gets no repair round: an invalid estimate is a
    /// resolution failure.
    async fn request_estimate(&self, name: &str) -> Result<Vec<NewFood>> {
        let raw = self.backend.estimate(name).await?;
        let mut payload = parse_reply(&raw)?;
        canonicalize(&mut payload);

        let errors = validate(&payload);
        if !errors.is_empty() {
            return Err(CoachError::Validation(errors));
        }

        default_estimate_provenance(&mut payload);

        let plan = TurnPlan::from_payload(&payload);
        Ok(plan
            .actions
            .into_iter()
            .filter_map(|action| match action {
                Action::AddFood { food } => Some(food),
                _ => None,
            })
            .collect())
    }
}

/// Estimated foods default to model provenance when the reply sets none
fn default_estimate_provenance(payload: &mut Value) {
    let actions = match payload.get_mut("actions").and_then(Value::as_array_mut) {
        Some(actions) => actions,
        None => return,
    };

    for action in actions {
        let obj = match action.as_object_mut() {
            Some(obj) => obj,
            None => continue,
        };
        if obj.get("action").and_then(Value::as_str) != Some("add_food") {
            continue;
        }
        if let Some(args) = obj.get_mut("args").and_then(Value::as_object_mut) {
            args.entry("provenance")
                .or_insert_with(|| Value::String("llm_estimate".to_string()));
        }
    }
}
