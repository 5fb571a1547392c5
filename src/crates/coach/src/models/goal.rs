//! Daily macro goal model

use serde::{Deserialize, Serialize};

/// The user's daily targets
///
/// There is at most one goal at a time; setting a new goal replaces
/// the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub updated_at: String,
}
