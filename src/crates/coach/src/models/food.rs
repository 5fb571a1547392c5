//! Food catalog model

use serde::{Deserialize, Serialize};

/// Where a food's nutrition numbers came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Entered by the user
    User,
    /// Estimated by the model
    LlmEstimate,
    /// Shipped with the seed catalog
    Seed,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::User => "user",
            Provenance::LlmEstimate => "llm_estimate",
            Provenance::Seed => "seed",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Provenance {
    fn from(s: &str) -> Self {
        match s {
            "llm_estimate" => Provenance::LlmEstimate,
            "seed" => Provenance::Seed,
            _ => Provenance::User,
        }
    }
}

/// A catalog entry as stored in the database
///
/// Macros are per single serving; logged quantities scale them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub serving_desc: String,
    pub cal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub provenance: String,
    pub created_at: String,
}

/// Input for creating or updating a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFood {
    pub name: String,
    pub serving_desc: String,
    pub cal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub provenance: Provenance,
}

impl NewFood {
    /// Create a new food input with user provenance
    pub fn new(
        name: impl Into<String>,
        serving_desc: impl Into<String>,
        cal: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
    ) -> Self {
        Self {
            name: name.into(),
            serving_desc: serving_desc.into(),
            cal,
            protein,
            carbs,
            fat,
            provenance: Provenance::User,
        }
    }

    /// Set the provenance
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_round_trip() {
        assert_eq!(Provenance::from("llm_estimate"), Provenance::LlmEstimate);
        assert_eq!(Provenance::from("seed"), Provenance::Seed);
        assert_eq!(Provenance::from("user"), Provenance::User);
        // Unrecognized values default to user
        assert_eq!(Provenance::from("mystery"), Provenance::User);
    }

    #[test]
    fn test_new_food_defaults() {
        let food = NewFood::new("egg", "1 large", 70.0, 6.0, 0.6, 5.0);
        assert_eq!(food.provenance, Provenance::User);

        let food = food.with_provenance(Provenance::LlmEstimate);
        assert_eq!(food.provenance.as_str(), "llm_estimate");
    }
}
