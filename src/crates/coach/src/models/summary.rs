//! Day summary types

use crate::models::Goal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accumulated macros for a set of log entries
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroTotals {
    pub cal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add another set of totals in place
    pub fn add(&mut self, other: &MacroTotals) {
        self.cal += other.cal;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }
}

/// One logged entry with macros scaled by quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub food_name: String,
    pub serving_desc: String,
    pub qty: f64,
    pub cal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl SummaryItem {
    pub fn totals(&self) -> MacroTotals {
        MacroTotals {
            cal: self.cal,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

/// Everything logged on one day, with totals and the current goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub items: Vec<SummaryItem>,
    pub totals: MacroTotals,
    pub goal: Option<Goal>,
}

impl DaySummary {
    /// Macros left before hitting the goal, if a goal is set
    ///
    /// Values go negative once a target is exceeded.
    pub fn remaining(&self) -> Option<MacroTotals> {
        self.goal.as_ref().map(|goal| MacroTotals {
            cal: goal.calories - self.totals.cal,
            protein: goal.protein_g - self.totals.protein,
            carbs: goal.carbs_g - self.totals.carbs,
            fat: goal.fat_g - self.totals.fat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_accumulate() {
        let mut totals = MacroTotals::zero();
        totals.add(&MacroTotals {
            cal: 140.0,
            protein: 12.0,
            carbs: 1.2,
            fat: 10.0,
        });
        totals.add(&MacroTotals {
            cal: 205.0,
            protein: 4.3,
            carbs: 45.0,
            fat: 0.4,
        });

        assert_eq!(totals.cal, 345.0);
        assert_eq!(totals.protein, 16.3);
    }

    #[test]
    fn test_remaining_requires_goal() {
        let summary = DaySummary {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            items: vec![],
            totals: MacroTotals {
                cal: 500.0,
                protein: 40.0,
                carbs: 30.0,
                fat: 20.0,
            },
            goal: None,
        };
        assert!(summary.remaining().is_none());

        let summary = DaySummary {
            goal: Some(Goal {
                calories: 2000.0,
                protein_g: 150.0,
                carbs_g: 200.0,
                fat_g: 70.0,
                updated_at: String::new(),
            }),
            ..summary
        };
        let remaining = summary.remaining().unwrap();
        assert_eq!(remaining.cal, 1500.0);
        assert_eq!(remaining.protein, 110.0);
        assert_eq!(remaining.fat, 50.0);
    }
}
