//! Typed Turn Plans
//!
//! A validated model reply materializes into a [`TurnPlan`]: the text to show
//! the user, a completion flag, and the list of requested actions. Action
//! names outside the known vocabulary survive materialization as
//! [`Action::Unknown`] so the dispatcher can log and skip them instead of
//! failing the whole turn.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::models::{NewFood, Provenance};

/// One food item inside a `log_meal` action
#[derive(Debug, Clone, PartialEq)]
pub struct MealItem {
    /// Food name as the model emitted it
    pub name: String,

    /// Serving count, defaults to 1.0 when the model omits it
    pub qty: f64,
}

/// A single action requested by the model
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the daily macro targets
    SetGoal {
        calories: f64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    },

    /// Insert or update a food in the catalog
    AddFood { food: NewFood },

    /// Append items to a day's meal log
    LogMeal {
        date: Option<NaiveDate>,
        items: Vec<MealItem>,
    },

    /// Report the totals for a day
    DaySummary { date: Option<NaiveDate> },

    /// Unrecognized action name, ignored at dispatch
    Unknown { name: String },
}

impl Action {
    /// The wire name of this action, used in logs and outcome reports
    pub fn name(&self) -> &str {
        match self {
            Action::SetGoal { .. } => "set_goal",
            Action::AddFood { .. } => "add_food",
            Action::LogMeal { .. } => "log_meal",
            Action::DaySummary { .. } => "day_summary",
            Action::Unknown { name } => name,
        }
    }

    /// Materialize a single action from its canonical JSON form
    ///
    /// Returns `None` for values that are not objects or lack an `action`
    /// name. Recognized names whose args do not materialize (a path that
    /// validation normally rules out) degrade to [`Action::Unknown`].
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = obj.get("action")?.as_str()?;
        let empty = Map::new();
        let args = obj
            .get("args")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let parsed = match name {
            "set_goal" => Self::set_goal(args),
            "add_food" => Self::add_food(args),
            "log_meal" => Self::log_meal(args),
            "day_summary" => Self::day_summary(args),
            _ => None,
        };

        Some(parsed.unwrap_or_else(|| Action::Unknown {
            name: name.to_string(),
        }))
    }

    fn set_goal(args: &Map<String, Value>) -> Option<Self> {
        Some(Action::SetGoal {
            calories: number(args, "calories")?,
            protein_g: number(args, "protein_g")?,
            carbs_g: number(args, "carbs_g")?,
            fat_g: number(args, "fat_g")?,
        })
    }

    fn add_food(args: &Map<String, Value>) -> Option<Self> {
        let provenance = args
            .get("provenance")
            .and_then(Value::as_str)
            .map(Provenance::from)
            .unwrap_or(Provenance::User);

        Some(Action::AddFood {
            food: NewFood {
                name: string(args, "name")?,
                serving_desc: string(args, "serving_desc")?,
                cal: number(args, "cal")?,
                protein: number(args, "protein")?,
                carbs: number(args, "carbs")?,
                fat: number(args, "fat")?,
                provenance,
            },
        })
    }

    fn log_meal(args: &Map<String, Value>) -> Option<Self> {
        let items: Vec<MealItem> = args
            .get("items")?
            .as_array()?
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                Some(MealItem {
                    name: obj.get("name")?.as_str()?.to_string(),
                    qty: obj.get("qty").and_then(Value::as_f64).unwrap_or(1.0),
                })
            })
            .collect();

        if items.is_empty() {
            return None;
        }

        Some(Action::LogMeal {
            date: date(args)?,
            items,
        })
    }

    fn day_summary(args: &Map<String, Value>) -> Option<Self> {
        Some(Action::DaySummary { date: date(args)? })
    }
}

/// A fully validated turn: what to say, whether to stop, and what to do
#[derive(Debug, Clone, PartialEq)]
pub struct TurnPlan {
    /// Text shown to the user
    pub speak: String,

    /// True when the model considers the conversation finished
    pub done: bool,

    /// Actions to dispatch, in order
    pub actions: Vec<Action>,
}

impl TurnPlan {
    /// Materialize a plan from a validated payload
    ///
    /// Missing `done` and `actions` default to `false` and empty. Entries
    /// that are not objects carrying an `action` name are dropped.
    pub fn from_payload(payload: &Value) -> Self {
        let speak = payload
            .get("speak")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let done = payload
            .get("done")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let actions = payload
            .get("actions")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Action::from_value).collect())
            .unwrap_or_default();

        Self {
            speak,
            done,
            actions,
        }
    }

    /// Build a plan that only speaks, with no actions
    pub fn speak_only(speak: impl Into<String>) -> Self {
        Self {
            speak: speak.into(),
            done: false,
            actions: Vec::new(),
        }
    }
}

fn number(args: &Map<String, Value>, key: &str) -> Option<f64> {
    args.get(key).and_then(Value::as_f64)
}

fn string(args: &Map<String, Value>, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Read an optional `date` arg, distinguishing absent (fine) from present
/// but unparseable (drops the action)
fn date(args: &Map<String, Value>) -> Option<Option<NaiveDate>> {
    match args.get("date") {
        Some(value) => {
            let parsed = NaiveDate::parse_from_str(value.as_str()?, "%Y-%m-%d").ok()?;
            Some(Some(parsed))
        }
        None => Some(None),
    }
}
