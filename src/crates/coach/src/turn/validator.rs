//! Reply Validation
//!
//! Checks a decoded reply against the action vocabulary before anything is
//! dispatched. Validation collects every problem it finds instead of stopping
//! at the first, so a single repair request can name them all.
//!
//! Shorthand forms like `{"set_goal": {...}}` are rewritten to the canonical
//! `{"action": "set_goal", "args": {...}}` by [`canonicalize`] before
//! validation. [`inject_missing_dates`] is the one local fix applied when
//! validation fails: it fills in today's date on `log_meal` actions that lack
//! one, which spares a model round trip when that was the only gap.

use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Action names the dispatcher understands, in sorted order
pub const ALLOWED_ACTIONS: [&str; 4] = ["add_food", "day_summary", "log_meal", "set_goal"];

/// Rewrite single-key action shorthand into canonical `action`/`args` form
///
/// An action object that already carries an `action` key is left untouched,
/// which makes this a fixpoint after one application.
pub fn canonicalize(payload: &mut Value) {
    let actions = match payload.get_mut("actions").and_then(Value::as_array_mut) {
        Some(actions) => actions,
        None => return,
    };

    for action in actions {
        let obj = match action.as_object_mut() {
            Some(obj) => obj,
            None => continue,
        };
        if obj.contains_key("action") {
            continue;
        }

        let shorthand = ALLOWED_ACTIONS
            .iter()
            .copied()
            .find(|name| obj.contains_key(*name));
        if let Some(name) = shorthand {
            if let Some(args) = obj.remove(name) {
                obj.insert("action".to_string(), Value::String(name.to_string()));
                obj.insert("args".to_string(), args);
            }
        }
    }
}

/// Validate a canonicalized payload, returning every problem found
///
/// An empty vector means the payload is safe to materialize. `speak` must be
/// a string; `done` and `actions` may be absent (they default to `false` and
/// empty at materialization) but must be well typed when present.
pub fn validate(payload: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let obj = match payload.as_object() {
        Some(obj) => obj,
        None => return vec!["payload must be a JSON object".to_string()],
    };

    if !obj.get("speak").map(Value::is_string).unwrap_or(false) {
        errors.push(r#"missing or invalid "speak" (string)"#.to_string());
    }

    if let Some(done) = obj.get("done") {
        if !done.is_boolean() {
            errors.push(r#""done" must be a boolean if present"#.to_string());
        }
    }

    match obj.get("actions") {
        None | Some(Value::Null) => {}
        Some(Value::Array(actions)) => {
            for (i, action) in actions.iter().enumerate() {
                validate_action(i, action, &mut errors);
            }
        }
        Some(_) => errors.push(r#""actions" must be an array"#.to_string()),
    }

    errors
}

/// Fill today's date into `log_meal` actions that lack one
///
/// A `null` date counts as lacking; models emit it often enough that fixing
/// it locally saves the repair round trip. Returns true when any action was
/// changed. Runs only after a failed validation; the caller re-validates
/// before falling back to a model repair.
pub fn inject_missing_dates(payload: &mut Value, today: NaiveDate) -> bool {
    let actions = match payload.get_mut("actions").and_then(Value::as_array_mut) {
        Some(actions) => actions,
        None => return false,
    };

    let mut changed = false;
    for action in actions {
        let obj = match action.as_object_mut() {
            Some(obj) => obj,
            None => continue,
        };
        if obj.get("action").and_then(Value::as_str) != Some("log_meal") {
            continue;
        }
        let args = match obj.get_mut("args").and_then(Value::as_object_mut) {
            Some(args) => args,
            None => continue,
        };
        let absent = matches!(args.get("date"), None | Some(Value::Null));
        if absent {
            args.insert(
                "date".to_string(),
                Value::String(today.format("%Y-%m-%d").to_string()),
            );
            changed = true;
        }
    }

    changed
}

fn validate_action(i: usize, action: &Value, errors: &mut Vec<String>) {
    let obj = match action.as_object() {
        Some(obj) => obj,
        None => {
            errors.push(format!("actions[{}] is not an object", i));
            return;
        }
    };

    let name = match obj.get("action").and_then(Value::as_str) {
        Some(name) if ALLOWED_ACTIONS.contains(&name) => name,
        _ => {
            errors.push(format!(
                "actions[{}].action must be one of {:?}",
                i, ALLOWED_ACTIONS
            ));
            return;
        }
    };

    let empty = Map::new();
    let args = match obj.get("args") {
        None => &empty,
        Some(value) => match value.as_object() {
            Some(args) => args,
            None => {
                errors.push(format!("actions[{}].args must be an object", i));
                return;
            }
        },
    };

    match name {
        "set_goal" => validate_set_goal(i, args, errors),
        "add_food" => validate_add_food(i, args, errors),
        "log_meal" => validate_log_meal(i, args, errors),
        "day_summary" => validate_date_arg(i, args, errors),
        _ => {}
    }
}

fn validate_set_goal(i: usize, args: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in ["calories", "protein_g", "carbs_g", "fat_g"] {
        match args.get(key).and_then(Value::as_f64) {
            Some(n) if n >= 0.0 => {}
            _ => errors.push(format!(
                "actions[{}].args.{} missing or invalid (>=0 number)",
                i, key
            )),
        }
    }
}

fn validate_add_food(i: usize, args: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in ["name", "serving_desc"] {
        if !args.get(key).map(Value::is_string).unwrap_or(false) {
            errors.push(format!("actions[{}].args.{} missing or invalid", i, key));
        }
    }
    for key in ["cal", "protein", "carbs", "fat"] {
        match args.get(key).and_then(Value::as_f64) {
            Some(n) if n >= 0.0 => {}
            _ => errors.push(format!("actions[{}].args.{} missing or invalid", i, key)),
        }
    }
    if let Some(provenance) = args.get("provenance") {
        if !provenance.is_string() {
            errors.push(format!(
                "actions[{}].args.provenance must be a string if present",
                i
            ));
        }
    }
}

fn validate_log_meal(i: usize, args: &Map<String, Value>, errors: &mut Vec<String>) {
    match args.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => {
            for (j, item) in items.iter().enumerate() {
                if !item.get("name").map(Value::is_string).unwrap_or(false) {
                    errors.push(format!("actions[{}].args.items[{}].name missing/invalid", i, j));
                }
                if let Some(qty) = item.get("qty") {
                    match qty.as_f64() {
                        Some(n) if n > 0.0 => {}
                        _ => errors.push(format!(
                            "actions[{}].args.items[{}].qty must be > 0 number if present",
                            i, j
                        )),
                    }
                }
            }
        }
        _ => errors.push(format!("actions[{}].args.items must be a non-empty array", i)),
    }
    validate_date_arg(i, args, errors);
}

fn validate_date_arg(i: usize, args: &Map<String, Value>, errors: &mut Vec<String>) {
    if let Some(value) = args.get("date") {
        let ok = value
            .as_str()
            .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok())
            .unwrap_or(false);
        if !ok {
            errors.push(format!(
                r#"actions[{}].args.date must be "YYYY-MM-DD" if present"#,
                i
            ));
        }
    }
}
