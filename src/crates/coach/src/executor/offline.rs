//! Offline Backend
//!
//! A deterministic stand-in used when no model server is configured. It
//! understands just enough phrasing to exercise the whole pipeline: goal
//! setting, quick meal logging, and summary requests. Estimates come from a
//! small preset table, and repair echoes the raw reply back unchanged.

use async_trait::async_trait;
use serde_json::{json, Value};

use llm::{Message, MessageRole};

use crate::error::Result;
use crate::executor::llm_provider::ModelBackend;

/// Deterministic backend with no network dependency
#[derive(Debug, Default)]
pub struct OfflineCoach;

impl OfflineCoach {
    pub fn new() -> Self {
        Self
    }

    fn reply(speak: &str, actions: Value) -> String {
        json!({"speak": speak, "done": false, "actions": actions}).to_string()
    }
}

#[async_trait]
impl ModelBackend for OfflineCoach {
    async fn complete(&self, transcript: &[Message]) -> Result<String> {
        let last = transcript
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::Human)
            .map(|m| m.text().to_lowercase())
            .unwrap_or_default();

        if last.contains("total") || (last.contains("show") && last.contains("today")) {
            return Ok(Self::reply(
                "Here are today's totals.",
                json!([{"action": "day_summary", "args": {}}]),
            ));
        }

        if last.contains("set goal") {
            let numbers: Vec<f64> = last
                .replace(',', " ")
                .split_whitespace()
                .filter_map(|w| w.parse::<f64>().ok())
                .collect();
            if numbers.len() >= 4 {
                return Ok(Self::reply(
                    "Goal saved.",
                    json!([{"action": "set_goal", "args": {
                        "calories": numbers[0],
                        "protein_g": numbers[1],
                        "carbs_g": numbers[2],
                        "fat_g": numbers[3]
                    }}]),
                ));
            }
            return Ok(Self::reply(
                "Give four numbers: calories protein carbs fat.",
                json!([]),
            ));
        }

        if last.starts_with("log") {
            let tokens: Vec<&str> = last.split_whitespace().collect();
            let mut qty = 1.0;
            let mut name = if tokens.len() > 1 {
                tokens[tokens.len() - 1]
            } else {
                "item"
            };
            if tokens.len() >= 3 {
                if let Ok(parsed) = tokens[1].parse::<f64>() {
                    if parsed > 0.0 {
                        qty = parsed;
                        name = tokens[2];
                    }
                }
            }
            // Singularize plurals like "eggs"
            let name = name.strip_suffix('s').unwrap_or(name);
            return Ok(Self::reply(
                &format!("Logging {} {}.", qty, name),
                json!([{"action": "log_meal", "args": {"items": [{"name": name, "qty": qty}]}}]),
            ));
        }

        Ok(Self::reply(
            "(offline) Try: 'set goal 1800 140 170 60', 'log 2 eggs', 'show today totals'",
            json!([]),
        ))
    }

    async fn estimate(&self, food_name: &str) -> Result<String> {
        let key = food_name.to_lowercase();
        let (serving_desc, cal, protein, carbs, fat) = match key.as_str() {
            "egg" => ("1 large", 70.0, 6.0, 0.6, 5.0),
            "chicken" => ("100 g cooked", 165.0, 31.0, 0.0, 3.6),
            "rice" => ("1 cup cooked", 206.0, 4.3, 45.0, 0.4),
            "wrap" => ("1 tortilla", 110.0, 10.0, 12.0, 2.0),
            _ => ("1 serving", 100.0, 5.0, 5.0, 3.0),
        };

        Ok(Self::reply(
            &format!("(offline) Using average nutrition for {}.", food_name),
            json!([{"action": "add_food", "args": {
                "name": key,
                "serving_desc": serving_desc,
                "cal": cal,
                "protein": protein,
                "carbs": carbs,
                "fat": fat,
                "provenance": "llm_estimate"
            }}]),
        ))
    }

    async fn repair(&self, raw: &str, _errors: &[String]) -> Result<String> {
        // Nothing smarter to do without a model; the caller fails softly
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn complete(utterance: &str) -> Value {
        let backend = OfflineCoach::new();
        let transcript = vec![Message::human(utterance)];
        let raw = backend.complete(&transcript).await.unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_set_goal_with_four_numbers() {
        let reply = complete("set goal 1800 140 170 60").await;

        assert_eq!(reply["actions"][0]["action"], "set_goal");
        assert_eq!(reply["actions"][0]["args"]["calories"], 1800.0);
        assert_eq!(reply["actions"][0]["args"]["fat_g"], 60.0);
    }

    #[tokio::test]
    async fn test_set_goal_with_too_few_numbers() {
        let reply = complete("set goal 1800 140").await;

        assert_eq!(reply["speak"], "Give four numbers: calories protein carbs fat.");
        assert_eq!(reply["actions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_log_with_qty_and_plural() {
        let reply = complete("log 2 eggs").await;

        assert_eq!(reply["speak"], "Logging 2 egg.");
        let items = &reply["actions"][0]["args"]["items"];
        assert_eq!(items[0]["name"], "egg");
        assert_eq!(items[0]["qty"], 2.0);
    }

    #[tokio::test]
    async fn test_log_without_qty() {
        let reply = complete("log banana").await;

        let items = &reply["actions"][0]["args"]["items"];
        assert_eq!(items[0]["name"], "banana");
        assert_eq!(items[0]["qty"], 1.0);
    }

    #[tokio::test]
    async fn test_totals_request() {
        let reply = complete("show today totals").await;
        assert_eq!(reply["actions"][0]["action"], "day_summary");

        let reply = complete("what are my totals").await;
        assert_eq!(reply["actions"][0]["action"], "day_summary");
    }

    #[tokio::test]
    async fn test_fallback_help() {
        let reply = complete("hello there").await;

        assert!(reply["speak"].as_str().unwrap().starts_with("(offline)"));
        assert_eq!(reply["actions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_estimate_preset_and_default() {
        let backend = OfflineCoach::new();

        let raw = backend.estimate("rice").await.unwrap();
        let reply: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(reply["actions"][0]["args"]["cal"], 206.0);
        assert_eq!(reply["actions"][0]["args"]["provenance"], "llm_estimate");

        let raw = backend.estimate("Dragonfruit").await.unwrap();
        let reply: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(reply["actions"][0]["args"]["name"], "dragonfruit");
        assert_eq!(reply["actions"][0]["args"]["cal"], 100.0);
    }

    #[tokio::test]
    async fn test_repair_echoes_raw() {
        let backend = OfflineCoach::new();
        let raw = r#"{"done": false}"#;

        let echoed = backend
            .repair(raw, &["missing speak".to_string()])
            .await
            .unwrap();
        assert_eq!(echoed, raw);
    }
}
