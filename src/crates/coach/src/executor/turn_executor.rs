//! Turn Execution
//!
//! Drives one conversation turn end to end: complete a reply from the model,
//! decode and validate it, give the model a single chance to repair an
//! invalid reply, then dispatch the surviving actions and return the text for
//! the user. Failures produce an apologetic reply rather than an error; only
//! transport problems surface to the caller.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::context::ChatSession;
use crate::error::{CoachError, Result};
use crate::executor::dispatcher::{ActionDispatcher, ActionReport};
use crate::executor::llm_provider::ModelBackend;
use crate::turn::{canonicalize, inject_missing_dates, parse_reply, validate, TurnPlan};

/// Reply used when the model produced something that is not JSON
const DECODE_APOLOGY: &str = "Sorry, please try again.";

/// Everything one executed turn produced
#[derive(Debug)]
pub struct TurnOutcome {
    /// Text for the user
    pub speak: String,

    /// True when the model ended the conversation
    pub done: bool,

    /// Per-action outcome reports, in dispatch order
    pub reports: Vec<ActionReport>,
}

impl TurnOutcome {
    fn speak_only(speak: String) -> Self {
        Self {
            speak,
            done: false,
            reports: Vec::new(),
        }
    }
}

/// Runs the parse, validate, repair, dispatch cycle for each utterance
pub struct TurnExecutor {
    backend: Arc<dyn ModelBackend>,
    dispatcher: ActionDispatcher,
    chat: ChatConfig,
}

impl TurnExecutor {
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        dispatcher: ActionDispatcher,
        chat: ChatConfig,
    ) -> Self {
        Self {
            backend,
            dispatcher,
            chat,
        }
    }

    /// Run one full turn for a user utterance
    ///
    /// The utterance and the resulting reply are appended to the session
    /// transcript. `today` anchors every date default in the turn.
    pub async fn execute_turn(
        &self,
        session: &mut ChatSession,
        utterance: &str,
        today: NaiveDate,
    ) -> Result<TurnOutcome> {
        session.push_user(utterance);

        let raw = self.backend.complete(session.messages()).await?;

        let plan = match self.plan_turn(&raw, today).await {
            Ok(plan) => plan,
            Err(CoachError::Decode(reason)) => {
                warn!(%reason, "Reply did not decode, answering with an apology");
                session.push_assistant(DECODE_APOLOGY);
                return Ok(TurnOutcome::speak_only(DECODE_APOLOGY.to_string()));
            }
            Err(e) => return Err(e),
        };

        let mut reports = Vec::with_capacity(plan.actions.len());
        for action in &plan.actions {
            reports.push(self.dispatcher.dispatch(action, today).await);
        }

        session.push_assistant(&plan.speak);
        Ok(TurnOutcome {
            speak: plan.speak,
            done: plan.done,
            reports,
        })
    }

    /// Decode and validate a raw reply, repairing it at most
    /// `max_repair_attempts` times
    ///
    /// Date injection runs before any repair: when the only gap was a
    /// missing log_meal date the turn proceeds without a model round trip.
    /// A reply that is still invalid after the repair budget degrades to an
    /// apologetic plan naming the first three problems.
    async fn plan_turn(&self, raw: &str, today: NaiveDate) -> Result<TurnPlan> {
        let mut raw = raw.to_string();
        let mut attempts_left = self.chat.max_repair_attempts;

        loop {
            let mut payload = parse_reply(&raw)?;
            canonicalize(&mut payload);

            let mut errors = validate(&payload);
            if !errors.is_empty() && inject_missing_dates(&mut payload, today) {
                errors = validate(&payload);
            }
            if errors.is_empty() {
                return Ok(TurnPlan::from_payload(&payload));
            }

            if attempts_left == 0 {
                warn!(?errors, "Reply still invalid after repair budget");
                let shown: Vec<&str> = errors.iter().take(3).map(String::as_str).collect();
                return Ok(TurnPlan::speak_only(format!(
                    "Sorry, I had trouble understanding that. Errors: {}",
                    shown.join("; ")
                )));
            }
            attempts_left -= 1;

            debug!(?errors, "Asking the model to repair its reply");
            raw = self.backend.repair(&payload.to_string(), &errors).await?;
        }
    }
}
