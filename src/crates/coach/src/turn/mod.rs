//! Turn Pipeline
//!
//! Converts raw model replies into validated, typed turn plans. A reply moves
//! through three stages: JSON extraction and decoding (`parser`), shorthand
//! canonicalization plus shape validation (`validator`), and materialization
//! into typed actions (`plan`).

pub mod parser;
pub mod plan;
pub mod validator;

pub use parser::parse_reply;
pub use plan::{Action, MealItem, TurnPlan};
pub use validator::{canonicalize, inject_missing_dates, validate};
