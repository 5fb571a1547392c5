//! Data models for Coach
//!
//! Plain structs mirroring the database schema, plus the composed
//! day-summary types returned by the log repository.

pub mod food;
pub mod goal;
pub mod summary;

pub use food::{Food, NewFood, Provenance};
pub use goal::Goal;
pub use summary::{DaySummary, MacroTotals, SummaryItem};
