//! Repository layer for database operations
//!
//! Each repository wraps the shared [`Database`](crate::db::Database)
//! handle and owns the SQL for one aggregate. All statements are
//! parameterized; user text never reaches the database unescaped.

pub mod food_repository;
pub mod goal_repository;
pub mod log_repository;

pub use food_repository::FoodRepository;
pub use goal_repository::GoalRepository;
pub use log_repository::LogRepository;
