//! Common test utilities and setup

use async_trait::async_trait;
use coach::db::Database;
use coach::{ModelBackend, Result};
use llm::Message;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

static TEST_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Create a migrated test database with a unique file name
pub async fn setup_test_db() -> (TempDir, Arc<Database>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let counter = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let db_path = temp_dir.path().join(format!("test_{}.db", counter));

    let db = Database::new(&db_path)
        .await
        .expect("Failed to create test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");

    (temp_dir, Arc::new(db))
}

/// Model backend that replays scripted replies and counts calls
///
/// Completions and repairs are consumed from queues; estimates answer from a
/// single scripted reply since the estimate prompt does not depend on
/// conversation state.
pub struct ScriptedBackend {
    completions: Mutex<VecDeque<String>>,
    repairs: Mutex<VecDeque<String>>,
    estimate_reply: Mutex<Option<String>>,
    complete_calls: AtomicUsize,
    estimate_calls: AtomicUsize,
    repair_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            completions: Mutex::new(VecDeque::new()),
            repairs: Mutex::new(VecDeque::new()),
            estimate_reply: Mutex::new(None),
            complete_calls: AtomicUsize::new(0),
            estimate_calls: AtomicUsize::new(0),
            repair_calls: AtomicUsize::new(0),
        }
    }

    pub fn queue_completion(self, reply: &str) -> Self {
        self.completions.lock().unwrap().push_back(reply.to_string());
        self
    }

    pub fn queue_repair(self, reply: &str) -> Self {
        self.repairs.lock().unwrap().push_back(reply.to_string());
        self
    }

    pub fn with_estimate(self, reply: &str) -> Self {
        *self.estimate_reply.lock().unwrap() = Some(reply.to_string());
        self
    }

    pub fn complete_calls(&self) -> usize {
        self.complete_calls.load(Ordering::SeqCst)
    }

    pub fn estimate_calls(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }

    pub fn repair_calls(&self) -> usize {
        self.repair_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, _transcript: &[Message]) -> Result<String> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .completions
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted completion left"))
    }

    async fn estimate(&self, _food_name: &str) -> Result<String> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .estimate_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "no estimate scripted".to_string()))
    }

    async fn repair(&self, raw: &str, _errors: &[String]) -> Result<String> {
        self.repair_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .repairs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| raw.to_string()))
    }
}
