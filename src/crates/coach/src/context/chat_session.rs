//! Chat session tracking
//!
//! Holds the transcript of one conversation with the coach.

use chrono::{DateTime, Utc};
use llm::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One conversation with the coach
///
/// The transcript holds user and assistant messages only. The system prompt
/// is prepended by the model backend on every request, so it never appears
/// here and a saved session stays free of prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier
    pub session_id: String,

    /// Session creation timestamp
    pub created_at: DateTime<Utc>,

    /// Conversation transcript in order
    messages: Vec<Message>,
}

impl ChatSession {
    /// Create a new session with generated ID
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    /// Append a user utterance to the transcript
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::human(text));
    }

    /// Append an assistant reply to the transcript
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// Get the transcript
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of completed user turns
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == llm::MessageRole::Human)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::MessageRole;

    #[test]
    fn test_session_creation() {
        let session = ChatSession::new();
        assert!(!session.session_id.is_empty());
        assert!(session.is_empty());
        assert_eq!(session.turn_count(), 0);
    }

    #[test]
    fn test_transcript_order() {
        let mut session = ChatSession::new();
        session.push_user("log 2 eggs");
        session.push_assistant("Logged 2 eggs.");
        session.push_user("show today totals");

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::Human);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[0].content, "log 2 eggs");
        assert_eq!(session.turn_count(), 2);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = ChatSession::new();
        let b = ChatSession::new();
        assert_ne!(a.session_id, b.session_id);
    }
}
