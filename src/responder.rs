use chat_sync::Sender;

use crate::models::StoredMessage;

pub const DEFAULT_PREFIX: &str = "[dev backend]";

/// Stand-in for the retrieval/LLM pipeline. Answers deterministically so a
/// frontend can be exercised without any model running.
#[derive(Clone, Debug)]
pub struct DevResponder {
    prefix: String,
}

impl DevResponder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// `history` excludes the question being answered.
    pub fn reply(&self, history: &[StoredMessage], question: &str) -> String {
        let earlier = history.iter().filter(|m| m.role == Sender::User).count();
        let context = match earlier {
            0 => "This is the first question in this chat.".to_string(),
            1 => "You asked 1 question before this one.".to_string(),
            n => format!("You asked {n} questions before this one."),
        };
        format!("{} You asked: \"{}\". {context}", self.prefix, question.trim())
    }
}

impl Default for DevResponder {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
