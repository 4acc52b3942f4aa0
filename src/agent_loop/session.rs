//! Per-conversation state: the message log and the current model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::conversation::ConversationStore;

/// One conversation with its current model.
///
/// Passed by `&mut` into [`Orchestrator::send_message`](super::Orchestrator::send_message),
/// so a session only ever has one call in flight.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    pub(crate) conversation: ConversationStore,
    pub(crate) model: String,
}

impl Session {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            conversation: ConversationStore::new(),
            model: model.into(),
        }
    }

    /// Start with a system message at the head of the conversation.
    pub fn with_system_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            conversation: ConversationStore::with_system(prompt),
            ..Self::new(model)
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    pub fn add_system_message(&mut self, text: impl Into<String>) {
        self.conversation.append_system(text);
    }

    pub fn clear(&mut self) {
        tracing::info!(session = %self.id, dropped = self.conversation.len(), "conversation cleared");
        self.conversation.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn system_prompt_seeds_conversation() {
        let session = Session::with_system_prompt("GPT-5.1", "Be terse.");
        assert_eq!(session.model(), "GPT-5.1");
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.conversation().messages()[0].role, Role::System);
    }

    #[test]
    fn clear_keeps_identity_and_model() {
        let mut session = Session::new("glm-4.6");
        let id = session.id();
        session.add_system_message("x");
        session.clear();
        assert!(session.conversation().is_empty());
        assert_eq!(session.id(), id);
        assert_eq!(session.model(), "glm-4.6");
    }
}
