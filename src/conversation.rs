//! Append-only conversation history for one session.

use crate::types::Message;

/// Ordered message log. Entries are only ever appended; `clear` is the one
/// way to drop them and it drops all of them.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a system prompt.
    pub fn with_system(text: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.append_system(text);
        store
    }

    pub fn append_system(&mut self, text: impl Into<String>) {
        self.messages.push(Message::system(text));
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Append an assistant reply exactly as received.
    pub fn append_assistant(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn append_tool_result(
        &mut self,
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.messages
            .push(Message::tool_result(tool_call_id, tool_name, text));
    }

    /// Owned copy of the full log.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Borrow the log without copying.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
