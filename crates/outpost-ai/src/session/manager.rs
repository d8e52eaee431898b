//! Session struct and conversation history management.

use std::sync::atomic::AtomicBool;

use crate::{Message, Role};

/// A conversation session with ordered message history.
pub struct Session {
    /// Conversation message history, one user and one assistant entry per
    /// completed turn. Grows without bound; callers may apply `clear()`.
    pub(super) messages: Vec<Message>,
    /// System prompt (prepended to every API call, never stored in history).
    pub(super) system_prompt: Option<String>,
    /// Whether the session is currently processing a request.
    pub(super) busy: AtomicBool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Messages as sent to the service: system prompt first, then history.
    pub(crate) fn build_messages(&self) -> Vec<Message> {
        let mut msgs = Vec::new();
        if let Some(ref system) = self.system_prompt {
            msgs.push(Message {
                role: Role::System,
                content: system.clone(),
            });
        }
        msgs.extend(self.messages.clone());
        msgs
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Clear conversation history.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of messages in history.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_prepended_but_not_stored() {
        let mut session = Session::new().with_system_prompt("narrate");
        session.messages.push(Message {
            role: Role::User,
            content: "hello".into(),
        });

        let built = session.build_messages();
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].role, Role::System);
        assert_eq!(built[0].content, "narrate");
        assert_eq!(built[1].role, Role::User);

        // The stored history never contains the system message.
        assert_eq!(session.message_count(), 1);
        assert!(session.messages().iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn build_messages_without_system_prompt() {
        let session = Session::new();
        assert!(session.build_messages().is_empty());
    }

    #[test]
    fn clear_empties_history() {
        let mut session = Session::new();
        session.messages.push(Message {
            role: Role::User,
            content: "x".into(),
        });
        session.clear();
        assert_eq!(session.message_count(), 0);
    }
}
