//! Multi-session chat store.
//!
//! `SessionStore` is the in-memory value the rest of the application
//! operates on: every persisted session, the pointer to the current one,
//! and the bookkeeping for assistant messages that are still streaming.
//! All operations are synchronous and free of I/O; durability is layered
//! on top by serializing the whole store through a `KeyValueStorage`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::message::{ChatMessage, MessageRole};
use super::session::SessionItem;

/// Ordered collection of chat sessions plus the current-session pointer.
///
/// The `streaming` map tracks, per session, the index of the assistant
/// message currently being accumulated from `output.token` events. It is
/// rebuilt per process run and intentionally not serialized: a reloaded
/// store has no turn in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStore {
    #[serde(default)]
    sessions: Vec<SessionItem>,
    #[serde(default)]
    current_session_id: Option<String>,
    #[serde(skip)]
    streaming: HashMap<String, usize>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new session and returns its id.
    ///
    /// The new session is appended to the collection but NOT selected;
    /// switching the current-session pointer is the caller's decision.
    pub fn add_session(&mut self, title: Option<&str>) -> String {
        let session = SessionItem::new(title);
        let id = session.id.clone();
        self.sessions.push(session);
        id
    }

    /// Sets the current-session pointer.
    ///
    /// No existence check is performed; a dangling pointer resolves to
    /// "no active session" in [`SessionStore::current_session`].
    pub fn set_current_session_id(&mut self, id: impl Into<String>) {
        self.current_session_id = Some(id.into());
    }

    /// The current-session pointer, whether or not it resolves.
    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    /// Resolves the current-session pointer against the collection.
    ///
    /// Returns `None` when the pointer is unset or dangling. Never fails.
    pub fn current_session(&self) -> Option<&SessionItem> {
        let id = self.current_session_id.as_deref()?;
        self.session(id)
    }

    /// Finds a session by id.
    pub fn session(&self, id: &str) -> Option<&SessionItem> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn session_mut(&mut self, id: &str) -> Option<&mut SessionItem> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// Whether a session with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.session(id).is_some()
    }

    /// All sessions, in creation order.
    pub fn sessions(&self) -> &[SessionItem] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Appends a complete message to a session.
    ///
    /// Returns `false` (and changes nothing) when the session does not
    /// exist. Used for user and system messages; streamed assistant
    /// content goes through [`SessionStore::append_chat_token`].
    pub fn append_message(&mut self, chat_id: &str, role: MessageRole, content: &str) -> bool {
        let Some(session) = self.session_mut(chat_id) else {
            return false;
        };
        session.messages.push(ChatMessage::new(chat_id, role, content));
        session.touch();
        true
    }

    /// Appends streamed content to the in-progress assistant message.
    ///
    /// The first token of a turn creates the assistant message; subsequent
    /// tokens are concatenated onto it. Returns `false` when the session
    /// does not exist (late event for a deleted session).
    pub fn append_chat_token(&mut self, chat_id: &str, token: &str) -> bool {
        if !self.contains(chat_id) {
            return false;
        }

        if let Some(index) = self.streaming.get(chat_id).copied() {
            let session = self.session_mut(chat_id).expect("session checked above");
            if let Some(message) = session.messages.get_mut(index) {
                message.content.push_str(token);
                session.touch();
                return true;
            }
        }

        let session = self.session_mut(chat_id).expect("session checked above");
        session
            .messages
            .push(ChatMessage::new(chat_id, MessageRole::Assistant, token));
        let index = session.messages.len() - 1;
        session.touch();
        self.streaming.insert(chat_id.to_string(), index);
        true
    }

    /// Replaces the in-progress assistant message with full content.
    ///
    /// This is the `output.message` path: whatever tokens were accumulated
    /// so far are discarded in favor of the complete content. Creates the
    /// assistant message when no streaming one exists yet.
    pub fn set_message_content(&mut self, chat_id: &str, content: &str) -> bool {
        if !self.contains(chat_id) {
            return false;
        }

        if let Some(index) = self.streaming.get(chat_id).copied() {
            let session = self.session_mut(chat_id).expect("session checked above");
            if let Some(message) = session.messages.get_mut(index) {
                message.content = content.to_string();
                session.touch();
                return true;
            }
        }

        let session = self.session_mut(chat_id).expect("session checked above");
        session
            .messages
            .push(ChatMessage::new(chat_id, MessageRole::Assistant, content));
        let index = session.messages.len() - 1;
        session.touch();
        self.streaming.insert(chat_id.to_string(), index);
        true
    }

    /// Ends token accumulation for a session.
    ///
    /// The next `output.token` event starts a new assistant message.
    pub fn finish_streaming(&mut self, chat_id: &str) {
        self.streaming.remove(chat_id);
    }

    /// Removes a session by id.
    ///
    /// When the removed session was the current one, the pointer is
    /// cleared; no other session is selected in its place.
    pub fn delete_session(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return false;
        }

        self.streaming.remove(id);
        if self.current_session_id.as_deref() == Some(id) {
            self.current_session_id = None;
        }
        true
    }

    /// Renames a session, updating its last-modified timestamp.
    pub fn rename_session(&mut self, id: &str, title: &str) -> bool {
        let Some(session) = self.session_mut(id) else {
            return false;
        };
        session.title = title.to_string();
        session.touch();
        true
    }
}
