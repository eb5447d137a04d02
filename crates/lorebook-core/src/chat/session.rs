//! Session domain model.
//!
//! This module contains the core SessionItem entity that represents
//! one titled conversation thread in the application's domain layer.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

/// Title given to sessions created without an explicit one.
pub const DEFAULT_SESSION_TITLE: &str = "New chat";

/// A titled, ordered conversation thread uniquely identified by id.
///
/// A session contains:
/// - The full message history, in conversation order
/// - A human-readable title (placeholder until the user renames it)
/// - Timestamps for creation and last update
///
/// This is the "pure" domain model that business logic operates on,
/// independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionItem {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
    /// Ordered message history (append order = conversation order)
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl SessionItem {
    /// Creates an empty session with a fresh UUID id.
    ///
    /// Falls back to [`DEFAULT_SESSION_TITLE`] when no title is given.
    pub fn new(title: Option<&str>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.unwrap_or(DEFAULT_SESSION_TITLE).to_string(),
            created_at: now.clone(),
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Updates the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
