//! Streamed assistant events.
//!
//! One assistant turn arrives as an ordered stream of tagged events. Every
//! event carries the id of the session it belongs to so that concurrent
//! sessions can interleave safely on one stream.

use serde::{Deserialize, Serialize};

use super::turn::AiPhase;

/// The kind of content carried by an `output` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// An incremental fragment, appended to the in-progress message.
    Token,
    /// The full message content, replacing anything accumulated so far.
    Message,
}

/// The typed portion of a streamed event.
///
/// The wire shape is `{"type": ..., "payload": ...}`; unrecognized tags
/// deserialize to [`AiEventKind::Unknown`] so that newer producers do not
/// break older consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AiEventKind {
    /// Phase transition with an optional human-readable label.
    Status {
        phase: AiPhase,
        #[serde(default)]
        label: Option<String>,
    },
    /// Incremental or final content for the in-progress assistant message.
    Output { kind: OutputKind, content: String },
    /// Terminal success signal for the turn.
    Done,
    /// Terminal failure signal for the turn.
    Error { message: String },
    /// Any event tag this build does not recognize.
    #[serde(other)]
    Unknown,
}

/// A streamed event routed to one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiEvent {
    /// The id of the session this event belongs to.
    pub chat_id: String,
    #[serde(flatten)]
    pub kind: AiEventKind,
}

impl AiEvent {
    pub fn new(chat_id: impl Into<String>, kind: AiEventKind) -> Self {
        Self {
            chat_id: chat_id.into(),
            kind,
        }
    }
}
