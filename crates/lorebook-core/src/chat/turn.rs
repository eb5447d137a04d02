//! Per-turn status state machine.
//!
//! One assistant turn moves through server-driven phases (thinking, writing,
//! tool use) before reaching a terminal `done` or `error`. The transition
//! function here is deliberately trusting: it records whatever phase the
//! event stream reports and enforces no transition graph. Sequence validity
//! is the producer's responsibility.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::event::AiEventKind;

/// Lifecycle phase of one in-flight assistant turn.
///
/// This tracks a single turn, not the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AiPhase {
    /// No turn in flight.
    #[default]
    Idle,
    /// The assistant is reasoning before producing output.
    Thinking,
    /// The assistant is streaming message content.
    Writing,
    /// The assistant is running a tool.
    Tool,
    /// The turn finished successfully.
    Done,
    /// The turn finished with an error.
    Error,
}

impl AiPhase {
    /// Whether this phase ends the turn.
    pub fn is_terminal(self) -> bool {
        matches!(self, AiPhase::Done | AiPhase::Error)
    }
}

/// Transient status of one in-flight assistant turn.
///
/// Lives only while the turn is in flight and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiState {
    /// Current phase of the turn.
    pub phase: AiPhase,
    /// Human-readable label from the last `status` event, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
    /// Failure message from a terminal `error` event, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiState {
    /// Whether the turn has reached `done` or `error`.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Advances the turn status for one incoming event.
///
/// Pure and total: no I/O, no panics, fully synchronous. Content-bearing
/// `output` events pass through untouched; routing their content into the
/// session store is the caller's job, before or after this call.
///
/// - `status` stores the reported phase and overwrites the label with the
///   event's label, even when that label is absent.
/// - `done` marks the turn terminal and preserves every other field, so a
///   duplicated `done` is idempotent.
/// - `error` marks the turn terminal and records the message; the last
///   status label is preserved.
/// - Unrecognized events leave the state untouched.
pub fn reduce(state: AiState, event: &AiEventKind) -> AiState {
    match event {
        AiEventKind::Status { phase, label } => AiState {
            phase: *phase,
            status_label: label.clone(),
            ..state
        },
        AiEventKind::Output { .. } => state,
        AiEventKind::Done => AiState {
            phase: AiPhase::Done,
            ..state
        },
        AiEventKind::Error { message } => AiState {
            phase: AiPhase::Error,
            error: Some(message.clone()),
            ..state
        },
        AiEventKind::Unknown => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::event::OutputKind;

    fn status(phase: AiPhase, label: Option<&str>) -> AiEventKind {
        AiEventKind::Status {
            phase,
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = AiState::default();
        assert_eq!(state.phase, AiPhase::Idle);
        assert!(state.status_label.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_status_sets_phase_and_label() {
        let state = reduce(AiState::default(), &status(AiPhase::Thinking, Some("Reading")));
        assert_eq!(state.phase, AiPhase::Thinking);
        assert_eq!(state.status_label.as_deref(), Some("Reading"));
    }

    #[test]
    fn test_status_overwrites_label_even_with_none() {
        let state = reduce(AiState::default(), &status(AiPhase::Thinking, Some("Reading")));
        let state = reduce(state, &status(AiPhase::Writing, None));

        assert_eq!(state.phase, AiPhase::Writing);
        assert!(state.status_label.is_none(), "label must not be merged");
    }

    #[test]
    fn test_output_leaves_state_unchanged() {
        let before = reduce(AiState::default(), &status(AiPhase::Writing, Some("Drafting")));
        let after = reduce(
            before.clone(),
            &AiEventKind::Output {
                kind: OutputKind::Token,
                content: "chunk".to_string(),
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_done_preserves_last_status_label() {
        let state = reduce(AiState::default(), &status(AiPhase::Thinking, Some("thinking")));
        let state = reduce(state, &AiEventKind::Done);

        assert_eq!(state.phase, AiPhase::Done);
        assert_eq!(state.status_label.as_deref(), Some("thinking"));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_done_is_idempotent() {
        let once = reduce(AiState::default(), &AiEventKind::Done);
        let twice = reduce(once.clone(), &AiEventKind::Done);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_error_records_message_and_keeps_label() {
        let state = reduce(AiState::default(), &status(AiPhase::Tool, Some("Running search")));
        let state = reduce(
            state,
            &AiEventKind::Error {
                message: "timeout".to_string(),
            },
        );

        assert_eq!(state.phase, AiPhase::Error);
        assert_eq!(state.error.as_deref(), Some("timeout"));
        assert_eq!(state.status_label.as_deref(), Some("Running search"));
    }

    #[test]
    fn test_unknown_event_is_a_no_op() {
        let before = reduce(AiState::default(), &status(AiPhase::Writing, None));
        let after = reduce(before.clone(), &AiEventKind::Unknown);
        assert_eq!(after, before);
    }

    #[test]
    fn test_phase_display_is_snake_case() {
        assert_eq!(AiPhase::Thinking.to_string(), "thinking");
        assert_eq!(AiPhase::Tool.to_string(), "tool");
    }
}
