//! Chat domain module.
//!
//! This module contains all chat-related domain models, the streamed-event
//! types, the per-turn status reducer, and the session store.
//!
//! # Module Structure
//!
//! - `message`: Chat message types (`MessageRole`, `ChatMessage`)
//! - `session`: Session domain model (`SessionItem`)
//! - `event`: Streamed assistant events (`AiEvent`, `AiEventKind`)
//! - `turn`: Per-turn status state machine (`AiPhase`, `AiState`, `reduce`)
//! - `store`: Multi-session store (`SessionStore`)

mod event;
mod message;
mod session;
mod store;
mod turn;

// Re-export public API
pub use event::{AiEvent, AiEventKind, OutputKind};
pub use message::{ChatMessage, MessageRole};
pub use session::{DEFAULT_SESSION_TITLE, SessionItem};
pub use store::SessionStore;
pub use turn::{AiPhase, AiState, reduce};
