//! Application layer of the Lorebook chat core.
//!
//! Composes the domain store and turn reducer with a storage adapter into
//! the `ChatContext` a UI consumes, the `ChatProvider` initialization
//! contract, and the event pump that drains the streamed assistant events.

pub mod chat_context;
pub mod event_pump;
pub mod provider;
pub mod telemetry;

pub use chat_context::{ChatContext, STORE_KEY};
pub use event_pump::ChatEventPump;
pub use provider::ChatProvider;
pub use telemetry::init_tracing;
