//! Streamed-event consumption.
//!
//! A single task drains the ordered event stream into the chat context,
//! which preserves per-session event ordering by construction. Shutdown
//! is cooperative via a cancellation token; events already queued for a
//! deleted session fall into the context's no-op path.

use std::sync::Arc;

use lorebook_core::chat::AiEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::chat_context::ChatContext;

/// Drains a stream of `AiEvent`s into a `ChatContext`.
pub struct ChatEventPump {
    context: Arc<ChatContext>,
    token: CancellationToken,
}

impl ChatEventPump {
    /// Creates a pump over the given context with a fresh token.
    pub fn new(context: Arc<ChatContext>) -> Self {
        Self {
            context,
            token: CancellationToken::new(),
        }
    }

    /// A clone of the pump's cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Requests cooperative shutdown.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Processes events until the stream closes or the token fires.
    ///
    /// Events are applied strictly in arrival order. Cancellation takes
    /// priority over queued events: nothing further is applied once the
    /// token has fired.
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<AiEvent>) {
        loop {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => {
                    tracing::debug!("[ChatEventPump] Cancelled, stopping");
                    break;
                }
                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => self.context.apply_event(&event).await,
                        None => {
                            tracing::debug!("[ChatEventPump] Stream closed, stopping");
                            break;
                        }
                    }
                }
            }
        }
    }
}
