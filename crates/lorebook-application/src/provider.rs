//! Provider wiring for the chat context.
//!
//! The context must be initialized exactly once, with its storage adapter
//! injected, before anything consumes it. Consuming it earlier is a
//! programming error and fails loudly rather than returning a default.

use std::sync::Arc;

use lorebook_core::error::{LorebookError, Result};
use lorebook_core::storage::KeyValueStorage;
use once_cell::sync::OnceCell;

use crate::chat_context::ChatContext;

/// Owns the single `ChatContext` instance for an application.
///
/// `initialize` builds the context, runs hydration, and installs it;
/// [`ChatProvider::context`] panics when called before that, preserving
/// the "must be used within the provider" contract. Ports that can handle
/// absence use [`ChatProvider::try_context`] instead.
#[derive(Default)]
pub struct ChatProvider {
    context: OnceCell<Arc<ChatContext>>,
}

impl ChatProvider {
    /// Creates an empty, uninitialized provider.
    pub const fn new() -> Self {
        Self {
            context: OnceCell::new(),
        }
    }

    /// Builds and hydrates the context over the given storage adapter.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider was already initialized.
    pub async fn initialize(
        &self,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Arc<ChatContext>> {
        let context = Arc::new(ChatContext::new(storage));
        context.hydrate().await;

        self.context
            .set(context.clone())
            .map_err(|_| LorebookError::Provider("ChatProvider initialized twice".to_string()))?;

        tracing::debug!("[ChatProvider] Initialized");
        Ok(context)
    }

    /// The initialized context.
    ///
    /// # Panics
    ///
    /// Panics when called before [`ChatProvider::initialize`]. Misuse of
    /// the provider is a bug in the caller, not a recoverable condition.
    pub fn context(&self) -> Arc<ChatContext> {
        self.try_context()
            .expect("ChatContext must be used within an initialized ChatProvider")
    }

    /// The context, or `None` before initialization.
    pub fn try_context(&self) -> Option<Arc<ChatContext>> {
        self.context.get().cloned()
    }
}
