//! Chat context: store, reducer, and persistence composed into the single
//! object the UI consumes.
//!
//! `ChatContext` owns the session store behind an async lock, tracks the
//! transient per-session turn status, and writes the serialized store
//! through its injected `KeyValueStorage` on every mutation. Storage
//! failures degrade to in-memory operation; the store is a client cache,
//! not a system of record.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lorebook_core::chat::{
    AiEvent, AiEventKind, AiState, MessageRole, OutputKind, SessionItem, SessionStore, reduce,
};
use lorebook_core::error::{LorebookError, Result};
use lorebook_core::storage::KeyValueStorage;
use tokio::sync::RwLock;

/// Fixed storage key the serialized session store lives under.
pub const STORE_KEY: &str = "chat_sessions";

/// Composes the session store and the turn reducer over a storage adapter.
///
/// Constructed explicitly with its persistence adapter injected; there is
/// no module-level instance. One `ChatContext` is built at application
/// startup (see `ChatProvider`) and shared via `Arc`.
pub struct ChatContext {
    /// The session collection and current-session pointer.
    store: RwLock<SessionStore>,
    /// Transient turn status per session id. Never persisted.
    turns: RwLock<HashMap<String, AiState>>,
    /// Durable storage the store is written through.
    storage: Arc<dyn KeyValueStorage>,
    /// Whether the persisted store has been loaded at least once.
    has_hydrated: AtomicBool,
}

impl std::fmt::Debug for ChatContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatContext")
            .field("has_hydrated", &self.has_hydrated.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl ChatContext {
    /// Creates a context over the given storage adapter.
    ///
    /// The context starts empty and un-hydrated; call
    /// [`ChatContext::hydrate`] before serving reads so consumers never
    /// see a false-empty store.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            store: RwLock::new(SessionStore::new()),
            turns: RwLock::new(HashMap::new()),
            storage,
            has_hydrated: AtomicBool::new(false),
        }
    }

    /// Loads the persisted store from storage.
    ///
    /// A missing key hydrates to an empty store. A corrupt payload or a
    /// storage read failure is logged and also hydrates to an empty store;
    /// in every path the hydration flag flips to `true`, so "loaded and
    /// empty" is distinguishable from "not yet loaded".
    pub async fn hydrate(&self) {
        match self.storage.get(STORE_KEY).await {
            Ok(Some(serialized)) => match serde_json::from_str::<SessionStore>(&serialized) {
                Ok(loaded) => {
                    tracing::debug!(
                        "[ChatContext] Hydrated {} session(s) from storage",
                        loaded.len()
                    );
                    *self.store.write().await = loaded;
                }
                Err(e) => {
                    tracing::warn!(
                        "[ChatContext] Persisted chat store is unreadable, starting empty: {}",
                        e
                    );
                }
            },
            Ok(None) => {
                tracing::debug!("[ChatContext] No persisted chat store, starting empty");
            }
            Err(e) => {
                tracing::warn!(
                    "[ChatContext] Failed to read persisted chat store, starting empty: {}",
                    e
                );
            }
        }

        self.has_hydrated.store(true, Ordering::SeqCst);
    }

    /// Whether hydration has completed (successfully or degraded).
    pub fn has_hydrated(&self) -> bool {
        self.has_hydrated.load(Ordering::SeqCst)
    }

    /// Snapshot of all sessions, in creation order.
    pub async fn sessions(&self) -> Vec<SessionItem> {
        self.store.read().await.sessions().to_vec()
    }

    /// The current-session pointer.
    pub async fn current_session_id(&self) -> Option<String> {
        self.store
            .read()
            .await
            .current_session_id()
            .map(str::to_string)
    }

    /// Resolves the current-session pointer; `None` when unset or dangling.
    pub async fn current_session(&self) -> Option<SessionItem> {
        self.store.read().await.current_session().cloned()
    }

    /// Creates a new session and returns its id.
    ///
    /// Does not select the new session; callers decide whether to switch.
    pub async fn add_session(&self, title: Option<&str>) -> String {
        let id = {
            let mut store = self.store.write().await;
            store.add_session(title)
        };
        self.persist().await;
        id
    }

    /// Sets the current-session pointer.
    pub async fn set_current_session_id(&self, id: &str) {
        {
            let mut store = self.store.write().await;
            store.set_current_session_id(id);
        }
        self.persist().await;
    }

    /// Deletes a session and its turn state.
    ///
    /// When the deleted session was current, the pointer is cleared;
    /// explicit re-selection is required.
    pub async fn delete_session(&self, id: &str) -> bool {
        let deleted = {
            let mut store = self.store.write().await;
            store.delete_session(id)
        };
        if deleted {
            self.turns.write().await.remove(id);
            self.persist().await;
        }
        deleted
    }

    /// Renames a session.
    ///
    /// # Errors
    ///
    /// Returns [`LorebookError::NotFound`] when no session has the id.
    pub async fn rename_session(&self, id: &str, title: &str) -> Result<()> {
        let renamed = {
            let mut store = self.store.write().await;
            store.rename_session(id, title)
        };
        if !renamed {
            return Err(LorebookError::not_found("Session", id));
        }
        self.persist().await;
        Ok(())
    }

    /// Appends a user message to a session.
    ///
    /// Returns `false` (no-op) when the session does not exist.
    pub async fn append_user_message(&self, chat_id: &str, content: &str) -> bool {
        let appended = {
            let mut store = self.store.write().await;
            store.append_message(chat_id, MessageRole::User, content)
        };
        if appended {
            self.persist().await;
        }
        appended
    }

    /// Appends streamed assistant content to a session.
    ///
    /// The first token of a turn creates the assistant message; later
    /// tokens are concatenated. Returns `false` when the session does not
    /// exist.
    pub async fn append_chat_token(&self, chat_id: &str, token: &str) -> bool {
        let appended = {
            let mut store = self.store.write().await;
            store.append_chat_token(chat_id, token)
        };
        if appended {
            self.persist().await;
        }
        appended
    }

    /// Starts a new turn for a session, resetting its status to idle.
    ///
    /// Turn status is reset here, explicitly, rather than by a synthetic
    /// status event from the producer. Returns `false` when the session
    /// does not exist.
    pub async fn begin_turn(&self, chat_id: &str) -> bool {
        if !self.store.read().await.contains(chat_id) {
            tracing::debug!("[ChatContext] begin_turn for unknown session {}", chat_id);
            return false;
        }
        {
            let mut store = self.store.write().await;
            store.finish_streaming(chat_id);
        }
        self.turns
            .write()
            .await
            .insert(chat_id.to_string(), AiState::default());
        true
    }

    /// The status of the in-flight turn for a session, if any.
    pub async fn turn_state(&self, chat_id: &str) -> Option<AiState> {
        self.turns.read().await.get(chat_id).cloned()
    }

    /// Drops the turn status for a session and ends token accumulation.
    pub async fn end_turn(&self, chat_id: &str) {
        self.turns.write().await.remove(chat_id);
        self.store.write().await.finish_streaming(chat_id);
    }

    /// Routes one streamed event into the store and the turn reducer.
    ///
    /// - Events for sessions that no longer exist are dropped (late
    ///   arrivals after a delete).
    /// - `output` events are dropped once the turn is terminal; otherwise
    ///   their content goes to the store (`token` appends, `message`
    ///   replaces). The reducer leaves status untouched for them.
    /// - Every other event advances the turn status through `reduce`;
    ///   reaching a terminal phase ends token accumulation, so the next
    ///   turn starts a fresh assistant message.
    pub async fn apply_event(&self, event: &AiEvent) {
        let chat_id = event.chat_id.as_str();

        if !self.store.read().await.contains(chat_id) {
            tracing::debug!(
                "[ChatContext] Dropping event for unknown session {}",
                chat_id
            );
            return;
        }

        let current = self
            .turns
            .read()
            .await
            .get(chat_id)
            .cloned()
            .unwrap_or_default();

        match &event.kind {
            AiEventKind::Output { kind, content } => {
                if current.is_terminal() {
                    tracing::debug!(
                        "[ChatContext] Dropping output after terminal phase for session {}",
                        chat_id
                    );
                    return;
                }
                let applied = {
                    let mut store = self.store.write().await;
                    match kind {
                        OutputKind::Token => store.append_chat_token(chat_id, content),
                        OutputKind::Message => store.set_message_content(chat_id, content),
                    }
                };
                if applied {
                    self.persist().await;
                }
            }
            kind => {
                let next = reduce(current, kind);
                let terminal = next.is_terminal();
                self.turns.write().await.insert(chat_id.to_string(), next);
                if terminal {
                    self.store.write().await.finish_streaming(chat_id);
                }
            }
        }
    }

    /// Writes the serialized store through the storage adapter.
    ///
    /// Failures are logged and swallowed; the store keeps operating in
    /// memory for this mutation.
    async fn persist(&self) {
        let serialized = {
            let store = self.store.read().await;
            serde_json::to_string(&*store)
        };

        match serialized {
            Ok(json) => {
                if let Err(e) = self.storage.set(STORE_KEY, &json).await {
                    tracing::warn!(
                        "[ChatContext] Failed to persist chat store, continuing in memory: {}",
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!("[ChatContext] Failed to serialize chat store: {}", e);
            }
        }
    }
}

#[cfg(test)]
#[path = "chat_context_test.rs"]
mod tests;
