//! End-to-end flows over the provider, event pump, and file storage.

use std::sync::Arc;

use lorebook_application::{ChatEventPump, ChatProvider};
use lorebook_core::chat::{AiEvent, AiEventKind, AiPhase, MessageRole, OutputKind};
use lorebook_infrastructure::FileKeyValueStorage;
use tokio::sync::mpsc;

fn status(chat_id: &str, phase: AiPhase, label: Option<&str>) -> AiEvent {
    AiEvent::new(
        chat_id,
        AiEventKind::Status {
            phase,
            label: label.map(str::to_string),
        },
    )
}

fn token(chat_id: &str, content: &str) -> AiEvent {
    AiEvent::new(
        chat_id,
        AiEventKind::Output {
            kind: OutputKind::Token,
            content: content.to_string(),
        },
    )
}

#[tokio::test]
async fn test_streamed_turn_persists_across_restart() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let storage = || Arc::new(FileKeyValueStorage::new(temp_dir.path().to_path_buf()));

    let chat_id = {
        let provider = ChatProvider::new();
        let context = provider.initialize(storage()).await.unwrap();

        let chat_id = context.add_session(Some("Garden log")).await;
        context.set_current_session_id(&chat_id).await;
        context.append_user_message(&chat_id, "Summarize this week").await;
        context.begin_turn(&chat_id).await;

        let (tx, rx) = mpsc::unbounded_channel();
        let pump = ChatEventPump::new(context.clone());

        tx.send(status(&chat_id, AiPhase::Thinking, Some("thinking")))
            .unwrap();
        tx.send(token(&chat_id, "You planted ")).unwrap();
        tx.send(token(&chat_id, "tomatoes.")).unwrap();
        tx.send(AiEvent::new(&chat_id, AiEventKind::Done)).unwrap();
        drop(tx);

        pump.run(rx).await;

        let state = context.turn_state(&chat_id).await.unwrap();
        assert_eq!(state.phase, AiPhase::Done);
        assert_eq!(state.status_label.as_deref(), Some("thinking"));
        chat_id
    };

    // Restart: a fresh provider over the same directory sees the session,
    // while the finished turn's transient state is gone.
    let provider = ChatProvider::new();
    let context = provider.initialize(storage()).await.unwrap();

    assert!(context.has_hydrated());
    let session = context.current_session().await.unwrap();
    assert_eq!(session.id, chat_id);
    assert_eq!(session.title, "Garden log");
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].role, MessageRole::User);
    assert_eq!(session.messages[1].role, MessageRole::Assistant);
    assert_eq!(session.messages[1].content, "You planted tomatoes.");
    assert!(context.turn_state(&chat_id).await.is_none());
}

#[tokio::test]
async fn test_interleaved_sessions_accumulate_independently() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let provider = ChatProvider::new();
    let context = provider
        .initialize(Arc::new(FileKeyValueStorage::new(
            temp_dir.path().to_path_buf(),
        )))
        .await
        .unwrap();

    let a = context.add_session(None).await;
    let b = context.add_session(None).await;
    context.begin_turn(&a).await;
    context.begin_turn(&b).await;

    let (tx, rx) = mpsc::unbounded_channel();
    let pump = ChatEventPump::new(context.clone());

    // Two streams interleave on one channel; routing is by chat_id.
    tx.send(token(&a, "first ")).unwrap();
    tx.send(token(&b, "second ")).unwrap();
    tx.send(token(&a, "session")).unwrap();
    tx.send(token(&b, "session")).unwrap();
    tx.send(AiEvent::new(&a, AiEventKind::Done)).unwrap();
    tx.send(AiEvent::new(
        &b,
        AiEventKind::Error {
            message: "stream reset".to_string(),
        },
    ))
    .unwrap();
    drop(tx);

    pump.run(rx).await;

    let sessions = context.sessions().await;
    let session_a = sessions.iter().find(|s| s.id == a).unwrap();
    let session_b = sessions.iter().find(|s| s.id == b).unwrap();
    assert_eq!(session_a.messages[0].content, "first session");
    assert_eq!(session_b.messages[0].content, "second session");

    assert_eq!(context.turn_state(&a).await.unwrap().phase, AiPhase::Done);
    let state_b = context.turn_state(&b).await.unwrap();
    assert_eq!(state_b.phase, AiPhase::Error);
    assert_eq!(state_b.error.as_deref(), Some("stream reset"));
}

#[tokio::test]
async fn test_deleting_session_drops_queued_events() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let provider = ChatProvider::new();
    let context = provider
        .initialize(Arc::new(FileKeyValueStorage::new(
            temp_dir.path().to_path_buf(),
        )))
        .await
        .unwrap();

    let keep = context.add_session(Some("Keep")).await;
    let doomed = context.add_session(Some("Doomed")).await;
    context.begin_turn(&keep).await;
    context.begin_turn(&doomed).await;

    context.delete_session(&doomed).await;

    let (tx, rx) = mpsc::unbounded_channel();
    let pump = ChatEventPump::new(context.clone());

    tx.send(token(&doomed, "late arrival")).unwrap();
    tx.send(token(&keep, "still here")).unwrap();
    drop(tx);

    pump.run(rx).await;

    let sessions = context.sessions().await;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].messages[0].content, "still here");
}
