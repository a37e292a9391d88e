use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use honey::assistant::timer::{STOPPED, TIMES_UP};
use honey::assistant::{
    Assistant, ChatBackend, FileStore, MemoryStore, NullFrontend, Sender, SessionEvent,
    SessionHandle, SharedStore, SilentSpeaker,
};
use honey::{ChatResponse, Message, Role};

enum Scripted {
    Reply(&'static str),
    Error(&'static str),
    Broken,
}

/// Answers by the latest user message, after a per-message delay
#[derive(Default)]
struct ScriptedBackend {
    script: HashMap<&'static str, (Duration, Scripted)>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedBackend {
    fn on(mut self, utterance: &'static str, delay_secs: u64, outcome: Scripted) -> Self {
        self.script
            .insert(utterance, (Duration::from_secs(delay_secs), outcome));
        self
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, messages: Vec<Message>) -> Result<ChatResponse> {
        self.calls.lock().await.push(messages.clone());
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        let (delay, outcome) = self
            .script
            .get(last.as_str())
            .ok_or_else(|| anyhow!("unscripted: {}", last))?;
        tokio::time::sleep(*delay).await;
        match outcome {
            Scripted::Reply(text) => Ok(ChatResponse::reply(*text)),
            Scripted::Error(error) => Ok(ChatResponse::error(*error, None)),
            Scripted::Broken => Err(anyhow!("connection reset")),
        }
    }
}

fn start(storage: SharedStore, backend: Arc<ScriptedBackend>) -> SessionHandle {
    let assistant = Assistant::new(storage, Box::new(NullFrontend), Box::new(SilentSpeaker));
    let (handle, _task) = SessionHandle::spawn(assistant, backend);
    handle
}

fn memory() -> SharedStore {
    Arc::new(MemoryStore::new())
}

#[tokio::test(start_paused = true)]
async fn test_task_phrases_never_reach_backend() {
    let backend = Arc::new(ScriptedBackend::default());
    let session = start(memory(), backend.clone());

    session.user_text("add task mock test").unwrap();
    session.user_text("show my tasks please").unwrap();
    session.user_text("   ").unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snapshot = session.snapshot().await.unwrap();
    assert!(backend.calls.lock().await.is_empty());
    assert_eq!(snapshot.tasks.len(), 1);
    // welcome + 2 x (user turn, reply)
    assert_eq!(snapshot.transcript.len(), 5);
    assert_eq!(
        snapshot.transcript.last().unwrap().text,
        "Here are your tasks:\n1. mock test"
    );
    assert!(snapshot.conversation.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_timer_runs_to_zero_and_stops_itself() {
    let session = start(memory(), Arc::new(ScriptedBackend::default()));

    session.user_text("start timer").unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(session.snapshot().await.unwrap().timer.remaining_seconds, 1500);

    tokio::time::sleep(Duration::from_secs(1505)).await;
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.timer.remaining_seconds, 0);
    assert!(!snapshot.timer.running);

    let times_up = snapshot
        .transcript
        .iter()
        .filter(|e| e.text == TIMES_UP)
        .count();
    assert_eq!(times_up, 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_freezes_countdown() {
    let session = start(memory(), Arc::new(ScriptedBackend::default()));

    session
        .send(SessionEvent::StartTimer { minutes: 1 })
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    session.send(SessionEvent::StopTimer).unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.timer.remaining_seconds, 50);
    assert!(!snapshot.timer.running);
    assert_eq!(snapshot.transcript.last().unwrap().text, STOPPED);
}

#[tokio::test(start_paused = true)]
async fn test_restart_does_not_stack_intervals() {
    let session = start(memory(), Arc::new(ScriptedBackend::default()));

    session.send(SessionEvent::StartTimer { minutes: 1 }).unwrap();
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    session.send(SessionEvent::StartTimer { minutes: 1 }).unwrap();
    tokio::time::sleep(Duration::from_millis(10_200)).await;

    // One interval only: 10 ticks since the restart, not 15
    let snapshot = session.snapshot().await.unwrap();
    assert_eq!(snapshot.timer.remaining_seconds, 50);
}

#[tokio::test(start_paused = true)]
async fn test_replies_apply_in_arrival_order() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .on("first", 5, Scripted::Reply("slow answer"))
            .on("second", 1, Scripted::Reply("fast answer")),
    );
    let session = start(memory(), backend.clone());

    session.user_text("first").unwrap();
    session.user_text("second").unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let snapshot = session.snapshot().await.unwrap();
    let contents: Vec<_> = snapshot
        .conversation
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(
        contents,
        vec![
            (Role::User, "first"),
            (Role::User, "second"),
            (Role::Assistant, "fast answer"),
            (Role::Assistant, "slow answer"),
        ]
    );

    // Second request carried the full window so far
    let calls = backend.calls.lock().await;
    assert_eq!(calls[1].len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failures_only_add_notices() {
    let backend = Arc::new(
        ScriptedBackend::default()
            .on("hello", 0, Scripted::Error("Groq API error"))
            .on("again", 0, Scripted::Broken),
    );
    let session = start(memory(), backend);

    session.user_text("hello").unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    session.user_text("again").unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snapshot = session.snapshot().await.unwrap();
    assert!(snapshot.conversation.iter().all(|m| m.role == Role::User));

    let honey: Vec<_> = snapshot
        .transcript
        .iter()
        .filter(|e| e.sender == Sender::Honey)
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(
        honey[1..],
        [
            "My brain server failed: Groq API error.",
            "Arre, something broke on the server. Try again in a bit.",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_plan_and_tasks_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage: SharedStore = Arc::new(FileStore::new(dir.path()));
    let backend = Arc::new(ScriptedBackend::default().on(
        "Honey, I have exams and need a study plan. Ask me for details and then create a clear day-by-day plan.",
        0,
        Scripted::Reply("Day 1: Maths 3h\nDay 2: Physics 2h"),
    ));

    let session = start(storage.clone(), backend.clone());
    session.send(SessionEvent::AskPlan).unwrap();
    session.send(SessionEvent::AddTask("past papers".to_string())).unwrap();
    session.send(SessionEvent::ToggleTask(0)).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(session.snapshot().await.unwrap().plan.is_some());
    drop(session);

    let reopened = start(storage, backend);
    let snapshot = reopened.snapshot().await.unwrap();
    assert_eq!(
        snapshot.plan.as_deref(),
        Some("Day 1: Maths 3h\nDay 2: Physics 2h")
    );
    assert_eq!(snapshot.tasks.len(), 1);
    assert!(snapshot.tasks[0].done);
    // Only the welcome: the transcript does not persist
    assert_eq!(snapshot.transcript.len(), 1);
    assert!(snapshot.conversation.is_empty());
}
