use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::backend::ChatBackend;
use super::context::{Assistant, Effect, SessionSnapshot};
use super::timer::Ticker;
use crate::core::ChatResponse;

/// UI-side events a front end can send to the session
#[derive(Debug)]
pub enum SessionEvent {
    /// Typed or recognized utterance; goes through the command router
    UserText(String),
    AddTask(String),
    /// Zero-based position
    ToggleTask(usize),
    ClearTasks,
    StartTimer { minutes: u32 },
    StopTimer,
    ShowTimer,
    AskPlan,
    ResetChat,
    Snapshot {
        response_tx: oneshot::Sender<SessionSnapshot>,
    },
}

/// Completions of work the actor started itself
#[derive(Debug)]
enum InternalEvent {
    Tick { generation: u64 },
    ChatCompleted(Result<ChatResponse>),
}

// Actor handle for talking to the session
#[derive(Clone)]
pub struct SessionHandle {
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

// Owns the assistant; runs in its own task
struct SessionActor {
    assistant: Assistant,
    backend: Arc<dyn ChatBackend>,
    ticker: Ticker,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    internal_rx: mpsc::UnboundedReceiver<InternalEvent>,
    internal_tx: mpsc::UnboundedSender<InternalEvent>,
}

impl SessionHandle {
    /// Start the session task. It greets, then runs until every handle is dropped.
    pub fn spawn(assistant: Assistant, backend: Arc<dyn ChatBackend>) -> (Self, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();

        let actor = SessionActor {
            assistant,
            backend,
            ticker: Ticker::new(),
            event_rx,
            internal_rx,
            internal_tx,
        };

        let task = tokio::spawn(actor.run());
        (Self { event_tx }, task)
    }

    pub fn send(&self, event: SessionEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .map_err(|_| anyhow!("Session is not running"))
    }

    pub fn user_text(&self, text: impl Into<String>) -> Result<()> {
        self.send(SessionEvent::UserText(text.into()))
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(SessionEvent::Snapshot { response_tx })?;
        response_rx
            .await
            .map_err(|_| anyhow!("Session did not respond"))
    }
}

impl SessionActor {
    async fn run(mut self) {
        self.assistant.load();

        loop {
            tokio::select! {
                // Drain our own completions first so a snapshot sees every
                // tick and reply that already arrived
                biased;

                Some(internal) = self.internal_rx.recv() => {
                    self.handle_internal(internal);
                }
                event = self.event_rx.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        tracing::info!("Session shutting down");
                        break;
                    }
                },
            }
        }

        self.ticker.cancel();
    }

    fn handle_event(&mut self, event: SessionEvent) {
        let effect = match event {
            SessionEvent::UserText(text) => self.assistant.handle_user_text(&text),
            SessionEvent::AddTask(text) => {
                self.assistant.add_task(&text);
                Effect::None
            }
            SessionEvent::ToggleTask(index) => {
                self.assistant.toggle_task(index);
                Effect::None
            }
            SessionEvent::ClearTasks => {
                self.assistant.clear_tasks();
                Effect::None
            }
            SessionEvent::StartTimer { minutes } => self.assistant.start_timer(minutes),
            SessionEvent::StopTimer => self.assistant.stop_timer(),
            SessionEvent::ShowTimer => {
                self.assistant.show_timer();
                Effect::None
            }
            SessionEvent::AskPlan => self.assistant.ask_plan(),
            SessionEvent::ResetChat => {
                self.assistant.reset_chat();
                Effect::None
            }
            SessionEvent::Snapshot { response_tx } => {
                let _ = response_tx.send(self.assistant.snapshot());
                Effect::None
            }
        };
        self.apply(effect);
    }

    fn handle_internal(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::Tick { generation } => {
                if !self.ticker.is_current(generation) {
                    tracing::trace!("Dropping stale tick from generation {}", generation);
                    return;
                }
                if self.assistant.tick() {
                    self.ticker.cancel();
                }
            }
            InternalEvent::ChatCompleted(result) => self.assistant.apply_chat_response(result),
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::TimerStarted => {
                self.ticker
                    .restart(self.internal_tx.clone(), |generation| InternalEvent::Tick {
                        generation,
                    });
            }
            Effect::TimerStopped => self.ticker.cancel(),
            Effect::Chat(window) => {
                // Not awaited: replies land in whatever order they finish
                let backend = self.backend.clone();
                let tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    let result = backend.send(window).await;
                    let _ = tx.send(InternalEvent::ChatCompleted(result));
                });
            }
        }
    }
}
