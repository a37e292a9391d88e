use anyhow::Result;
use serde::Serialize;

use super::frontend::Frontend;
use super::plan::{PlanStore, ASK_PLAN_UTTERANCE};
use super::router::{classify, Command, TaskCommand, TimerCommand};
use super::storage::SharedStore;
use super::tasks::{self, Task, TaskStore};
use super::timer::{FocusTimer, TimerState};
use super::transcript::{Conversation, Sender, Transcript, TranscriptEntry};
use super::voice::Speaker;
use crate::core::{ChatResponse, Message};

pub const WELCOME: &str =
    "Hey, I'm Honey. Your slightly savage but supportive study buddy. What's up?";
pub const CHAT_CLEARED: &str = "Chat cleared. Fresh start, yaar.";
pub const SERVER_BROKE: &str = "Arre, something broke on the server. Try again in a bit.";
pub const EMPTY_REPLY: &str = "Hmm, I'm not sure what happened there.";

/// What the caller has to do after a handler ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    TimerStarted,
    TimerStopped,
    /// Send this window to the proxy and feed the result to `apply_chat_response`
    Chat(Vec<Message>),
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub tasks: Vec<Task>,
    pub timer: TimerState,
    pub transcript: Vec<TranscriptEntry>,
    pub conversation: Vec<Message>,
    pub plan: Option<String>,
}

/// All session state plus its output sinks. Every handler is synchronous;
/// timers and network calls are left to the caller via [`Effect`].
pub struct Assistant {
    tasks: TaskStore,
    timer: FocusTimer,
    transcript: Transcript,
    conversation: Conversation,
    plan: PlanStore,
    frontend: Box<dyn Frontend>,
    speaker: Box<dyn Speaker>,
}

impl Assistant {
    pub fn new(storage: SharedStore, frontend: Box<dyn Frontend>, speaker: Box<dyn Speaker>) -> Self {
        Self {
            tasks: TaskStore::load(storage.clone()),
            timer: FocusTimer::new(),
            transcript: Transcript::default(),
            conversation: Conversation::default(),
            plan: PlanStore::load(storage),
            frontend,
            speaker,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn timer(&self) -> TimerState {
        self.timer.state()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        self.transcript.entries()
    }

    pub fn conversation(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.current()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tasks: self.tasks().to_vec(),
            timer: self.timer(),
            transcript: self.transcript().to_vec(),
            conversation: self.conversation().to_vec(),
            plan: self.plan().map(str::to_string),
        }
    }

    /// First paint: persisted tasks and plan, idle timer, welcome line
    pub fn load(&mut self) {
        self.frontend.render_tasks(self.tasks.tasks());
        self.frontend
            .render_timer(&self.timer.display(), self.timer.is_running());
        if let Some(plan) = self.plan.current() {
            self.frontend.render_plan(plan);
        }
        self.say(WELCOME);
    }

    pub fn handle_user_text(&mut self, text: &str) -> Effect {
        let Some(command) = classify(text) else {
            return Effect::None;
        };

        let entry = self.transcript.push(Sender::User, text.trim());
        self.frontend.render_message(entry);

        self.dispatch(command)
    }

    fn dispatch(&mut self, command: Command) -> Effect {
        tracing::debug!("Dispatching {:?}", command);
        match command {
            Command::Task(TaskCommand::Add(text)) => {
                self.tasks.add(text.clone());
                self.frontend.render_tasks(self.tasks.tasks());
                self.say(&tasks::add_reply(&text));
                Effect::None
            }
            Command::Task(TaskCommand::List) => {
                let reply = tasks::list_reply(self.tasks.tasks());
                self.say(&reply);
                Effect::None
            }
            Command::Task(TaskCommand::Clear) => {
                if self.tasks.is_empty() {
                    self.say(tasks::NOTHING_TO_CLEAR);
                } else {
                    self.tasks.clear();
                    self.frontend.render_tasks(self.tasks.tasks());
                    self.say(tasks::CLEARED);
                }
                Effect::None
            }
            Command::Timer(TimerCommand::Start { minutes }) => self.start_timer(minutes),
            Command::Timer(TimerCommand::Stop) => self.stop_timer(),
            Command::Chat(text) => {
                self.conversation.push(Message::user(text));
                Effect::Chat(self.conversation.window())
            }
        }
    }

    /// Task added from the task panel: no confirmation bubble
    pub fn add_task(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.tasks.add(text);
        self.frontend.render_tasks(self.tasks.tasks());
    }

    pub fn toggle_task(&mut self, index: usize) -> bool {
        let toggled = self.tasks.toggle(index);
        if toggled {
            self.frontend.render_tasks(self.tasks.tasks());
        } else {
            tracing::debug!("No task at position {}", index);
        }
        toggled
    }

    /// Clear from the task panel: always confirms, even if already empty
    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
        self.frontend.render_tasks(self.tasks.tasks());
        self.say(tasks::CLEARED_FROM_UI);
    }

    pub fn start_timer(&mut self, minutes: u32) -> Effect {
        let announcement = self.timer.start(minutes);
        self.frontend.render_timer(&self.timer.display(), true);
        self.say(&announcement);
        Effect::TimerStarted
    }

    pub fn stop_timer(&mut self) -> Effect {
        let announcement = self.timer.stop();
        self.frontend
            .render_timer(&self.timer.display(), false);
        self.say(announcement);
        Effect::TimerStopped
    }

    pub fn show_timer(&mut self) {
        self.frontend
            .render_timer(&self.timer.display(), self.timer.is_running());
    }

    /// One countdown second. Returns true when this tick finished the timer.
    pub fn tick(&mut self) -> bool {
        if !self.timer.is_running() {
            return false;
        }
        let finished = self.timer.tick();
        self.frontend
            .render_timer(&self.timer.display(), self.timer.is_running());
        match finished {
            Some(announcement) => {
                self.say(announcement);
                true
            }
            None => false,
        }
    }

    pub fn reset_chat(&mut self) {
        self.conversation.clear();
        self.transcript.clear();
        self.frontend.clear_messages();
        self.say(CHAT_CLEARED);
    }

    pub fn ask_plan(&mut self) -> Effect {
        self.handle_user_text(ASK_PLAN_UTTERANCE)
    }

    /// Complete a chat round trip started by [`Effect::Chat`]
    pub fn apply_chat_response(&mut self, result: Result<ChatResponse>) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error talking to Honey: {}", e);
                self.say(SERVER_BROKE);
                return;
            }
        };

        if let Some(error) = response.error {
            tracing::error!(
                "Honey backend error: {} ({})",
                error,
                response.details.as_deref().unwrap_or("no details")
            );
            self.say(&format!("My brain server failed: {}.", error));
            return;
        }

        let reply = response
            .reply
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        self.conversation.push(Message::assistant(reply.clone()));
        self.say(&reply);

        if self.plan.offer(&reply) {
            self.frontend.render_plan(&reply);
        }
    }

    fn say(&mut self, text: &str) {
        let entry = self.transcript.push(Sender::Honey, text);
        self.frontend.render_message(entry);
        self.speaker.speak(text);
    }
}
