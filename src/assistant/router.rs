//! Utterance classification. Pure: no state, no I/O.
//!
//! Matching is case-insensitive against fixed phrase tables, checked in
//! priority order (task add, task list, task clear, timer start, timer stop).
//! The first hit wins; anything else is chat.

use super::tasks::task_text_from_utterance;
use super::timer::DEFAULT_FOCUS_MINUTES;

const TASK_ADD_PREFIXES: &[&str] = &["add task", "add a task"];
const TASK_LIST_PHRASES: &[&str] = &["show my tasks", "list tasks", "my tasks"];
const TASK_CLEAR_PHRASES: &[&str] = &["clear tasks", "delete all tasks", "clear my tasks"];
const TIMER_START_PHRASES: &[&str] = &["start timer", "focus mode", "start focus"];
const TIMER_STOP_PHRASES: &[&str] = &["stop timer"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    Add(String),
    List,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start { minutes: u32 },
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Task(TaskCommand),
    Timer(TimerCommand),
    Chat(String),
}

/// `None` when the utterance is blank. Otherwise it carries the trimmed text.
pub fn classify(utterance: &str) -> Option<Command> {
    let text = utterance.trim();
    if text.is_empty() {
        return None;
    }

    let command = classify_task(text)
        .map(Command::Task)
        .or_else(|| classify_timer(text).map(Command::Timer))
        .unwrap_or_else(|| Command::Chat(text.to_string()));
    Some(command)
}

fn classify_task(text: &str) -> Option<TaskCommand> {
    let lower = text.to_lowercase();

    if TASK_ADD_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Some(TaskCommand::Add(task_text_from_utterance(text)));
    }
    if contains_any(&lower, TASK_LIST_PHRASES) {
        return Some(TaskCommand::List);
    }
    if contains_any(&lower, TASK_CLEAR_PHRASES) {
        return Some(TaskCommand::Clear);
    }
    None
}

fn classify_timer(text: &str) -> Option<TimerCommand> {
    let lower = text.to_lowercase();

    if contains_any(&lower, TIMER_START_PHRASES) {
        return Some(TimerCommand::Start {
            minutes: DEFAULT_FOCUS_MINUTES,
        });
    }
    if contains_any(&lower, TIMER_STOP_PHRASES) {
        return Some(TimerCommand::Stop);
    }
    None
}

fn contains_any(haystack: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| haystack.contains(p))
}
