use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::storage::{SharedStore, TASKS_KEY};

pub const UNNAMED_TASK: &str = "Unnamed task";

static ADD_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)add( a)? task").expect("valid add-task pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub done: bool,
}

/// Ordered task list, snapshotted to storage after every mutation
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: SharedStore,
}

impl TaskStore {
    /// Restore the last snapshot; an unreadable one starts empty
    pub fn load(storage: SharedStore) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable task snapshot: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read tasks: {}", e);
                Vec::new()
            }
        };
        Self { tasks, storage }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(&mut self, text: impl Into<String>) {
        self.tasks.push(Task {
            text: text.into(),
            done: false,
        });
        self.persist();
    }

    /// Flip `done` at `index`; false when out of range
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.done = !task.done;
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.tasks)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.storage.set(TASKS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save tasks: {}", e);
        }
    }
}

/// Task text carried by an "add task ..." utterance
pub fn task_text_from_utterance(utterance: &str) -> String {
    let text = ADD_PHRASE.replacen(utterance, 1, "");
    let text = text.trim();
    if text.is_empty() {
        UNNAMED_TASK.to_string()
    } else {
        text.to_string()
    }
}

pub fn add_reply(text: &str) -> String {
    format!("Done, I added: \"{}\". Anything else, yaar?", text)
}

pub fn list_reply(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "You don't have any tasks yet. Want to add one?".to_string();
    }
    let list = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {}{}", i + 1, t.text, if t.done { " (done)" } else { "" }))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Here are your tasks:\n{}", list)
}

pub const NOTHING_TO_CLEAR: &str = "You don't have any tasks to clear, overachiever.";
pub const CLEARED: &str = "All tasks cleared. Now don't use that as an excuse to be lazy, okay?";
pub const CLEARED_FROM_UI: &str = "Cleared all your tasks. Fresh slate, yaar.";
