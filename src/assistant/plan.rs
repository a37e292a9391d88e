use once_cell::sync::Lazy;
use regex::Regex;

use super::storage::{SharedStore, LAST_PLAN_KEY};

/// Loose on purpose: any "day" followed by a number, e.g. "Day 1:", "day2", "DAY 10".
/// Replies that mention a day for other reasons are caught too.
static DAY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)day\s*\d+").expect("valid day pattern"));

pub const ASK_PLAN_UTTERANCE: &str = "Honey, I have exams and need a study plan. Ask me for details and then create a clear day-by-day plan.";

pub fn looks_like_plan(reply: &str) -> bool {
    DAY_PATTERN.is_match(reply)
}

/// The single "last plan", overwritten whole on each new one
pub struct PlanStore {
    current: Option<String>,
    storage: SharedStore,
}

impl PlanStore {
    pub fn load(storage: SharedStore) -> Self {
        let current = storage.get(LAST_PLAN_KEY).unwrap_or_else(|e| {
            tracing::warn!("Failed to read last plan: {}", e);
            None
        });
        Self { current, storage }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Keep `reply` as the plan if it looks like one. Returns whether it was stored.
    pub fn offer(&mut self, reply: &str) -> bool {
        if !looks_like_plan(reply) {
            return false;
        }
        self.current = Some(reply.to_string());
        if let Err(e) = self.storage.set(LAST_PLAN_KEY, reply) {
            tracing::warn!("Failed to save plan: {}", e);
        }
        true
    }
}
