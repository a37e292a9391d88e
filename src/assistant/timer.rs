use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

pub const TIMES_UP: &str = "Time's up! Take a short break, you earned it.";
pub const STOPPED: &str = "Okay, timer stopped. Don't run away from your work too much, haan.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub running: bool,
}

/// Two-state focus countdown: idle or running.
/// Scheduling lives in [`Ticker`]; this type only reacts to ticks.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    remaining_seconds: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self {
            remaining_seconds: DEFAULT_FOCUS_MINUTES * 60,
            running: false,
        }
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining_seconds,
            running: self.running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reset to `minutes` and run; returns the announcement
    pub fn start(&mut self, minutes: u32) -> String {
        self.remaining_seconds = minutes.saturating_mul(60);
        self.running = true;
        format!(
            "Alright, focus mode for {} minutes. No excuses now.",
            minutes
        )
    }

    /// One second elapsed. Returns the completion announcement when the
    /// countdown reaches zero. Ignored while idle.
    pub fn tick(&mut self) -> Option<&'static str> {
        if !self.running {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.running = false;
            return Some(TIMES_UP);
        }
        None
    }

    /// Always announces, even when nothing was running
    pub fn stop(&mut self) -> &'static str {
        self.running = false;
        STOPPED
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

/// Owns the recurring one-second tick. At most one interval runs at a time;
/// each carries a generation so ticks already queued from a cancelled
/// interval can be told apart and dropped.
#[derive(Debug, Default)]
pub struct Ticker {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }

    /// Cancel any running interval and start a fresh one. `make_event` turns
    /// a generation into the event delivered on `tx` every second.
    pub fn restart<E, F>(&mut self, tx: mpsc::UnboundedSender<E>, make_event: F)
    where
        E: Send + 'static,
        F: Fn(u64) -> E + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;

        self.task = Some(tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(make_event(generation)).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
