use super::tasks::Task;
use super::transcript::TranscriptEntry;

/// Where session output is drawn. Called from the session task only.
pub trait Frontend: Send {
    fn render_message(&mut self, entry: &TranscriptEntry);
    fn render_tasks(&mut self, tasks: &[Task]);
    fn render_timer(&mut self, display: &str, running: bool);
    fn render_plan(&mut self, plan: &str);
    fn clear_messages(&mut self) {}
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn render_message(&mut self, _entry: &TranscriptEntry) {}
    fn render_tasks(&mut self, _tasks: &[Task]) {}
    fn render_timer(&mut self, _display: &str, _running: bool) {}
    fn render_plan(&mut self, _plan: &str) {}
}
