use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::input::{parse_input, Input, HELP};
use crate::assistant::{Frontend, Listener, Sender, SessionHandle, Task, TranscriptEntry};

/// Prints session output to stdout. Logs go to stderr, so the two don't mix.
#[derive(Debug, Default)]
pub struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn render_message(&mut self, entry: &TranscriptEntry) {
        match entry.sender {
            Sender::User => println!("you> {}", entry.text),
            Sender::Honey => println!("🍯 honey> {}", entry.text),
        }
    }

    fn render_tasks(&mut self, tasks: &[Task]) {
        if tasks.is_empty() {
            println!("📝 No tasks");
            return;
        }
        println!("📝 Tasks:");
        for (i, task) in tasks.iter().enumerate() {
            let mark = if task.done { "x" } else { " " };
            println!("   {}. [{}] {}", i + 1, mark, task.text);
        }
    }

    fn render_timer(&mut self, display: &str, running: bool) {
        // Every tick lands here; only whole minutes and stops are worth a line
        if !running || display.ends_with(":00") {
            println!("⏱  {}{}", display, if running { "" } else { " (idle)" });
        }
    }

    fn render_plan(&mut self, plan: &str) {
        println!("📋 Study plan:\n{}", plan);
    }

    fn clear_messages(&mut self) {
        println!("{}", "-".repeat(40));
    }
}

/// Read stdin until EOF or `/quit`, feeding everything to the session
pub async fn run_repl(session: SessionHandle, mut listener: Option<Listener>) -> Result<()> {
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Event(event) => session.send(event)?,
            Input::Listen => match listener.as_mut() {
                Some(listener) => {
                    let session = session.clone();
                    let started = listener.start(move |text| {
                        if let Err(e) = session.user_text(text) {
                            tracing::warn!("Dropping recognized speech: {}", e);
                        }
                    });
                    if started {
                        println!("🎤 Listening...");
                    } else {
                        println!("🎤 Already listening");
                    }
                }
                None => println!("Set voice.listen_command in config.toml to talk instead of type"),
            },
            Input::StopListening => {
                if let Some(listener) = listener.as_mut() {
                    listener.stop();
                }
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Nothing => {}
        }
    }

    Ok(())
}
