//! Speech glue around external text-to-speech and speech-to-text programs.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::config::VoiceConfig;

/// An external program plus its leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Split a configured command on whitespace, e.g. `"espeak -s 150"`.
    /// Blank input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

pub trait Speaker: Send {
    fn speak(&self, text: &str);
}

#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _text: &str) {}
}

/// Serializes utterances through one worker: each is spoken to completion
/// before the next starts. Nothing already queued is ever cancelled.
pub struct SpeechQueue {
    tx: mpsc::UnboundedSender<String>,
}

impl SpeechQueue {
    pub fn spawn(command: CommandLine, voice: Option<String>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            let program = &command.program;
            while let Some(text) = rx.recv().await {
                let mut cmd = command.command();
                if let Some(voice) = &voice {
                    cmd.arg("-v").arg(voice);
                }
                cmd.arg(&text)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());

                match cmd.status().await {
                    Ok(status) if !status.success() => {
                        tracing::warn!("Speech command '{}' exited with {}", program, status)
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Failed to run speech command '{}': {}", program, e),
                }
            }
            tracing::debug!("Speech queue closed");
        });

        Self { tx }
    }
}

impl Speaker for SpeechQueue {
    fn speak(&self, text: &str) {
        if self.tx.send(text.to_string()).is_err() {
            tracing::warn!("Speech queue is gone; dropping utterance");
        }
    }
}

pub fn speaker_from_config(config: &VoiceConfig) -> Box<dyn Speaker> {
    match config.speak_command.as_deref().and_then(CommandLine::parse) {
        Some(command) => {
            tracing::info!("Speaking replies with '{}'", command.program);
            Box::new(SpeechQueue::spawn(command, config.voice.clone()))
        }
        None => Box::new(SilentSpeaker),
    }
}

/// One speech-recognition session at a time, backed by an external program
/// whose stdout is the recognized utterance.
pub struct Listener {
    command: CommandLine,
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl Listener {
    pub fn new(command: CommandLine) -> Self {
        Self {
            command,
            active: Arc::new(AtomicBool::new(false)),
            task: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Capture one utterance and hand it to `on_result`. No-op (returns false)
    /// while a capture is already running.
    pub fn start<F>(&mut self, on_result: F) -> bool
    where
        F: FnOnce(String) + Send + 'static,
    {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        let mut cmd = self.command.command();
        let program = self.command.program.clone();
        let active = self.active.clone();
        self.task = Some(tokio::spawn(async move {
            let output = cmd
                .stdin(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await;
            active.store(false, Ordering::SeqCst);

            match output {
                Ok(output) if output.status.success() => {
                    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if text.is_empty() {
                        tracing::debug!("Recognizer heard nothing");
                    } else {
                        on_result(text);
                    }
                }
                Ok(output) => tracing::warn!("Recognizer '{}' exited with {}", program, output.status),
                Err(e) => tracing::error!("STT error: failed to run '{}': {}", program, e),
            }
        }));
        true
    }

    /// Abort the running capture, killing the recognizer process
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.active.store(false, Ordering::SeqCst);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.stop();
    }
}
