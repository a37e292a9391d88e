use std::sync::Arc;

use crate::assistant::tasks::list_reply;
use crate::assistant::voice::{speaker_from_config, CommandLine};
use crate::assistant::{
    Assistant, FileStore, Listener, PlanStore, SessionHandle, SharedStore, SilentSpeaker, Speaker,
    TaskStore,
};
use crate::cli::TaskCommands;
use crate::client::{run_repl, HoneyClient, TerminalFrontend};
use crate::llm::ChatCompletionClient;
use crate::server::{start_web_server, AppState};
use crate::{Config, Result};

fn storage(config: &Config) -> SharedStore {
    Arc::new(FileStore::new(config.client.data_dir.clone()))
}

pub async fn serve(config: Config, port: Option<u16>, open: bool) -> Result<()> {
    let port = port.unwrap_or(config.server.port);
    let state = AppState {
        llm: ChatCompletionClient::from_config(&config.provider, config.api_key()),
        static_dir: config.web.static_dir.clone(),
    };

    if open {
        let url = format!("http://localhost:{}", port);
        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser at {}: {}", url, e);
            }
        });
    }

    println!("🍯 Honey server starting on http://localhost:{}", port);
    start_web_server(&config.server.host, port, state).await
}

pub async fn chat(config: Config, server: Option<String>, quiet: bool) -> Result<()> {
    let client = match server {
        Some(url) => HoneyClient::new(url),
        None => HoneyClient::from_config(&config),
    };

    if !client.is_server_running().await {
        spawn_local_server(&client).await?;
    }

    let speaker: Box<dyn Speaker> = if quiet {
        Box::new(SilentSpeaker)
    } else {
        speaker_from_config(&config.voice)
    };
    let listener = config
        .voice
        .listen_command
        .as_deref()
        .and_then(CommandLine::parse)
        .map(Listener::new);

    let assistant = Assistant::new(storage(&config), Box::new(TerminalFrontend), speaker);
    let (session, session_task) = SessionHandle::spawn(assistant, Arc::new(client));

    run_repl(session, listener).await?;

    // Dropping the last handle ends the session loop
    session_task.await?;
    Ok(())
}

/// Start `honey serve` as an independent process and wait for it to answer
async fn spawn_local_server(client: &HoneyClient) -> Result<()> {
    tracing::info!("No server at {}; starting one", client.base_url());

    let current_exe = std::env::current_exe()
        .map_err(|e| anyhow::anyhow!("Failed to get current executable path: {}", e))?;

    let mut cmd = tokio::process::Command::new(&current_exe);
    cmd.arg("serve")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null());

    // Pass through RUST_LOG environment variable
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        cmd.env("RUST_LOG", rust_log);
    }

    let child = cmd
        .spawn()
        .map_err(|e| anyhow::anyhow!("Failed to spawn server process: {}", e))?;
    tracing::info!("Spawned server process with PID: {}", child.id().unwrap_or(0));

    for _ in 0..10 {
        tokio::time::sleep(tokio::time::Duration::from_millis(300)).await;
        if client.is_server_running().await {
            return Ok(());
        }
    }

    anyhow::bail!(
        "Failed to start server process. Please run 'honey serve' manually (chat needs {})",
        client.base_url()
    )
}

pub fn tasks(config: Config, command: Option<TaskCommands>) -> Result<()> {
    let mut store = TaskStore::load(storage(&config));

    match command.unwrap_or(TaskCommands::List) {
        TaskCommands::List => {}
        TaskCommands::Add { text } => store.add(text.join(" ")),
        TaskCommands::Done { position } => {
            if position == 0 || !store.toggle(position - 1) {
                anyhow::bail!("No task at position {}", position);
            }
        }
        TaskCommands::Clear => store.clear(),
    }

    println!("{}", list_reply(store.tasks()));
    Ok(())
}

pub fn plan(config: Config) -> Result<()> {
    let plans = PlanStore::load(storage(&config));
    match plans.current() {
        Some(plan) => println!("{}", plan),
        None => println!("No study plan yet. Ask Honey for one with /plan in `honey chat`."),
    }
    Ok(())
}
