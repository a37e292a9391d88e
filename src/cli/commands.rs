use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "honey")]
#[command(about = "Honey, your slightly savage study buddy", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the chat proxy and web page
    Serve {
        /// Port to listen on (overrides $PORT and the config file; default 3000)
        #[arg(short, long)]
        port: Option<u16>,
        /// Open the web page in a browser once listening
        #[arg(short, long)]
        open: bool,
    },
    /// Talk to Honey in the terminal
    Chat {
        /// Proxy URL (defaults to the local server)
        #[arg(long)]
        server: Option<String>,
        /// Don't speak replies even if a speech command is configured
        #[arg(short, long)]
        quiet: bool,
    },
    /// Manage saved tasks
    Tasks {
        #[command(subcommand)]
        command: Option<TaskCommands>,
    },
    /// Print the last study plan
    Plan,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommands {
    /// List tasks (default)
    List,
    /// Add a task
    Add {
        /// Task text
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
    },
    /// Toggle a task's done flag
    Done {
        /// 1-based position
        position: usize,
    },
    /// Remove every task
    Clear,
}
