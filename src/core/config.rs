use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the upstream provider credential
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable that overrides `server.port`
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_SERVER_PORT: u16 = 3000;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub web: WebConfig,
    pub client: ClientConfig,
    pub voice: VoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Prefer the environment variable; this is a fallback for local setups
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Proxy to talk to; defaults to the local server port
    pub server_url: Option<String>,
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Text-to-speech program, called as `<cmd> [-v <voice>] <text>`
    pub speak_command: Option<String>,
    /// Passed through as-is; there is no automatic voice selection
    pub voice: Option<String>,
    /// Speech-to-text program whose stdout is the recognized utterance
    pub listen_command: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            api_key: None,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let data_dir = directories::ProjectDirs::from("com", "honey", "honey")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".honey"));

        ClientConfig {
            server_url: None,
            data_dir,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Config::default();
        if let Some(config_dir) = directories::ProjectDirs::from("com", "honey", "honey") {
            let config_file = config_dir.config_dir().join("config.toml");
            if config_file.exists() {
                let content = std::fs::read_to_string(&config_file)?;
                config = toml::from_str(&content)?;
                tracing::debug!("Loaded config from {}", config_file.display());
            }
        }
        config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref());
        Ok(config)
    }

    /// `PORT` beats whatever the file says; unparsable values are ignored.
    pub fn apply_port_override(&mut self, value: Option<&str>) {
        match value.map(|v| v.trim().parse::<u16>()) {
            Some(Ok(port)) => self.server.port = port,
            Some(Err(_)) => tracing::warn!("Ignoring invalid {} value", PORT_ENV),
            None => {}
        }
    }

    /// Resolve the provider credential once, at process start.
    /// The environment wins over the config file; blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| self.provider.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn server_url(&self) -> String {
        self.client
            .server_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.server.port))
    }
}
