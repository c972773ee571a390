use clap::{Parser, ValueEnum};
use theagora_api_client::config::{API_KEY_ENV, API_URL_ENV, TIMEOUT_ENV};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Expose the Theagora marketplace as MCP tools over stdio.
#[derive(Debug, Parser)]
#[command(name = "theagora-mcp", version, about)]
pub struct Cli {
    /// Marketplace API key.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Marketplace API base URL.
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long, env = TIMEOUT_ENV)]
    pub timeout_secs: Option<u64>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
