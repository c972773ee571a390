//! `theagora-mcp`: the Theagora marketplace tool catalog served over stdio.
//!
//! Reads newline-delimited JSON-RPC 2.0 from stdin and writes responses to stdout. Logs go to
//! stderr.

mod cli;
mod stdio;

use anyhow::Context as _;
use clap::Parser as _;
use cli::{Cli, LogFormat};
use std::sync::Arc;
use theagora_api_client::{ApiClient, SessionConfig};
use theagora_tools::ToolRegistry;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %format!("{e:#}"), "startup failed");
            return Err(e);
        }
    };
    let registry = Arc::new(ToolRegistry::new(client));
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %registry.client().config().base_url(),
        tools = registry.list_tools().len(),
        "theagora-mcp serving on stdio"
    );

    stdio::serve(registry, tokio::io::stdin(), tokio::io::stdout()).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<ApiClient> {
    let mut config = SessionConfig::new(cli.api_key.clone(), cli.api_url.clone())
        .context("invalid configuration")?;
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    ApiClient::new(config).context("build API client")
}
