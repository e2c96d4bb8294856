use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use clinica_api::HttpApi;
use clinica_mcp::ToolRegistry;
use clinica_server::app_state::AppState;
use clinica_server::config::Config;
use clinica_server::stream::StreamDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    let api = HttpApi::new(&config.api_url);
    tracing::info!("Clinica bridge forwarding to {}", api.base_url());

    let state = AppState::new(ToolRegistry::clinic(), Arc::new(api));

    StreamDispatcher::new(state)
        .run(tokio::io::stdin(), tokio::io::stdout())
        .await?;

    Ok(())
}
