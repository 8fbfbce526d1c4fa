//! HTTP server command for the admissions gateway

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use admissions_server::{
    run_server, AdmissionGateway, AppState, GatewayConfig, PostgrestStore, ServerConfig,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:8000)
    #[arg(long, short = 'b', env = "ADMISSIONS_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Extra allowed CORS origin (repeatable)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allow_origins: Vec<String>,

    /// Only allow the named CORS origins instead of any origin
    #[arg(long)]
    pub cors_strict: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    // Missing credentials stop the process before anything is bound.
    let gateway_config = GatewayConfig::from_env().context("Invalid gateway configuration")?;
    tracing::info!(rest_url = %gateway_config.rest_url(), "Gateway config loaded");

    let store = PostgrestStore::new(gateway_config);
    let state = AppState::new(AdmissionGateway::new(Arc::new(store)));

    let config = server_config(args);
    tracing::info!("Starting admissions server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

/// Default origins plus any `--allow-origin` extras
fn server_config(args: ServeArgs) -> ServerConfig {
    let mut config = ServerConfig {
        bind_addr: args.bind,
        cors_strict: args.cors_strict,
        ..ServerConfig::default()
    };
    config.allowed_origins.extend(args.allow_origins);
    config
}
