use anyhow::{Context, Result};

use admissions_server::GatewayConfig;

/// Validate upstream configuration and print it with the key redacted
pub fn run_check() -> Result<()> {
    let config = GatewayConfig::from_env().context("Invalid gateway configuration")?;

    println!("rest endpoint: {}", config.rest_url());
    println!("api key:       set ({} chars)", config.api_key.len());
    match config.timeout {
        Some(timeout) => println!("timeout:       {}s", timeout.as_secs()),
        None => println!("timeout:       transport default"),
    }

    Ok(())
}
