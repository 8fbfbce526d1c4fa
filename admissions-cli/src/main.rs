//! admissions CLI - runs the student admissions gateway
//!
//! Subcommands:
//! - `serve`: bind the HTTP listener and forward admissions upstream
//! - `check`: validate the upstream configuration without serving

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "admissions",
    author,
    version,
    about = "Student admission gateway in front of a PostgREST backend"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Validate SUPABASE_URL / SUPABASE_KEY and print the resolved settings
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first: it may carry RUST_LOG and clap `env` defaults.
    let loaded_from = config::load_dotenv();
    let cli = Cli::parse();
    tracing_setup::init_tracing(&TracingConfig { debug: cli.debug }).ok();
    config::report_dotenv(&loaded_from);

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Check => commands::run_check()?,
    }

    Ok(())
}
