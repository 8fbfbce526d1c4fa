use std::path::PathBuf;

use tracing::{debug, info};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.admissions/.env
///
/// dotenvy never overwrites a variable that is already set. Runs before
/// tracing is up (so `RUST_LOG` can come from a .env file); the returned
/// sources are logged by [`report_dotenv`] once it is.
pub fn load_dotenv() -> Vec<String> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(format!("~/.admissions/.env ({})", env_file.display()));
        }
    }

    loaded_from
}

/// Log where configuration came from
pub fn report_dotenv(loaded_from: &[String]) {
    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.admissions)");
        info!("Using environment variables only (no .env file found)");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}

/// Get the admissions config directory path (~/.admissions)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".admissions"))
}
