use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub store: StoreBackend,
    pub mongo_uri: Option<String>,
    pub db_name: String,
    pub cors_origin: Option<String>,
    pub seed_file: Option<PathBuf>,
    pub refresh_interval_secs: u64,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Ok(Self {
            server_addr: try_load("SERVER_ADDR", "0.0.0.0:8000")?,
            store: try_load("POLL_STORE", "mongo")?,
            mongo_uri: var("MONGO_URI"),
            db_name: try_load("DB_NAME", "polling")?,
            cors_origin: var("CORS_ORIGIN"),
            seed_file: var("SEED_FILE").map(PathBuf::from),
            refresh_interval_secs: try_load("RESULTS_REFRESH_SECS", "5")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        AppError::ConfigError(format!("Invalid {key} value '{raw}': {e}"))
    })
}
