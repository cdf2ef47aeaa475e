//! Environment Configuration
//!
//! Server settings come from environment variables with logged defaults.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn load() -> Self {
        Self {
            port: try_load("DAJIN_PORT", "8080"),
            db_path: PathBuf::from(load_var("DAJIN_DB_PATH", "dajin.db")),
        }
    }
}

pub(crate) fn load_var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

pub(crate) fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    load_var(key, default)
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
