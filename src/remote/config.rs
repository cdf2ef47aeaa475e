//! Remote Store Configuration

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::config::load_var;

const DEFAULT_PROJECT_URL: &str = "https://ipzupceovfjmguhjmnkr.supabase.co";

/// Connection settings for the hosted relational store.
///
/// Reads wait up to `read_timeout`, writes up to `write_timeout`; a call
/// that exceeds its bound is aborted and treated as a tier failure.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub project_url: String,
    pub api_key: String,
    /// Base of the local proxy that fronts the store, if one is deployed
    pub proxy_url: Option<String>,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl RemoteConfig {
    pub fn from_env() -> Self {
        let api_key = load_var("SUPABASE_ANON_KEY", "");
        if api_key.is_empty() {
            warn!("SUPABASE_ANON_KEY is empty, remote calls will be rejected");
        }
        Self {
            project_url: load_var("SUPABASE_URL", DEFAULT_PROJECT_URL),
            api_key,
            proxy_url: env::var("SUPABASE_PROXY_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(8),
        }
    }
}
