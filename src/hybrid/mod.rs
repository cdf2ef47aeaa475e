//! Hybrid API Layer
//!
//! One `fetch_all / create / update / delete` contract backed by a tiered
//! transport chain: proxy endpoint, then direct remote call, then the
//! local cache. Mutations that never reach the remote store are committed
//! locally and queued in the pending-change ledger for replay.

mod chain;
mod replay;

#[cfg(test)]
mod tests;

pub use chain::HybridApi;
pub use replay::ReplayOutcome;

use serde::{Deserialize, Serialize};

/// Which tier most recently populated the services cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    RemoteProxy,
    RemoteDirect,
    Local,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::RemoteProxy => "remote-proxy",
            DataSource::RemoteDirect => "remote-direct",
            DataSource::Local => "local",
        }
    }
}

/// Snapshot of the synchronization state, as shown on the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// Raw `services_source` value; "unknown" before the first fetch
    pub source: String,
    pub last_sync: Option<String>,
    pub pending_changes: usize,
    pub total_services: usize,
}
