//! Pending-Change Replay
//!
//! Entries are replayed in insertion order against the remote tiers
//! only; the local fallback stays out of the loop so a failure is
//! observable. Each entry is acknowledged individually: successes leave
//! the ledger, failures are retained for the next pass.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{ChangeKind, PendingChange};
use crate::remote::RemoteError;
use crate::repository::{keys, StoreResult};

use super::chain::HybridApi;

/// Result of one replay pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayOutcome {
    pub replayed: usize,
    pub retained: usize,
}

impl HybridApi {
    /// Replay the ledger against the remote store.
    ///
    /// An empty ledger is a no-op: no network call is issued.
    pub async fn replay(&self) -> StoreResult<ReplayOutcome> {
        let pending: Vec<PendingChange> = self
            .store
            .get_json(keys::PENDING_CHANGES)
            .await?
            .unwrap_or_default();
        if pending.is_empty() {
            return Ok(ReplayOutcome::default());
        }

        info!("replaying {} pending changes", pending.len());
        let total = pending.len();
        let mut retained = Vec::new();
        for change in pending {
            if let Err(err) = self.replay_one(&change).await {
                warn!("pending {:?} failed, retaining: {err}", change.kind);
                retained.push(change);
            }
        }

        let outcome = ReplayOutcome {
            replayed: total - retained.len(),
            retained: retained.len(),
        };
        if retained.is_empty() {
            self.store.remove(keys::PENDING_CHANGES).await?;
            info!("sync completed, {} changes replayed", outcome.replayed);
        } else {
            self.store
                .set_json(keys::PENDING_CHANGES, &retained)
                .await?;
        }
        Ok(outcome)
    }

    async fn replay_one(&self, change: &PendingChange) -> Result<(), RemoteError> {
        match change.kind {
            ChangeKind::Create => {
                self.remote_create(&change.data).await?;
            }
            ChangeKind::Update => {
                let Some(id) = change.id.as_deref() else {
                    // An update without a target can never succeed;
                    // acknowledge it so it does not pin the ledger open.
                    warn!("dropping malformed update entry with no target id");
                    return Ok(());
                };
                self.remote_update(id, &change.data).await?;
            }
            ChangeKind::Delete => {
                let Some(id) = change.id.as_deref() else {
                    warn!("dropping malformed delete entry with no target id");
                    return Ok(());
                };
                self.remote_delete(id).await?;
            }
        }
        Ok(())
    }
}
