//! Transport Chain
//!
//! Each remote tier is tried once per invocation, in order, with no
//! retry backoff. Remote failures are logged and downgraded to the next
//! tier; the caller always receives a result. A successful remote read
//! overwrites the whole cached collection, so local edits that are not
//! in the ledger do not survive a refresh.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{NewService, PendingChange, Service, ServicePatch};
use crate::remote::{RemoteConfig, RemoteError, RestClient};
use crate::repository::{keys, LocalStore, StoreError, StoreResult};

use super::DataSource;
use super::SyncStatus;

pub(super) const SERVICES_TABLE: &str = "services";

pub struct HybridApi {
    pub(super) store: Arc<dyn LocalStore>,
    pub(super) proxy: Option<RestClient>,
    pub(super) direct: RestClient,
}

impl HybridApi {
    pub fn new(store: Arc<dyn LocalStore>, config: &RemoteConfig) -> Self {
        Self {
            store,
            proxy: RestClient::proxy(config),
            direct: RestClient::direct(config),
        }
    }

    /// Construct from prebuilt tier clients
    pub fn with_clients(
        store: Arc<dyn LocalStore>,
        proxy: Option<RestClient>,
        direct: RestClient,
    ) -> Self {
        Self {
            store,
            proxy,
            direct,
        }
    }

    /// Fetch the service collection through the chain.
    ///
    /// A remote success refreshes the cache and sync bookkeeping, then
    /// replays any pending changes best-effort. Total remote failure
    /// serves the cache.
    pub async fn fetch_all(&self) -> StoreResult<Vec<Service>> {
        match self.remote_fetch().await {
            Ok((services, source)) => {
                self.store.set_json(keys::SERVICES, &services).await?;
                self.record_sync(source).await?;
                match self.replay().await {
                    Ok(outcome) if outcome.retained > 0 => {
                        warn!("replay retained {} pending changes", outcome.retained);
                    }
                    Ok(_) => {}
                    Err(err) => warn!("replay failed: {err}"),
                }
                Ok(services)
            }
            Err(err) => {
                warn!("all remote tiers failed, serving local cache: {err}");
                self.store
                    .set_raw(keys::SERVICES_SOURCE, DataSource::Local.as_str())
                    .await?;
                self.cached().await
            }
        }
    }

    /// Create a service through the chain.
    ///
    /// When every remote tier fails the record is committed to the cache
    /// under a minted id and exactly one create entry joins the ledger.
    pub async fn create(&self, new: NewService) -> StoreResult<Service> {
        let payload = serde_json::to_value(&new)?;
        match self.remote_create(&payload).await {
            Ok(created) => {
                self.mirror_upsert(created.clone()).await?;
                Ok(created)
            }
            Err(err) => {
                warn!("remote create failed, committing locally: {err}");
                let service = self.create_local(new).await?;
                self.push_pending(PendingChange::create(payload, service.id.clone()))
                    .await?;
                info!("queued create of {} for later sync", service.id);
                Ok(service)
            }
        }
    }

    /// Update a service through the chain.
    pub async fn update(&self, id: &str, patch: ServicePatch) -> StoreResult<Service> {
        let payload = serde_json::to_value(&patch)?;
        match self.remote_update(id, &payload).await {
            Ok(updated) => {
                self.mirror_upsert(updated.clone()).await?;
                Ok(updated)
            }
            Err(err) => {
                warn!("remote update failed, committing locally: {err}");
                let updated = self.update_local(id, &patch).await?;
                self.push_pending(PendingChange::update(id.to_string(), payload))
                    .await?;
                Ok(updated)
            }
        }
    }

    /// Delete a service through the chain.
    ///
    /// Deleting an id the cache does not hold is a no-op locally.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        match self.remote_delete(id).await {
            Ok(()) => self.remove_local(id).await,
            Err(err) => {
                warn!("remote delete failed, committing locally: {err}");
                self.remove_local(id).await?;
                self.push_pending(PendingChange::delete(id.to_string()))
                    .await
            }
        }
    }

    /// Replay the ledger, then refresh from the remote store.
    pub async fn force_sync(&self) -> StoreResult<Vec<Service>> {
        info!("force sync initiated");
        match self.replay().await {
            Ok(outcome) if outcome.retained > 0 => {
                warn!("replay retained {} pending changes", outcome.retained);
            }
            Ok(_) => {}
            Err(err) => warn!("replay failed: {err}"),
        }
        self.fetch_all().await
    }

    pub async fn status(&self) -> StoreResult<SyncStatus> {
        let pending: Vec<PendingChange> = self
            .store
            .get_json(keys::PENDING_CHANGES)
            .await?
            .unwrap_or_default();
        Ok(SyncStatus {
            source: self
                .store
                .get_raw(keys::SERVICES_SOURCE)
                .await?
                .unwrap_or_else(|| "unknown".to_string()),
            last_sync: self.store.get_raw(keys::SERVICES_LAST_SYNC).await?,
            pending_changes: pending.len(),
            total_services: self.cached().await?.len(),
        })
    }

    /// Drop the cache, the ledger and the sync bookkeeping
    pub async fn clear_local_data(&self) -> StoreResult<()> {
        self.store.remove(keys::SERVICES).await?;
        self.store.remove(keys::PENDING_CHANGES).await?;
        self.store.remove(keys::SERVICES_SOURCE).await?;
        self.store.remove(keys::SERVICES_LAST_SYNC).await
    }

    // Remote tiers. Proxy first when configured, direct second; the
    // last error wins.

    async fn remote_fetch(&self) -> Result<(Vec<Service>, DataSource), RemoteError> {
        if let Some(proxy) = &self.proxy {
            match proxy.select_all::<Service>(SERVICES_TABLE, None).await {
                Ok(services) => return Ok((services, DataSource::RemoteProxy)),
                Err(err) => warn!("proxy fetch failed: {err}"),
            }
        }
        let services = self.direct.select_all::<Service>(SERVICES_TABLE, None).await?;
        Ok((services, DataSource::RemoteDirect))
    }

    pub(super) async fn remote_create(&self, row: &Value) -> Result<Service, RemoteError> {
        if let Some(proxy) = &self.proxy {
            match proxy.insert::<Service>(SERVICES_TABLE, row).await {
                Ok(created) => return Ok(created),
                Err(err) => warn!("proxy create failed: {err}"),
            }
        }
        self.direct.insert::<Service>(SERVICES_TABLE, row).await
    }

    pub(super) async fn remote_update(&self, id: &str, patch: &Value) -> Result<Service, RemoteError> {
        if let Some(proxy) = &self.proxy {
            match proxy.update_by_id::<Service>(SERVICES_TABLE, id, patch).await {
                Ok(updated) => return Ok(updated),
                Err(err) => warn!("proxy update failed: {err}"),
            }
        }
        self.direct
            .update_by_id::<Service>(SERVICES_TABLE, id, patch)
            .await
    }

    pub(super) async fn remote_delete(&self, id: &str) -> Result<(), RemoteError> {
        if let Some(proxy) = &self.proxy {
            match proxy.delete_by_id(SERVICES_TABLE, id).await {
                Ok(()) => return Ok(()),
                Err(err) => warn!("proxy delete failed: {err}"),
            }
        }
        self.direct.delete_by_id(SERVICES_TABLE, id).await
    }

    // Local tier and cache mirroring.

    pub(super) async fn cached(&self) -> StoreResult<Vec<Service>> {
        Ok(self
            .store
            .get_json(keys::SERVICES)
            .await?
            .unwrap_or_default())
    }

    async fn record_sync(&self, source: DataSource) -> StoreResult<()> {
        self.store
            .set_raw(keys::SERVICES_SOURCE, source.as_str())
            .await?;
        self.store
            .set_raw(keys::SERVICES_LAST_SYNC, &Utc::now().to_rfc3339())
            .await
    }

    /// Replace the cached record with the same id, or append
    async fn mirror_upsert(&self, service: Service) -> StoreResult<()> {
        let mut cached = self.cached().await?;
        match cached.iter_mut().find(|s| s.id == service.id) {
            Some(slot) => *slot = service,
            None => cached.push(service),
        }
        self.store.set_json(keys::SERVICES, &cached).await
    }

    async fn create_local(&self, new: NewService) -> StoreResult<Service> {
        let service = new.into_service(Service::mint_id());
        let mut cached = self.cached().await?;
        cached.push(service.clone());
        self.store.set_json(keys::SERVICES, &cached).await?;
        Ok(service)
    }

    async fn update_local(&self, id: &str, patch: &ServicePatch) -> StoreResult<Service> {
        let mut cached = self.cached().await?;
        let Some(service) = cached.iter_mut().find(|s| s.id == id) else {
            return Err(StoreError::NotFound(format!(
                "service {id} not in local cache"
            )));
        };
        patch.apply(service);
        let updated = service.clone();
        self.store.set_json(keys::SERVICES, &cached).await?;
        Ok(updated)
    }

    async fn remove_local(&self, id: &str) -> StoreResult<()> {
        let mut cached = self.cached().await?;
        cached.retain(|s| s.id != id);
        self.store.set_json(keys::SERVICES, &cached).await
    }

    pub(super) async fn push_pending(&self, change: PendingChange) -> StoreResult<()> {
        let mut pending: Vec<PendingChange> = self
            .store
            .get_json(keys::PENDING_CHANGES)
            .await?
            .unwrap_or_default();
        pending.push(change);
        self.store.set_json(keys::PENDING_CHANGES, &pending).await
    }
}
