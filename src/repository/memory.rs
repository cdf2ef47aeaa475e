//! In-Memory Store
//!
//! HashMap-backed implementation for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use super::traits::{LocalStore, StoreEvent, StoreResult};

pub struct MemoryStore {
    map: RwLock<HashMap<String, String>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            map: RwLock::new(HashMap::new()),
            events,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.map.read().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.map
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.map.write().await.remove(key);
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
