//! Local Store Abstraction
//!
//! Defines the interface of the string-keyed document store.
//! Implementations can use SQLite, in-memory maps, etc.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("storage backend: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Change notification broadcast on every write or removal.
///
/// Subscribers reload the named key; they never merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: String,
}

/// String-keyed document store
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Read the raw string stored under `key`
    async fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write the raw string stored under `key`
    async fn set_raw(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key` and its value
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Subscribe to change notifications
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

impl dyn LocalStore {
    /// Read and deserialize the JSON document under `key`
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`
    pub async fn set_json<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw).await
    }
}
