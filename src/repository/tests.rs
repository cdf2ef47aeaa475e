//! Store Integration Tests
//!
//! Exercises both store implementations through the `LocalStore` trait.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::Service;
    use crate::repository::{keys, LocalStore, MemoryStore, SqliteStore};

    fn stores() -> Vec<Arc<dyn LocalStore>> {
        let memory: Arc<dyn LocalStore> = Arc::new(MemoryStore::new());
        let sqlite: Arc<dyn LocalStore> =
            Arc::new(SqliteStore::open_in_memory().expect("Failed to open test DB"));
        vec![memory, sqlite]
    }

    #[tokio::test]
    async fn set_get_remove_raw() {
        for store in stores() {
            store.set_raw("greeting", "hello").await.expect("set failed");
            assert_eq!(
                store.get_raw("greeting").await.expect("get failed"),
                Some("hello".to_string())
            );

            store.remove("greeting").await.expect("remove failed");
            assert_eq!(store.get_raw("greeting").await.expect("get failed"), None);
        }
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        for store in stores() {
            store.set_raw("k", "one").await.unwrap();
            store.set_raw("k", "two").await.unwrap();
            assert_eq!(store.get_raw("k").await.unwrap(), Some("two".to_string()));
        }
    }

    #[tokio::test]
    async fn json_helpers_round_trip_collections() {
        for store in stores() {
            let services = vec![crate::domain::NewService {
                title: "Website Development".to_string(),
                price: 2500.0,
                active: true,
                ..Default::default()
            }
            .into_service("1".to_string())];

            store.set_json(keys::SERVICES, &services).await.unwrap();
            let back: Vec<Service> = store
                .get_json(keys::SERVICES)
                .await
                .unwrap()
                .expect("services missing");
            assert_eq!(back, services);
        }
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        for store in stores() {
            let absent: Option<Vec<Service>> = store.get_json(keys::ORDERS).await.unwrap();
            assert!(absent.is_none());
        }
    }

    #[tokio::test]
    async fn writes_broadcast_the_changed_key() {
        for store in stores() {
            let mut events = store.subscribe();
            store.set_raw(keys::SERVICES, "[]").await.unwrap();
            let event = events.recv().await.expect("no event");
            assert_eq!(event.key, keys::SERVICES);

            store.remove(keys::SERVICES).await.unwrap();
            let event = events.recv().await.expect("no event");
            assert_eq!(event.key, keys::SERVICES);
        }
    }

    #[tokio::test]
    async fn sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("backoffice.db");

        {
            let store = SqliteStore::open(&path).expect("open failed");
            store.set_raw("k", "v").await.unwrap();
        }

        let store = SqliteStore::open(&path).expect("reopen failed");
        assert_eq!(store.get_raw("k").await.unwrap(), Some("v".to_string()));
    }
}
