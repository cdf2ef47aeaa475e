//! Hybrid API Integration Tests
//!
//! Runs the chain against a loopback stub remote and against closed
//! ports, with an in-memory store underneath.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use crate::domain::{ChangeKind, NewService, PendingChange, ServicePatch};
    use crate::hybrid::HybridApi;
    use crate::remote::RestClient;
    use crate::repository::{keys, LocalStore, MemoryStore, StoreError};
    use crate::testsupport::{spawn_stub, unreachable_base, StubRemote};

    fn client(base: &str) -> RestClient {
        RestClient::new(
            base,
            "test-key",
            Duration::from_secs(5),
            Duration::from_secs(8),
        )
    }

    fn store() -> Arc<dyn LocalStore> {
        Arc::new(MemoryStore::new())
    }

    async fn offline_api(store: Arc<dyn LocalStore>) -> HybridApi {
        HybridApi::with_clients(store, None, client(&unreachable_base().await))
    }

    async fn pending(store: &Arc<dyn LocalStore>) -> Vec<PendingChange> {
        store
            .get_json(keys::PENDING_CHANGES)
            .await
            .unwrap()
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn remote_create_is_visible_in_next_fetch() {
        let stub = Arc::new(StubRemote::default());
        let base = spawn_stub(stub.clone()).await;
        let store = store();
        let api = HybridApi::with_clients(store.clone(), None, client(&base));

        let created = api
            .create(NewService {
                title: "X".to_string(),
                price: 100.0,
                ..Default::default()
            })
            .await
            .expect("create failed");

        let all = api.fetch_all().await.expect("fetch failed");
        assert!(all.iter().any(|s| s.id == created.id));
        assert!(pending(&store).await.is_empty());
        assert_eq!(
            store.get_raw(keys::SERVICES_SOURCE).await.unwrap().as_deref(),
            Some("remote-direct")
        );
        assert!(store
            .get_raw(keys::SERVICES_LAST_SYNC)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn proxy_tier_wins_when_reachable() {
        let stub = Arc::new(StubRemote::default());
        let base = spawn_stub(stub.clone()).await;
        let store = store();
        let api = HybridApi::with_clients(
            store.clone(),
            Some(client(&base)),
            client(&unreachable_base().await),
        );

        api.fetch_all().await.expect("fetch failed");
        assert_eq!(
            store.get_raw(keys::SERVICES_SOURCE).await.unwrap().as_deref(),
            Some("remote-proxy")
        );
    }

    #[tokio::test]
    async fn dead_proxy_falls_through_to_direct() {
        let stub = Arc::new(StubRemote::default());
        let base = spawn_stub(stub.clone()).await;
        let store = store();
        let api = HybridApi::with_clients(
            store.clone(),
            Some(client(&unreachable_base().await)),
            client(&base),
        );

        api.fetch_all().await.expect("fetch failed");
        assert_eq!(
            store.get_raw(keys::SERVICES_SOURCE).await.unwrap().as_deref(),
            Some("remote-direct")
        );
    }

    #[tokio::test]
    async fn offline_create_commits_locally_and_queues_one_entry() {
        let store = store();
        let api = offline_api(store.clone()).await;

        let created = api
            .create(NewService {
                title: "X".to_string(),
                price: 100.0,
                ..Default::default()
            })
            .await
            .expect("create failed");

        let re = regex::Regex::new(r"^service_\d+_[a-z0-9]{9}$").unwrap();
        assert!(re.is_match(&created.id), "unexpected id: {}", created.id);

        let cached = api.fetch_all().await.expect("fetch failed");
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, created.id);

        let queued = pending(&store).await;
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].kind, ChangeKind::Create);
        assert_eq!(queued[0].temp_id.as_deref(), Some(created.id.as_str()));
        assert_eq!(
            store.get_raw(keys::SERVICES_SOURCE).await.unwrap().as_deref(),
            Some("local")
        );
    }

    #[tokio::test]
    async fn offline_update_patches_cache_and_queues_entry() {
        let store = store();
        let api = offline_api(store.clone()).await;
        let created = api.create(NewService::default()).await.unwrap();

        let updated = api
            .update(
                &created.id,
                ServicePatch {
                    active: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect("update failed");
        assert!(updated.active);

        let queued = pending(&store).await;
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[1].kind, ChangeKind::Update);
        assert_eq!(queued[1].id.as_deref(), Some(created.id.as_str()));
    }

    #[tokio::test]
    async fn offline_update_of_unknown_id_is_not_found_and_not_queued() {
        let store = store();
        let api = offline_api(store.clone()).await;

        let result = api.update("service_0_zzzzzzzzz", ServicePatch::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(pending(&store).await.is_empty());
    }

    #[tokio::test]
    async fn offline_delete_clears_cache_and_queues_entry() {
        let store = store();
        let api = offline_api(store.clone()).await;
        let created = api.create(NewService::default()).await.unwrap();

        api.delete(&created.id).await.expect("delete failed");

        assert!(api.fetch_all().await.unwrap().is_empty());
        let queued = pending(&store).await;
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[1].kind, ChangeKind::Delete);
    }

    #[tokio::test]
    async fn replaying_an_empty_ledger_issues_no_network_calls() {
        let stub = Arc::new(StubRemote::default());
        let base = spawn_stub(stub.clone()).await;
        let api = HybridApi::with_clients(store(), None, client(&base));

        let outcome = api.replay().await.expect("replay failed");
        assert_eq!(outcome.replayed, 0);
        assert_eq!(outcome.retained, 0);
        assert_eq!(stub.hits(), 0);
    }

    #[tokio::test]
    async fn replay_acknowledges_per_entry_and_retains_failures() {
        let stub = Arc::new(StubRemote::default());
        stub.fail_patches.store(true, Ordering::SeqCst);
        let base = spawn_stub(stub.clone()).await;
        let store = store();
        let api = HybridApi::with_clients(store.clone(), None, client(&base));

        let ledger = vec![
            PendingChange::create(
                serde_json::to_value(NewService {
                    title: "Queued".to_string(),
                    ..Default::default()
                })
                .unwrap(),
                "service_1_abcdefghi".to_string(),
            ),
            PendingChange::update("srv_9".to_string(), json!({"active": false})),
        ];
        store.set_json(keys::PENDING_CHANGES, &ledger).await.unwrap();

        let outcome = api.replay().await.expect("replay failed");
        assert_eq!(outcome.replayed, 1);
        assert_eq!(outcome.retained, 1);

        let remaining = pending(&store).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, ChangeKind::Update);

        assert_eq!(stub.rows.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn replay_clears_ledger_when_everything_lands() {
        let stub = Arc::new(StubRemote::default());
        let base = spawn_stub(stub.clone()).await;
        let store = store();
        let api = HybridApi::with_clients(store.clone(), None, client(&base));

        let ledger = vec![PendingChange::create(
            serde_json::to_value(NewService::default()).unwrap(),
            "service_1_abcdefghi".to_string(),
        )];
        store.set_json(keys::PENDING_CHANGES, &ledger).await.unwrap();

        let outcome = api.replay().await.expect("replay failed");
        assert_eq!(outcome.replayed, 1);
        assert_eq!(outcome.retained, 0);
        assert!(store
            .get_raw(keys::PENDING_CHANGES)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn successful_fetch_drains_the_ledger() {
        let stub = Arc::new(StubRemote::default());
        let base = spawn_stub(stub.clone()).await;
        let store = store();
        let api = HybridApi::with_clients(store.clone(), None, client(&base));

        let ledger = vec![PendingChange::create(
            serde_json::to_value(NewService {
                title: "Queued".to_string(),
                ..Default::default()
            })
            .unwrap(),
            "service_1_abcdefghi".to_string(),
        )];
        store.set_json(keys::PENDING_CHANGES, &ledger).await.unwrap();

        api.fetch_all().await.expect("fetch failed");
        assert!(pending(&store).await.is_empty());
        assert_eq!(stub.rows.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn status_reports_pending_and_totals() {
        let store = store();
        let api = offline_api(store.clone()).await;
        api.create(NewService::default()).await.unwrap();
        api.fetch_all().await.unwrap();

        let status = api.status().await.expect("status failed");
        assert_eq!(status.source, "local");
        assert_eq!(status.pending_changes, 1);
        assert_eq!(status.total_services, 1);
        assert!(status.last_sync.is_none());
    }

    #[tokio::test]
    async fn clear_local_data_removes_everything() {
        let store = store();
        let api = offline_api(store.clone()).await;
        api.create(NewService::default()).await.unwrap();

        api.clear_local_data().await.expect("clear failed");

        assert!(api.fetch_all().await.unwrap().is_empty());
        assert!(pending(&store).await.is_empty());
    }
}
