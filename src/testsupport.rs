//! Test Support
//!
//! A tiny in-process stand-in for the hosted store's REST interface,
//! plus helpers for pointing a client at nothing.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Shared state of the stub remote
#[derive(Default)]
pub struct StubRemote {
    pub rows: Mutex<Vec<Value>>,
    /// Total requests served, across all routes
    pub hits: AtomicUsize,
    pub fail_posts: AtomicBool,
    pub fail_patches: AtomicBool,
    pub fail_deletes: AtomicBool,
}

impl StubRemote {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serve the stub on a loopback port; returns the base url.
pub async fn spawn_stub(stub: Arc<StubRemote>) -> String {
    let app = Router::new()
        .route(
            "/rest/v1/{table}",
            get(list_rows)
                .post(insert_row)
                .patch(patch_row)
                .delete(delete_row),
        )
        .with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base url with nothing listening behind it
pub async fn unreachable_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn list_rows(State(stub): State<Arc<StubRemote>>, Path(_table): Path<String>) -> Json<Value> {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let rows = stub.rows.lock().await;
    Json(Value::Array(rows.clone()))
}

async fn insert_row(
    State(stub): State<Arc<StubRemote>>,
    Path(_table): Path<String>,
    Json(mut row): Json<Value>,
) -> impl IntoResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    if stub.fail_posts.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "insert refused"})));
    }
    let mut rows = stub.rows.lock().await;
    if row.get("id").is_none() {
        row["id"] = json!(format!("srv_{}", rows.len() + 1));
    }
    rows.push(row.clone());
    (StatusCode::CREATED, Json(json!([row])))
}

async fn patch_row(
    State(stub): State<Arc<StubRemote>>,
    Path(_table): Path<String>,
    RawQuery(query): RawQuery,
    Json(patch): Json<Value>,
) -> impl IntoResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    if stub.fail_patches.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "update refused"})));
    }
    let id = eq_id(query);
    let mut rows = stub.rows.lock().await;
    let mut matched = Vec::new();
    for row in rows.iter_mut() {
        if id.as_deref() == row["id"].as_str() {
            if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            matched.push(row.clone());
        }
    }
    (StatusCode::OK, Json(Value::Array(matched)))
}

async fn delete_row(
    State(stub): State<Arc<StubRemote>>,
    Path(_table): Path<String>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    if stub.fail_deletes.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let id = eq_id(query);
    let mut rows = stub.rows.lock().await;
    rows.retain(|row| id.as_deref() != row["id"].as_str());
    // Deleting a missing row is not an error, matching the real store
    StatusCode::NO_CONTENT
}

/// Pull the target id out of an `id=eq.<value>` filter
fn eq_id(query: Option<String>) -> Option<String> {
    let query = query?;
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("id=eq.") {
            return Some(percent_decode_str(value).decode_utf8_lossy().into_owned());
        }
    }
    None
}
