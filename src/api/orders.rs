//! Orders Pass-Through Handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::remote::RestClient;

use super::error::ApiError;

const ORDERS_TABLE: &str = "orders";

/// Shared handler state: the direct remote client
pub struct ApiState {
    pub orders: RestClient,
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}", put(update_order).delete(delete_order))
        .with_state(state)
}

/// `GET /api/orders`: newest first, remote JSON relayed verbatim
async fn list_orders(State(state): State<Arc<ApiState>>) -> Result<Json<Value>, ApiError> {
    let rows = state
        .orders
        .select_all::<Value>(ORDERS_TABLE, Some("created_at.desc"))
        .await?;
    Ok(Json(Value::Array(rows)))
}

/// `POST /api/orders`
async fn create_order(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::MalformedPayload)?;
    let created = state.orders.insert::<Value>(ORDERS_TABLE, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/orders/{id}`
async fn update_order(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::MalformedPayload)?;
    let updated = state
        .orders
        .update_by_id::<Value>(ORDERS_TABLE, &id, &body)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/orders/{id}`: success whenever the remote call itself
/// does not error, nonexistent ids included
async fn delete_order(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.orders.delete_by_id(ORDERS_TABLE, &id).await?;
    Ok(Json(json!({"message": "Order deleted successfully"})))
}
