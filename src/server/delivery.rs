//! HTTP handlers for the delivery order lifecycle
//!
//! Create and update validate the full payload; the status patch endpoint
//! gates on the canonical four-value vocabulary before touching the record.
//! Every mutation that succeeds triggers a notification: creation is
//! fire-and-forget (spawned, never awaited), a status change is dispatched
//! before the response is returned but its failure is only logged — the
//! status write is never rolled back.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Envelope, state::AppState};
use crate::core::error::{ApiError, ApiResult};
use crate::domain::{DeliveryOrder, DeliveryOrderInput, DeliveryStatus};
use crate::storage::StoreError;

pub async fn create_delivery_order(
    State(state): State<AppState>,
    Json(input): Json<DeliveryOrderInput>,
) -> ApiResult<(StatusCode, Json<Envelope<DeliveryOrder>>)> {
    let order = input.into_new_order().map_err(ApiError::Validation)?;

    // Fast-path rejection; the store's unique index stays authoritative
    // under concurrent creates.
    if !state.orders.find("orderId", &order.order_id).await?.is_empty() {
        return Err(ApiError::duplicate("delivery order", "orderId"));
    }

    let order = match state.orders.insert(order).await {
        Ok(order) => order,
        Err(StoreError::Duplicate { .. }) => {
            return Err(ApiError::duplicate("delivery order", "orderId"));
        }
        Err(err) => return Err(err.into()),
    };

    let notifier = state.notifier.clone();
    let (to, order_id) = (order.email.clone(), order.order_id.clone());
    tokio::spawn(async move {
        notifier.order_update(&to, &order_id, None).await;
    });

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            message: "Delivery order created successfully",
            data: order,
        }),
    ))
}

pub async fn get_delivery_orders(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DeliveryOrder>>> {
    Ok(Json(state.orders.list().await?))
}

pub async fn get_delivery_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeliveryOrder>> {
    let order = state
        .orders
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("delivery order"))?;
    Ok(Json(order))
}

pub async fn update_delivery_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<DeliveryOrderInput>,
) -> ApiResult<Json<Envelope<DeliveryOrder>>> {
    let existing = state
        .orders
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("delivery order"))?;

    let updated = input
        .into_update_of(&existing)
        .map_err(ApiError::Validation)?;

    let updated = state
        .orders
        .replace(&id, updated)
        .await?
        .ok_or_else(|| ApiError::not_found("delivery order"))?;

    Ok(Json(Envelope {
        message: "Delivery order updated successfully",
        data: updated,
    }))
}

pub async fn delete_delivery_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<DeliveryOrder>>> {
    let deleted = state
        .orders
        .remove(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("delivery order"))?;

    Ok(Json(Envelope {
        message: "Delivery order deleted successfully",
        data: deleted,
    }))
}

/// Public tracking view: only the status leaves the server.
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub status: DeliveryStatus,
}

pub async fn track_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<TrackingResponse>> {
    let order = find_by_order_id(&state, &order_id).await?;
    Ok(Json(TrackingResponse {
        status: order.status,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub message: String,
    pub status: DeliveryStatus,
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(body): Json<StatusUpdateRequest>,
) -> ApiResult<Json<StatusUpdateResponse>> {
    let raw = body.status.unwrap_or_default();
    let status = DeliveryStatus::parse(&raw).ok_or(ApiError::InvalidStatus { value: raw })?;

    let mut order = find_by_order_id(&state, &order_id).await?;
    order.status = status;
    let id = order.id;

    let updated = state
        .orders
        .replace(&id, order)
        .await?
        .ok_or_else(|| ApiError::not_found("delivery order"))?;

    // Dispatch completes before the response; a failed send is logged
    // inside the notifier and does not roll back the status write.
    state
        .notifier
        .order_update(&updated.email, &updated.order_id, Some(status))
        .await;

    Ok(Json(StatusUpdateResponse {
        message: format!("Order status updated to {status}"),
        status,
    }))
}

async fn find_by_order_id(state: &AppState, order_id: &str) -> ApiResult<DeliveryOrder> {
    state
        .orders
        .find("orderId", order_id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("delivery order"))
}
