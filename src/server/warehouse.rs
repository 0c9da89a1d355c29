//! HTTP handlers for warehouse storage requests

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use super::{Envelope, state::AppState};
use crate::core::error::{ApiError, ApiResult};
use crate::domain::{WarehouseRequest, WarehouseRequestInput};

pub async fn get_requests(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WarehouseRequest>>> {
    Ok(Json(state.warehouse_requests.list().await?))
}

pub async fn create_request(
    State(state): State<AppState>,
    Json(input): Json<WarehouseRequestInput>,
) -> ApiResult<(StatusCode, Json<Envelope<WarehouseRequest>>)> {
    let request = input.into_new_request().map_err(ApiError::Validation)?;
    let request = state.warehouse_requests.insert(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            message: "Warehouse request submitted successfully",
            data: request,
        }),
    ))
}

pub async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<WarehouseRequestInput>,
) -> ApiResult<Json<Envelope<WarehouseRequest>>> {
    let existing = state
        .warehouse_requests
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("warehouse request"))?;

    let updated = input
        .into_update_of(&existing)
        .map_err(ApiError::Validation)?;

    let updated = state
        .warehouse_requests
        .replace(&id, updated)
        .await?
        .ok_or_else(|| ApiError::not_found("warehouse request"))?;

    Ok(Json(Envelope {
        message: "Warehouse request updated successfully",
        data: updated,
    }))
}

pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<WarehouseRequest>>> {
    let deleted = state
        .warehouse_requests
        .remove(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("warehouse request"))?;

    Ok(Json(Envelope {
        message: "Warehouse request deleted successfully",
        data: deleted,
    }))
}
