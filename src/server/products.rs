//! HTTP handlers for produce listings

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use super::{Envelope, state::AppState};
use crate::core::error::{ApiError, ApiResult};
use crate::domain::{Product, ProductInput};

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> ApiResult<(StatusCode, Json<Envelope<Product>>)> {
    let product = input.into_new_product().map_err(ApiError::Validation)?;
    let product = state.products.insert(product).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            message: "Product created successfully",
            data: product,
        }),
    ))
}

pub async fn get_products(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<Product>>>> {
    Ok(Json(Envelope {
        message: "Products retrieved successfully",
        data: state.products.list().await?,
    }))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<Envelope<Product>>> {
    let existing = state
        .products
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("product"))?;

    let updated = input
        .into_update_of(&existing)
        .map_err(ApiError::Validation)?;

    let updated = state
        .products
        .replace(&id, updated)
        .await?
        .ok_or_else(|| ApiError::not_found("product"))?;

    Ok(Json(Envelope {
        message: "Product updated successfully",
        data: updated,
    }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<Product>>> {
    let deleted = state
        .products
        .remove(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("product"))?;

    Ok(Json(Envelope {
        message: "Product deleted successfully",
        data: deleted,
    }))
}
