//! HTTP handlers for marketplace accounts
//!
//! Registration rejects duplicate emails; the store's unique index on
//! `email` backs the pre-check. Profile updates carry the account id in
//! the body, matching the original API surface.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use super::{Envelope, state::AppState};
use crate::core::error::{ApiError, ApiResult};
use crate::core::validation::FieldErrors;
use crate::domain::{UserAccount, UserAccountInput};
use crate::storage::StoreError;

pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<UserAccountInput>,
) -> ApiResult<(StatusCode, Json<Envelope<UserAccount>>)> {
    let account = input.into_new_account().map_err(ApiError::Validation)?;

    if !state.users.find("email", &account.email).await?.is_empty() {
        return Err(ApiError::duplicate("user", "email"));
    }

    let account = match state.users.insert(account).await {
        Ok(account) => account,
        Err(StoreError::Duplicate { .. }) => return Err(ApiError::duplicate("user", "email")),
        Err(err) => return Err(err.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(Envelope {
            message: "User registered successfully",
            data: account,
        }),
    ))
}

pub async fn get_all_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserAccount>>> {
    Ok(Json(state.users.list().await?))
}

pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserAccount>> {
    let account = state
        .users
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;
    Ok(Json(account))
}

pub async fn update_user_profile(
    State(state): State<AppState>,
    Json(input): Json<UserAccountInput>,
) -> ApiResult<Json<Envelope<UserAccount>>> {
    let id = parse_body_id(input.id.as_deref())?;

    let existing = state
        .users
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    let updated = input
        .into_update_of(&existing)
        .map_err(ApiError::Validation)?;

    let updated = match state.users.replace(&id, updated).await {
        Ok(Some(account)) => account,
        Ok(None) => return Err(ApiError::not_found("user")),
        Err(StoreError::Duplicate { .. }) => return Err(ApiError::duplicate("user", "email")),
        Err(err) => return Err(err.into()),
    };

    Ok(Json(Envelope {
        message: "Profile updated successfully",
        data: updated,
    }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Envelope<UserAccount>>> {
    let deleted = state
        .users
        .remove(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("user"))?;

    Ok(Json(Envelope {
        message: "User deleted successfully",
        data: deleted,
    }))
}

fn parse_body_id(id: Option<&str>) -> ApiResult<Uuid> {
    let mut errors = FieldErrors::default();
    match id {
        None => {
            errors.insert("id", "is required");
            Err(ApiError::Validation(errors))
        }
        Some(raw) => raw.parse().map_err(|_| {
            errors.insert("id", "must be a valid id");
            ApiError::Validation(errors)
        }),
    }
}
