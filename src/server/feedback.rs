//! HTTP handlers for user feedback
//!
//! The feedback endpoints keep the original API's `success`-flagged
//! envelopes, which predate the `{message, data}` shape used elsewhere.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::state::AppState;
use crate::core::error::{ApiError, ApiResult};
use crate::domain::{Feedback, FeedbackInput};

#[derive(Debug, Serialize)]
pub struct FeedbackSubmitted {
    pub success: bool,
    pub message: &'static str,
    pub data: Feedback,
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(input): Json<FeedbackInput>,
) -> ApiResult<(StatusCode, Json<FeedbackSubmitted>)> {
    let feedback = input.into_new_feedback().map_err(ApiError::Validation)?;
    let feedback = state.feedback.insert(feedback).await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackSubmitted {
            success: true,
            message: "Thank you for your feedback!",
            data: feedback,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct FeedbackList {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Feedback>,
}

pub async fn list_feedback(State(state): State<AppState>) -> ApiResult<Json<FeedbackList>> {
    let all = state.feedback.list().await?;
    Ok(Json(FeedbackList {
        success: true,
        count: all.len(),
        data: all,
    }))
}

#[derive(Debug, Serialize)]
pub struct AverageRating {
    pub success: bool,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    pub count: usize,
}

/// Mean rating across all feedback; zero when none has been submitted.
pub async fn average_rating(State(state): State<AppState>) -> ApiResult<Json<AverageRating>> {
    let all = state.feedback.list().await?;
    let count = all.len();
    let average = if count == 0 {
        0.0
    } else {
        all.iter().map(|entry| entry.rating).sum::<f64>() / count as f64
    };

    Ok(Json(AverageRating {
        success: true,
        average_rating: average,
        count,
    }))
}
