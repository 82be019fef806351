use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::application::services::{ReviewFilter, digest_reviews};
use crate::domain::ClassifiedReview;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::ApiError;

const DEFAULT_REVIEW_LIMIT: u32 = 50;
const MAX_REVIEW_LIMIT: u32 = 200;

#[derive(Debug, Serialize)]
pub struct HotelDataResponse {
    pub success: bool,
    pub data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewsQuery {
    pub limit: Option<u32>,
    pub language: Option<String>,
    pub include_generic: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsResponse {
    pub success: bool,
    pub hotel_id: String,
    pub reviews: Vec<ClassifiedReview>,
    pub total: usize,
    pub kept: usize,
    pub generic: usize,
    pub average_score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AskBody {
    pub question: String,
}

fn require_hotel_id(hotel_id: &str) -> Result<&str, ApiError> {
    let hotel_id = hotel_id.trim();
    if hotel_id.is_empty() {
        return Err(ApiError::validation("Hotel ID is required"));
    }
    Ok(hotel_id)
}

#[tracing::instrument(skip(state))]
pub async fn hotel_details_handler(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
) -> Result<Json<HotelDataResponse>, ApiError> {
    let hotel_id = require_hotel_id(&hotel_id)?;
    let data = state.hotel_data.hotel_details(hotel_id).await?;

    Ok(Json(HotelDataResponse {
        success: true,
        data,
    }))
}

#[tracing::instrument(skip(state, query))]
pub async fn hotel_reviews_handler(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    query: Result<Query<ReviewsQuery>, QueryRejection>,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let Query(query) = query?;
    let hotel_id = require_hotel_id(&hotel_id)?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_REVIEW_LIMIT)
        .clamp(1, MAX_REVIEW_LIMIT);

    let reviews = state.hotel_data.hotel_reviews(hotel_id, limit).await?;
    let filter = ReviewFilter {
        language: query.language,
        include_generic: query.include_generic.unwrap_or(false),
    };
    let digest = digest_reviews(reviews, &filter);

    tracing::info!(
        total = digest.total,
        kept = digest.reviews.len(),
        generic = digest.generic,
        "Reviews digested"
    );

    Ok(Json(ReviewsResponse {
        success: true,
        hotel_id: hotel_id.to_string(),
        kept: digest.reviews.len(),
        total: digest.total,
        generic: digest.generic,
        average_score: digest.average_score,
        reviews: digest.reviews,
    }))
}

#[tracing::instrument(skip(state, payload))]
pub async fn ask_hotel_handler(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    payload: Result<Json<AskBody>, JsonRejection>,
) -> Result<Json<HotelDataResponse>, ApiError> {
    let Json(body) = payload?;
    let hotel_id = require_hotel_id(&hotel_id)?;
    let question = body.question.trim();
    if question.is_empty() {
        return Err(ApiError::validation("Question is required"));
    }

    tracing::debug!(question = %sanitize_prompt(question), "Asking hotel");
    let data = state.hotel_data.ask_hotel(hotel_id, question).await?;

    Ok(Json(HotelDataResponse {
        success: true,
        data,
    }))
}
