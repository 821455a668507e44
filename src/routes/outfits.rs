use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    middleware::owner::OwnerId,
    models::{HistoryEntry, OutfitHistoryRecord, OutfitSelection, WornItemIds},
    services::{history, recommendation, wear},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default = "default_season")]
    pub season: String,
    #[serde(default = "default_occasion")]
    pub occasion: String,
}

fn default_season() -> String {
    "Summer".to_string()
}

fn default_occasion() -> String {
    "Casual".to_string()
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub season: String,
    pub occasion: String,
    pub outfit: OutfitSelection,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

/// Handler for the outfit recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    owner: OwnerId,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    tracing::info!(
        request_id = %request_id,
        owner = %owner,
        season = %request.season,
        occasion = %request.occasion,
        "Processing recommendation request"
    );

    let outfit =
        recommendation::recommend(&state.pool, &owner.0, &request.season, &request.occasion)
            .await?;

    Ok(Json(RecommendResponse {
        season: request.season,
        occasion: request.occasion,
        outfit,
    }))
}

/// Handler: confirm an outfit as worn
pub async fn confirm_worn(
    State(state): State<AppState>,
    owner: OwnerId,
    Json(worn): Json<WornItemIds>,
) -> AppResult<(StatusCode, Json<OutfitHistoryRecord>)> {
    let record = wear::confirm_worn(&state.pool, &owner.0, worn).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler: list past wearing events, newest first
pub async fn history(
    State(state): State<AppState>,
    owner: OwnerId,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let entries = history::list_history(&state.pool, &owner.0, params.limit).await?;
    Ok(Json(entries))
}
