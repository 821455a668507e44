use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::owner::OwnerId,
    models::ClothingItem,
    services::wardrobe,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateTagsRequest {
    pub season: String,
    pub occasion: String,
}

/// Handler: classify an uploaded image and add it to the wardrobe
pub async fn ingest(
    State(state): State<AppState>,
    owner: OwnerId,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ClothingItem>)> {
    let item =
        wardrobe::ingest_item(&state.pool, state.classifier.as_ref(), &owner.0, &body).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler: list the wardrobe grouped by section
pub async fn list(
    State(state): State<AppState>,
    owner: OwnerId,
) -> AppResult<Json<wardrobe::GroupedWardrobe>> {
    let grouped = wardrobe::list_wardrobe(&state.pool, &owner.0).await?;
    Ok(Json(grouped))
}

/// Handler: update an item's season/occasion tags
pub async fn update_tags(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(item_id): Path<i64>,
    Json(request): Json<UpdateTagsRequest>,
) -> AppResult<Json<ClothingItem>> {
    let item = wardrobe::update_tags(
        &state.pool,
        &owner.0,
        item_id,
        &request.season,
        &request.occasion,
    )
    .await?;

    Ok(Json(item))
}

/// Handler: delete a wardrobe item
pub async fn remove(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(item_id): Path<i64>,
) -> AppResult<StatusCode> {
    wardrobe::delete_item(&state.pool, &owner.0, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler: wardrobe usage statistics
pub async fn stats(
    State(state): State<AppState>,
    owner: OwnerId,
) -> AppResult<Json<wardrobe::WardrobeStats>> {
    let stats = wardrobe::wardrobe_stats(&state.pool, &owner.0).await?;
    Ok(Json(stats))
}
