use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;
use crate::state::AppState;

pub mod outfits;
pub mod wardrobe;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(request_id::request_span))
        .layer(middleware::from_fn(request_id::propagate_request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Wardrobe items
        .route("/items", post(wardrobe::ingest).get(wardrobe::list))
        .route(
            "/items/:id",
            put(wardrobe::update_tags).delete(wardrobe::remove),
        )
        .route("/stats", get(wardrobe::stats))
        // Outfits
        .route("/outfits/recommend", post(outfits::recommend))
        .route("/outfits/worn", post(outfits::confirm_worn))
        .route("/outfits/history", get(outfits::history))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
