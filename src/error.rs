use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::Category;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Classifier error: {0}")]
    Classifier(String),

    /// One or more outfit slots have no item matching the requested
    /// season/occasion filter. Recoverable: the caller should prompt the
    /// user to add items to the named sections.
    #[error("Not enough matching items ({}). Please add more clothes!", section_labels(.missing))]
    InsufficientInventory { missing: Vec<Category> },

    #[error("No authenticated owner identity")]
    InvalidOwner,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

fn section_labels(missing: &[Category]) -> String {
    missing
        .iter()
        .map(|category| category.section_label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) | AppError::InsufficientInventory { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidOwner => StatusCode::UNAUTHORIZED,
            AppError::HttpClient(_) | AppError::Classifier(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            // Name the missing sections so the caller can render an
            // actionable message.
            AppError::InsufficientInventory { missing } => {
                let labels: Vec<&'static str> =
                    missing.iter().map(Category::section_label).collect();
                json!({ "error": self.to_string(), "missing": labels })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
