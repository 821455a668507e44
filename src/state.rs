use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::classifier::Classifier;

/// Shared application state handed to every handler
///
/// The storage handle and the classifier collaborator are injected here
/// rather than reached through globals, so tests can swap both.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub classifier: Arc<dyn Classifier>,
}

impl AppState {
    pub fn new(pool: SqlitePool, classifier: Arc<dyn Classifier>) -> Self {
        Self { pool, classifier }
    }
}
