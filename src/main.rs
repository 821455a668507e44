use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use wardrobe_api::{
    config::Config, db, routes::create_router, services::classifier::HttpClassifier,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let classifier = Arc::new(HttpClassifier::new(
        config.classifier_url.clone(),
        config.classifier_api_key.clone(),
    ));

    let state = AppState::new(pool, classifier);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Wardrobe API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
