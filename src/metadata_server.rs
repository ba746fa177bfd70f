//! Linkstash metadata service — fetches page previews server-side so the
//! web client never hits cross-origin restrictions.
//!
//! Single endpoint: `POST /api/metadata` with body `{"url": "..."}`.
//! Success answers 200 with `{title, description, favicon}`; any failure
//! answers 500 with the fixed fallback triple. No authentication.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use linkstash::services::metadata_extractor::{MetadataExtractor, MetadataSource};
use linkstash::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkstash::types::metadata::PageMetadata;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut settings_engine = SettingsEngine::new(None);
    let _ = settings_engine.load();
    let settings = settings_engine.get_settings().clone();

    let source = MetadataSource::from_settings(&settings.metadata);
    let extractor = Arc::new(MetadataExtractor::with_source(source));

    let app = Router::new()
        .route("/api/metadata", post(fetch_metadata))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(extractor);

    let bind = settings.server.metadata_bind;
    tracing::info!(%bind, "metadata service listening");
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .expect("Failed to bind metadata service");
    axum::serve(listener, app)
        .await
        .expect("Metadata service failed");
}

/// `POST /api/metadata` — resolve a preview for the submitted URL.
async fn fetch_metadata(
    State(extractor): State<Arc<MetadataExtractor>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<PageMetadata>) {
    let Some(url) = body.get("url").and_then(|v| v.as_str()) else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(PageMetadata::unknown()),
        );
    };

    match extractor.resolve(url).await {
        Ok(meta) => (StatusCode::OK, Json(meta)),
        Err(err) => {
            tracing::debug!(url, error = %err, "metadata resolution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(PageMetadata::unknown()),
            )
        }
    }
}
