//! KinRoots Server - Shared lineage sync API
//!
//! Small HTTP bridge between family members' clients and the configured
//! storage backend: GET returns the full person list, POST replaces it.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kinroots_core::{Lineage, Person};
use kinroots_storage::LineageStore;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

/// Maximum request body size (1MB)
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared storage handle used as router state
pub type SharedStore = Arc<dyn LineageStore>;

/// POST body: the full replacement snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveRequest {
    pub people: Vec<Person>,
}

#[derive(Serialize)]
struct SaveResponse {
    success: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the sync API router over the given store
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/lineage", get(get_lineage).post(post_lineage))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Bind and serve until shutdown
pub async fn serve(addr: SocketAddr, store: SharedStore) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("lineage API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(store)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn get_lineage(State(store): State<SharedStore>) -> Response {
    match store.load_lineage().await {
        Ok(lineage) => Json(lineage.people).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load lineage");
            database_error()
        }
    }
}

async fn post_lineage(
    State(store): State<SharedStore>,
    Json(request): Json<SaveRequest>,
) -> Response {
    let lineage = Lineage::from_people(request.people);
    match store.save_lineage(&lineage).await {
        Ok(()) => Json(SaveResponse { success: true }).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to save lineage");
            database_error()
        }
    }
}

fn database_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Database error".to_string(),
        }),
    )
        .into_response()
}
