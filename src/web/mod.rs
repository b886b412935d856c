// Web surface — a thin JSON boundary over the synchronous engine.
//
// Two routes: POST /analyze runs the pipeline, GET /health reports
// liveness independently of the engine. Request validation happens
// here (missing audit id, empty page set) so the core never parses or
// rejects transport-level defects. No auth, no persistence.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::pipeline::Analyzer;

pub mod handlers;

/// Shared application state threaded through all handlers.
///
/// The analyzer is immutable after construction, so concurrent
/// requests share it read-only behind the Arc.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub suggestion_limit: usize,
}

/// Start the server and block until it exits.
///
/// The engine itself is synchronous; the runtime exists only for the
/// HTTP boundary, so it is built here instead of in main.
pub fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let state = AppState {
        analyzer: Arc::new(Analyzer::new(&config).silent()),
        suggestion_limit: config.suggestion_limit,
    };

    let app = build_router(state);
    let addr = format!("{bind}:{port}");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        info!("balise listening on http://{addr}");
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always 200, independent of the engine.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
