// Web server — Axum-based JSON API over the analyzer.
//
// Three routes: a health check, quick (pattern-only) analysis, and deep
// (model-backed) analysis. Provider failures never surface as HTTP
// errors; only invalid input does.

use std::sync::Arc;

use anyhow::Result;
use axum::http::header;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analyzer::Analyzer;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

/// Start the Axum API server and block until it exits.
pub async fn run_server(analyzer: Arc<Analyzer>, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState { analyzer });

    let addr = format!("{bind}:{port}");
    info!("Litmus API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router. Public so integration tests can drive it with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/quick_analyze", post(handlers::quick_analyze))
        .route("/analyze", post(handlers::analyze))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
