//! HTTP API exposing the resolution engine.
//!
//! One computational endpoint (`GET /api/resolve`) plus a health probe;
//! JSON in the same shape the CLI prints.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::resolution::PolarCircleResolution;

pub fn build_router(default_resolution: PolarCircleResolution) -> Router {
    let state = Arc::new(AppState { default_resolution });

    Router::new()
        .route("/api/resolve", get(handlers::resolve_times))
        .route("/api/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, default_resolution: PolarCircleResolution) {
    let app = build_router(default_resolution);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    eprintln!("  Aqrab server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    });
}
