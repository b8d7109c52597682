//! HTTP surface for the mixed analyzer
//!
//! - `POST /api/mixed-analysis/analyze` analyzes one response
//! - `POST /api/mixed-analysis/analyze-batch` analyzes and aggregates several
//! - `GET /health` reports liveness

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::pipeline::MixedAnalyzer;

pub mod error;
pub mod handlers;
pub mod health;

pub use error::ApiError;
pub use health::health_routes;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: MixedAnalyzer,
}

impl AppState {
    pub fn new(analyzer: MixedAnalyzer) -> Self {
        Self { analyzer }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let analysis = Router::new()
        .route("/api/mixed-analysis/analyze", post(handlers::analyze_response))
        .route(
            "/api/mixed-analysis/analyze-batch",
            post(handlers::analyze_batch),
        );

    Router::new()
        .merge(analysis)
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
