//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One JSON endpoint turns template text into an SVG diagram; the icon routes
//! serve the assets that diagram links to. CORS is open so a browser editor
//! hosted elsewhere can call the API directly.

pub mod diagram;
pub mod error;
pub mod icons;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All routes with shared state, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate-diagram", post(diagram::generate_diagram))
        .route("/icons/{filename}", get(icons::serve_icon))
        .route("/icons/aws/{filename}", get(icons::serve_icon))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
