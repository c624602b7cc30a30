//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One JSON endpoint does the work (`POST /prompt`); `/healthz` exists for
//! probes. The CORS layer allows exactly the configured trusted origins —
//! never a wildcard — with only the method and header this contract uses.

pub mod prompt;

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/prompt", post(prompt::handle))
        .route("/healthz", get(healthz))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
