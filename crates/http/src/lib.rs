//! HTTP API server for the crownwatch gateway.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crownwatch_service::{CrownService, ImageService, ObservationService};

pub use response_types::{ReadinessResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Constructed once at startup, after the geospatial client has
/// authenticated; no handler re-resolves credentials or collections.
pub struct AppState {
    /// Satellite-image lookups.
    pub images: ImageService,
    /// Crown join/filter/style orchestration.
    pub crowns: CrownService,
    /// Plant-record persistence and listing.
    pub observations: Arc<ObservationService>,
    /// Readiness gate, flipped once startup initialization completes.
    pub ready: AtomicBool,
}

impl AppState {
    /// Marks startup initialization as complete.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }
}

/// CORS gate for the configured origin allow-list.
///
/// Answers pre-flight requests itself: an OPTIONS pre-flight never reaches a
/// handler and carries the allow-origin, allow-methods, and allow-headers
/// headers with no body.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "skipping unparseable CORS origin");
                None
            },
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/readiness", get(readiness))
        .route("/api/version", get(version))
        .route("/image", get(handlers::images::get_image))
        .route("/render-image", get(handlers::images::render_image))
        .route("/crowns", get(handlers::crowns::get_crowns))
        .route("/observations", post(handlers::observations::add_observation))
        .route("/get-globalids-by-date", get(handlers::observations::get_globalids_by_date))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn readiness(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    if state.ready.load(Ordering::Acquire) {
        (StatusCode::OK, Json(ReadinessResponse { status: "ready", message: None }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                status: "initializing",
                message: Some("startup initialization has not completed"),
            }),
        )
    }
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
