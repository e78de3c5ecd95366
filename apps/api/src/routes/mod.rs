pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, Router};

use crate::extraction::handlers;
use crate::state::AppState;

/// Headroom on top of the configured document bound for multipart framing
/// (boundary lines and part headers), so a file exactly at the bound still
/// fits in the request body.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // The transport-level body cap must sit above the document bound;
    // otherwise uploads between the two limits die in the multipart reader
    // as a generic 400 instead of a typed 413 from the loader.
    let body_limit =
        DefaultBodyLimit::max(state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        // Document extraction API
        .route(
            "/api/v1/documents/parse",
            post(handlers::handle_parse_document),
        )
        .layer(body_limit)
        .with_state(state)
}
