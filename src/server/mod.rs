//! HTTP API for court availability
//!
//! - `GET /`: liveness
//! - `POST /court-availability`: run a live crawl
//! - `GET /court-availability`: the last stored snapshot

pub mod dto;
pub mod handlers;
pub mod state;

pub use dto::{ApiError, Envelope};
pub use state::{AppState, Crawler};

use axum::{
    Router,
    routing::get,
};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/court-availability",
            get(handlers::stored_availability).post(handlers::live_availability),
        )
        .with_state(state)
}
