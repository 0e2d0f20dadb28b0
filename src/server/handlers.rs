//! HTTP handlers.

use axum::{Json, extract::State};
use log::{error, info};
use serde_json::json;

use super::dto::{ApiError, Envelope};
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult = Result<Json<Envelope>, ApiError>;

/// GET /
pub async fn health() -> &'static str {
    "ok"
}

/// POST /court-availability
///
/// Runs a live crawl. Crawls are serialized: a request arriving while one is
/// in flight waits for it to finish and then starts its own. The lock travels
/// with the crawl, so a client that disconnects does not release it early.
pub async fn live_availability(State(state): State<AppState>) -> HandlerResult {
    let running = state.crawl_lock.clone().lock_owned().await;
    info!("Running live court availability crawl");

    let crawler = state.crawler.clone();
    let config = state.config.clone();
    let launch = state.launch.clone();

    let report = tokio::task::spawn_blocking(move || {
        let report = crawler(config.as_ref(), &launch);
        drop(running);
        report
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Crawl task failed: {}", e)))?
    .map_err(|e| {
        error!("Error fetching live court availability: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(Envelope::new(
        "court_availability",
        json!({
            "liveAvailability": report.availability,
            "timedOutDates": report.timed_out,
        }),
        "Live court availability read from the venue's booking calendar.",
    )))
}

/// GET /court-availability
///
/// Serves the snapshot written by the last refresh.
pub async fn stored_availability(State(state): State<AppState>) -> HandlerResult {
    let snapshot = state
        .store
        .load()?
        .ok_or_else(|| ApiError::NotFound("no snapshot has been stored".to_string()))?;

    Ok(Json(Envelope::new(
        "court_availability",
        json!({
            "availability": snapshot.availability,
            "crawledAt": snapshot.crawled_at,
        }),
        "Court availability from the most recent scheduled refresh.",
    )))
}
