//! Response bodies for the HTTP endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Every response, success or failure, uses this shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub intent: String,
    pub data: Value,
    pub context: String,
}

impl Envelope {
    pub fn new(intent: impl Into<String>, data: Value, context: impl Into<String>) -> Self {
        Self { intent: intent.into(), data, context: context.into() }
    }
}

/// Handler failure, rendered as an `"error"` envelope
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl ApiError {
    fn parts(self) -> (StatusCode, String, &'static str) {
        match self {
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, msg, "No stored court availability is available yet.")
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, "An error occurred while fetching court availability.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, context) = self.parts();
        let body = Envelope::new("error", json!({ "error": message }), context);
        (status, Json(body)).into_response()
    }
}

impl From<crate::error::CrawlError> for ApiError {
    fn from(err: crate::error::CrawlError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
