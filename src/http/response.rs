//! Outbound response shapes.
//!
//! # Responsibilities
//! - Build the greeting, passthrough and error responses
//! - Normalize content-type per response kind
//! - Map upstream failures to a single status code
//!
//! # Design Decisions
//! - CORS headers are not set here; the server layers stamp them last
//! - Unsupported methods answer 500, not 405
//! - Any upstream failure answers 502 Bad Gateway

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub const GREETING: &str = "Hello worker!";
pub const EXPECTED_GET: &str = "Expected GET";
pub const UPSTREAM_FAILED: &str = "Upstream request failed";

pub const TEXT_PLAIN: &str = "text/plain";
pub const JSON_UTF8: &str = "application/json;charset=UTF-8";

/// `200 text/plain` greeting.
pub fn greeting() -> Response {
    ([(header::CONTENT_TYPE, TEXT_PLAIN)], GREETING).into_response()
}

/// `200` with an upstream payload, always labelled as UTF-8 JSON.
pub fn passthrough(body: String) -> Response {
    ([(header::CONTENT_TYPE, JSON_UTF8)], body).into_response()
}

/// `500 Expected GET`.
pub fn expected_get() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, EXPECTED_GET).into_response()
}

/// `502` for an upstream that could not be read.
pub fn upstream_failure() -> Response {
    (StatusCode::BAD_GATEWAY, UPSTREAM_FAILED).into_response()
}
