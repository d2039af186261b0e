//! Canned client-facing responses.
//!
//! # Design Decisions
//! - Short plain-text bodies; the router's own errors need no detail
//!   beyond the status class
//! - Upstream timeout maps to 504, every other upstream failure to 502

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Response for a request no rule matched.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Response for an unreachable or misbehaving backend.
pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
}

/// Response for an upstream round trip that exceeded its deadline.
pub fn gateway_timeout() -> Response {
    (StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout").into_response()
}
