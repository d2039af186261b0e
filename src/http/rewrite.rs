//! Destination rewrite for the upstream hop.
//!
//! # Responsibilities
//! - Swap scheme and authority for the matched backend's
//! - Apply the configured path policy
//! - Compute the `Host` header value sent upstream
//!
//! # Design Decisions
//! - `Preserve` forwards the original path untouched
//! - `Strip` replaces the path with the backend URL's own path component;
//!   the query string is still forwarded under both policies, only the
//!   path was a routing key
//! - Everything else about the request is left alone

use std::str::FromStr;

use axum::http::uri::{Authority, PathAndQuery, Scheme, Uri};
use url::Url;

use crate::config::schema::RewritePolicy;

/// Error building the upstream destination.
///
/// Only reachable if a backend URL validated at startup yields components
/// the `http` types reject; callers treat it as an upstream failure.
#[derive(Debug, thiserror::Error)]
#[error("invalid upstream destination: {0}")]
pub struct RewriteError(String);

/// The authority placed in the upstream `Host` header: the backend's
/// host, plus its port when one is explicit in the backend URL.
pub fn upstream_authority(backend: &Url) -> String {
    // host presence is guaranteed at rule compilation
    let host = backend.host_str().unwrap_or_default();
    match backend.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Build the upstream URI for a request according to the rewrite policy.
pub fn upstream_uri(
    backend: &Url,
    original: &Uri,
    policy: RewritePolicy,
) -> Result<Uri, RewriteError> {
    let scheme =
        Scheme::from_str(backend.scheme()).map_err(|e| RewriteError(e.to_string()))?;
    let authority = Authority::from_str(&upstream_authority(backend))
        .map_err(|e| RewriteError(e.to_string()))?;

    let path = match policy {
        RewritePolicy::Preserve => original.path(),
        RewritePolicy::Strip => backend.path(),
    };
    let path_and_query = match original.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let path_and_query =
        PathAndQuery::from_str(&path_and_query).map_err(|e| RewriteError(e.to_string()))?;

    Uri::builder()
        .scheme(scheme)
        .authority(authority)
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| RewriteError(e.to_string()))
}
