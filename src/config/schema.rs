//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the JSON
//! configuration document.

use serde::{Deserialize, Serialize};

/// Root configuration for the ingress router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener port. String-typed per the external config contract;
    /// bound as `0.0.0.0:<port>`.
    pub port: String,

    /// Route definitions, in match order. First match wins.
    pub routes: Vec<RouteConfig>,

    /// Path rewrite policy applied to every forwarded request.
    pub rewrite: RewritePolicy,

    /// Cap on the full upstream round trip, in seconds.
    pub upstream_timeout_secs: u64,

    /// TCP connect timeout towards backends, in seconds.
    pub connect_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    /// The `RUST_LOG` environment variable takes precedence.
    pub log_level: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            port: "8080".to_string(),
            routes: Vec::new(),
            rewrite: RewritePolicy::default(),
            upstream_timeout_secs: 10,
            connect_timeout_secs: 5,
            log_level: "info".to_string(),
        }
    }
}

/// A single routing rule as written in the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Host the request authority must equal, byte-for-byte.
    pub host: String,

    /// Optional literal path prefix; absent means host-only matching.
    #[serde(default)]
    pub path: Option<String>,

    /// Backend origin as an absolute URL string, validated at startup.
    pub backend: String,
}

/// How the request path is rewritten for the upstream hop.
///
/// The two policies are not interchangeable; each deployment picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewritePolicy {
    /// Forward the original request path unchanged.
    #[default]
    Preserve,
    /// Replace the path with the backend URL's own path component. Used
    /// when the backend is a single fixed endpoint and the incoming path
    /// was only a routing key.
    Strip,
}
