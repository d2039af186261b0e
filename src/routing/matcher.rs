//! Per-rule match predicate.
//!
//! # Responsibilities
//! - Match the request authority (exact, byte-for-byte)
//! - Match the path prefix (literal string prefix)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Host matching is case-sensitive and includes any port present in the
//!   received authority. The router trusts exact operator-specified values
//!   and performs no normalization; silent normalization would mask
//!   misconfiguration.
//! - Path matching is a raw string prefix, not segment-aware: a prefix of
//!   "/api" also matches "/api2". Kept as observed behavior, encoded in
//!   tests rather than silently changed.

use url::Url;

/// A compiled routing rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Host the request authority must equal exactly.
    pub host: String,

    /// Optional literal path prefix; `None` matches any path.
    pub path_prefix: Option<String>,

    /// Validated backend origin (scheme + host[:port], optional path).
    pub backend: Url,
}

impl Rule {
    /// Returns true if the request authority and path satisfy this rule.
    pub fn matches(&self, host: &str, path: &str) -> bool {
        if self.host != host {
            return false;
        }
        match &self.path_prefix {
            Some(prefix) => path.starts_with(prefix.as_str()),
            None => true,
        }
    }
}
