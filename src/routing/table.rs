//! Rule table construction and lookup.
//!
//! # Responsibilities
//! - Parse and validate backend URLs out of raw route records
//! - Hold the ordered rule set for the process lifetime
//! - Answer lookup queries with the first matching rule
//!
//! # Design Decisions
//! - An invalid backend URL is fatal at construction. A rule that can
//!   never forward must fail startup, not surface as 404s later.
//! - Linear scan in configuration order. Rule sets are small (tens to low
//!   hundreds of entries), so no host index is kept; a replacement would
//!   have to preserve the first-match-in-original-order tie-break exactly.
//! - Immutable after construction, shared via Arc without locks.

use url::Url;

use crate::config::loader::ConfigError;
use crate::config::schema::RouteConfig;
use crate::routing::matcher::Rule;

/// The ordered, immutable set of routing rules.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Compile raw route records into a rule table.
    ///
    /// Fails if any backend string is not an absolute http/https URL with
    /// a host.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(routes.len());
        for route in routes {
            let backend = parse_backend(&route.host, &route.backend)?;
            rules.push(Rule {
                host: route.host.clone(),
                path_prefix: route.path.clone(),
                backend,
            });
        }
        Ok(Self { rules })
    }

    /// Return the first rule matching the given authority and path, in
    /// configuration order.
    pub fn lookup(&self, host: &str, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(host, path))
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_backend(host: &str, raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBackend {
        host: host.to_string(),
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme {other:?}"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
