//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (parse & deserialize)
//!     → RouterConfig (immutable for the process lifetime)
//!     → routing::RuleTable::from_config (backend URL validation)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields except `routes` have defaults to allow minimal configs
//! - Backend URL validation happens at rule compilation, not here, so the
//!   routing layer owns the invariant it relies on

pub mod loader;
pub mod schema;

pub use loader::ConfigError;
pub use schema::{RewritePolicy, RouteConfig, RouterConfig};
