//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all proxy handler)
//!     → request.rs (inject x-request-id)
//!     → routing layer selects a rule (or none)
//!     → rewrite.rs (destination rewrite per policy)
//!     → upstream dispatch (hyper client, streaming both ways)
//!     → response.rs (canned 404/502/504 on no-match / failure)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod rewrite;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
