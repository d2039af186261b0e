//! Lifecycle management subsystem.
//!
//! Startup is orchestrated by the binary (config first, then the rule
//! table, listener last). Shutdown is coordinated through a broadcast
//! channel so embedders and tests can stop the server without signals.

pub mod shutdown;

pub use shutdown::Shutdown;
