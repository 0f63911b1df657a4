#![deny(missing_docs)]

//! Core library for the student roster server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Roster activity counters.
pub mod metrics;
/// Student records and the lock-guarded in-memory store.
pub mod roster;
