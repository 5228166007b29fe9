//! Shared utilities for market-snapshot
//!
//! Logging setup and the application-level configuration used by the binary.

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::{DEFAULT_FILTER, init_tracing, init_tracing_for, init_tracing_with_default};
