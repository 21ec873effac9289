//! Logging and observability
//!
//! Structured logging with `tracing`:
//! - Pretty or JSON console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Optional rotating JSON log file
//!
//! Resolved values are never logged; fields carry keys, sources, paths and
//! artifact digests only.
//!
//! # Example
//!
//! ```no_run
//! use envject::logging::init_logging;
//! use envject::config::LoggingConfig;
//!
//! let _guard = init_logging(&LoggingConfig::default()).expect("Failed to initialize logging");
//! tracing::info!(keys = 3, "Manifest loaded");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
