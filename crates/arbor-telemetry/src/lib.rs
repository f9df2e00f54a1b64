//! Logging setup for arbor.
//!
//! Installs a `tracing-subscriber` registry with an env filter and a JSON,
//! pretty or compact formatting layer. Metrics and distributed tracing are
//! out of scope; the router only emits `tracing` events.
//!
//! # Example
//!
//! ```rust,no_run
//! use arbor_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production()).expect("logging");
//! ```

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
