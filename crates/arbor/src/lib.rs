//! # Arbor
//!
//! A radix tree request router: one compressed prefix tree per HTTP method,
//! `:name` parameters, `*name` catch-alls and trailing-slash redirect hints.
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor::prelude::*;
//!
//! # fn main() -> Result<(), RouteError> {
//! let mut router = Router::new();
//! router.on("GET", "/foo/bar/:ker", "handler")?;
//!
//! let found = router.lookup("GET", "/foo/bar/alex").expect("GET tree");
//! assert_eq!(found.handle, Some(&"handler"));
//! assert_eq!(found.params.get("ker"), Some("alex"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - [`router`]: trees, lookup, options and hot-swappable routers
//! - [`config`]: layered TOML/JSON/env configuration
//! - [`telemetry`]: logging bootstrap

#![doc(html_root_url = "https://docs.rs/arbor/0.1.0")]

pub use arbor_config as config;
pub use arbor_router as router;
pub use arbor_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use arbor::prelude::*;
///
/// let router: Router<u32> = Router::with_options(RouterConfig::default().to_options());
/// assert!(router.is_empty());
/// ```
pub mod prelude {
    pub use arbor_router::{
        Endpoint, Lookup, Param, Params, RouteError, Router, RouterOptions, SharedRouter,
        MATCHED_ROUTE_PATH_PARAM,
    };

    pub use arbor_config::{ArborConfig, ConfigError, ConfigLoader, RouterConfig};

    pub use arbor_telemetry::{init_logging, LogConfig, LogFormat, TelemetryError};
}
