//! Typed configuration for arbor routers.
//!
//! Loads router flags and logging setup from defaults, a TOML or JSON file,
//! a `.env` file and `PREFIX__SECTION__KEY` environment variables, in that
//! order. Unknown fields are rejected.
//!
//! # Configuration File Format
//!
//! ```toml
//! [router]
//! redirect_trailing_slash = true
//! redirect_fixed_path = true
//! handle_method_not_allowed = true
//! handle_options = true
//! save_matched_route_path = false
//! global_allowed = "GET, POST, OPTIONS"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Example
//!
//! ```
//! use arbor_config::ConfigLoader;
//! use arbor_router::Router;
//!
//! # fn main() -> Result<(), arbor_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_string("[router]\nsave_matched_route_path = true\n", "toml")?
//!     .load()?;
//!
//! let router: Router<&str> = Router::with_options(config.router.to_options());
//! assert!(router.router_options().save_matched_route_path);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod loader;
mod schema;

pub use config::ArborConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, RouterConfig};
