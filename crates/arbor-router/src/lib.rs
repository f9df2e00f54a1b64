//! Radix tree request router for arbor.
//!
//! This crate routes a `(method, path)` pair to a registered handle using a
//! compressed radix tree per HTTP method, extracting named path parameters
//! on the way.
//!
//! # Features
//!
//! - **Radix Tree Matching**: lookup cost grows with the path length, not the
//!   number of routes
//! - **Path Parameters**: `:name` matches exactly one segment
//! - **Catch-all**: `*name` matches the rest of the path, final segment only
//! - **Trailing-slash hints**: every lookup reports whether the path with a
//!   trailing slash added or removed would match
//! - **Conflict detection**: ambiguous routes are rejected at registration
//!
//! # Example
//!
//! ```rust
//! use arbor_router::Router;
//!
//! # fn main() -> Result<(), arbor_router::RouteError> {
//! let mut router = Router::new();
//! router
//!     .get("/", "index")?
//!     .get("/cmd/:tool/", "showTool")?
//!     .get("/src/*filepath", "serveFile")?;
//!
//! let found = router.lookup("GET", "/src/some/file.png").unwrap();
//! assert_eq!(found.handle, Some(&"serveFile"));
//! assert_eq!(found.params.get("filepath"), Some("/some/file.png"));
//!
//! // no handle, but "/cmd/test/" exists
//! let hint = router.lookup("GET", "/cmd/test").unwrap();
//! assert!(hint.handle.is_none());
//! assert!(hint.tsr);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Each method owns one tree. A node holds a compressed path fragment and
//! either static children addressed by their first byte or a single
//! wildcard child:
//!
//! ```text
//!                "/" (handle)
//!           ┌──────┴──────┐
//!        "cmd/"          "src"
//!           │              │
//!        ":tool"          ""          catch-all anchor
//!           │              │
//!          "/"        "/*filepath"
//!       (handle)        (handle)
//! ```
//!
//! Registration happens once during start-up; afterwards trees are only
//! read. [`SharedRouter`] publishes whole new routers for hot updates.

mod error;
mod lookup;
mod node;
mod options;
mod params;
mod router;
mod shared;

pub use error::RouteError;
pub use lookup::Lookup;
pub use node::{Node, NodeKind};
pub use options::RouterOptions;
pub use params::{Param, Params, MATCHED_ROUTE_PATH_PARAM};
pub use router::{Endpoint, Router};
pub use shared::SharedRouter;
