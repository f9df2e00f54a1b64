//! High-level router API.
//!
//! This module provides the main [`Router`] struct which keeps one radix
//! tree per HTTP method and is the primary interface for registering and
//! looking up routes.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::error::RouteError;
use crate::lookup::Lookup;
use crate::node::Node;
use crate::options::RouterOptions;
use crate::params::MATCHED_ROUTE_PATH_PARAM;

/// The value stored on a tree node for a registered route.
#[derive(Debug, Clone)]
pub struct Endpoint<H> {
    handle: H,
    route: Option<Arc<str>>,
}

impl<H> Endpoint<H> {
    /// The registered handle.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// The registered pattern, recorded only when `save_matched_route_path`
    /// was enabled at registration time.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }
}

/// A router with one radix tree per HTTP method.
///
/// Method names are used exactly as supplied; `"get"` and `"GET"` are
/// different trees. Routes are registered during start-up and the router
/// is read-only afterwards; see [`SharedRouter`](crate::SharedRouter) for
/// replacing the route table while serving.
///
/// # Example
///
/// ```rust
/// use arbor_router::Router;
///
/// # fn main() -> Result<(), arbor_router::RouteError> {
/// let mut router = Router::new();
/// router
///     .on("GET", "/cmd/:tool/:sub", "runSub")?
///     .on("GET", "/src/*filepath", "serveFile")?;
///
/// let found = router.lookup("GET", "/cmd/test/3").unwrap();
/// assert_eq!(found.handle, Some(&"runSub"));
/// assert_eq!(found.params.get("tool"), Some("test"));
/// assert_eq!(found.params.get("sub"), Some("3"));
///
/// assert!(router.lookup("POST", "/cmd/test/3").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Router<H> {
    trees: HashMap<String, Node<Endpoint<H>>>,
    options: RouterOptions<H>,
    route_count: usize,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Creates an empty router with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    /// Creates an empty router with the given options.
    #[must_use]
    pub fn with_options(options: RouterOptions<H>) -> Self {
        Self {
            trees: HashMap::new(),
            options,
            route_count: 0,
        }
    }

    /// Registers `handle` for `method` and `path`.
    ///
    /// The tree for `method` is created on first use. A failed registration
    /// may leave that tree partially modified, so the router should not be
    /// used to serve requests afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoLeadingSlash`] if `path` does not start with
    /// `/`, or any structural conflict reported by [`Node::add_route`].
    pub fn on(&mut self, method: &str, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        if !path.starts_with('/') {
            let err = RouteError::NoLeadingSlash {
                full_path: path.to_string(),
            };
            tracing::warn!(method, path, error = %err, "Rejected route");
            return Err(err);
        }

        let route = self
            .options
            .save_matched_route_path
            .then(|| Arc::from(path));

        let root = self.trees.entry(method.to_string()).or_insert_with(|| {
            tracing::debug!(method, "Creating method tree");
            Node::new()
        });

        if let Err(err) = root.add_route(path, Endpoint { handle, route }) {
            tracing::warn!(method, path, error = %err, "Rejected route");
            return Err(err);
        }

        self.route_count += 1;
        tracing::debug!(method, path, "Registered route");
        Ok(self)
    }

    /// Registers a GET route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn get(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::GET.as_str(), path, handle)
    }

    /// Registers a HEAD route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn head(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::HEAD.as_str(), path, handle)
    }

    /// Registers a POST route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn post(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::POST.as_str(), path, handle)
    }

    /// Registers a PUT route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn put(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::PUT.as_str(), path, handle)
    }

    /// Registers a PATCH route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn patch(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::PATCH.as_str(), path, handle)
    }

    /// Registers a DELETE route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn delete(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::DELETE.as_str(), path, handle)
    }

    /// Registers an OPTIONS route.
    ///
    /// # Errors
    ///
    /// See [`Router::on`].
    pub fn options(&mut self, path: &str, handle: H) -> Result<&mut Self, RouteError> {
        self.on(Method::OPTIONS.as_str(), path, handle)
    }

    /// Looks up `path` in the tree for `method`.
    ///
    /// Returns `None` when no route was ever registered for `method`.
    /// Otherwise the result carries the matched handle (if any), the
    /// captured parameters and the trailing-slash redirect hint.
    #[must_use]
    pub fn lookup(&self, method: &str, path: &str) -> Option<Lookup<'_, H>> {
        let root = self.trees.get(method)?;
        let Lookup {
            handle,
            mut params,
            tsr,
        } = root.get_value(path);

        let handle = handle.map(|endpoint| {
            if let Some(route) = endpoint.route() {
                params.push(MATCHED_ROUTE_PATH_PARAM, route);
            }
            endpoint.handle()
        });

        Some(Lookup {
            handle,
            params,
            tsr,
        })
    }

    /// Returns the root of the tree for `method`, if one exists.
    #[must_use]
    pub fn tree(&self, method: &str) -> Option<&Node<Endpoint<H>>> {
        self.trees.get(method)
    }

    /// Returns the methods that have at least one route, sorted.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.trees.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Returns the router options.
    #[must_use]
    pub fn router_options(&self) -> &RouterOptions<H> {
        &self.options
    }

    /// Returns the router options for modification.
    pub fn router_options_mut(&mut self) -> &mut RouterOptions<H> {
        &mut self.options
    }

    /// Returns the number of routes registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
