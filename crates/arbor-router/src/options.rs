//! Router options.
//!
//! These are policies for the HTTP layer wrapped around the router. The
//! router only stores them; redirects, 405 answers and automatic OPTIONS
//! replies are issued by the caller. The one option the router itself acts
//! on is [`RouterOptions::save_matched_route_path`].

/// Options attached to a [`Router`](crate::Router).
///
/// `H` is the handler type of the router; the optional handler slots hold
/// fallbacks for the surrounding layer.
#[derive(Debug, Clone)]
pub struct RouterOptions<H> {
    /// Redirect to the path with (or without) a trailing slash when only that
    /// variant is registered. 301 for GET, 308 otherwise.
    pub redirect_trailing_slash: bool,

    /// Try to clean and case-fold the request path when nothing matched,
    /// redirecting if the fixed path has a handle.
    pub redirect_fixed_path: bool,

    /// Answer with 405 when another method has a handle for the path.
    pub handle_method_not_allowed: bool,

    /// Answer OPTIONS requests automatically unless a handle is registered.
    pub handle_options: bool,

    /// Record the registered pattern of routes added while this is enabled
    /// and report it as a parameter on lookup.
    pub save_matched_route_path: bool,

    /// Called for automatic OPTIONS replies.
    pub global_options: Option<H>,

    /// Cached value of the globally allowed methods.
    pub global_allowed: Option<String>,

    /// Called when no route matches.
    pub not_found: Option<H>,

    /// Called when the path matches under other methods only.
    pub method_not_allowed: Option<H>,

    /// Called when a handler panics.
    pub panic_handler: Option<H>,
}

impl<H> Default for RouterOptions<H> {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            handle_options: true,
            save_matched_route_path: false,
            global_options: None,
            global_allowed: None,
            not_found: None,
            method_not_allowed: None,
            panic_handler: None,
        }
    }
}

impl<H> RouterOptions<H> {
    /// Creates options with every policy at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `redirect_trailing_slash`.
    #[must_use]
    pub fn redirect_trailing_slash(mut self, enabled: bool) -> Self {
        self.redirect_trailing_slash = enabled;
        self
    }

    /// Sets `redirect_fixed_path`.
    #[must_use]
    pub fn redirect_fixed_path(mut self, enabled: bool) -> Self {
        self.redirect_fixed_path = enabled;
        self
    }

    /// Sets `handle_method_not_allowed`.
    #[must_use]
    pub fn handle_method_not_allowed(mut self, enabled: bool) -> Self {
        self.handle_method_not_allowed = enabled;
        self
    }

    /// Sets `handle_options`.
    #[must_use]
    pub fn handle_options(mut self, enabled: bool) -> Self {
        self.handle_options = enabled;
        self
    }

    /// Sets `save_matched_route_path`.
    #[must_use]
    pub fn save_matched_route_path(mut self, enabled: bool) -> Self {
        self.save_matched_route_path = enabled;
        self
    }

    /// Sets the not-found fallback.
    #[must_use]
    pub fn not_found(mut self, handle: H) -> Self {
        self.not_found = Some(handle);
        self
    }

    /// Sets the method-not-allowed fallback.
    #[must_use]
    pub fn method_not_allowed(mut self, handle: H) -> Self {
        self.method_not_allowed = Some(handle);
        self
    }

    /// Sets the handler for automatic OPTIONS replies.
    #[must_use]
    pub fn global_options(mut self, handle: H) -> Self {
        self.global_options = Some(handle);
        self
    }

    /// Sets the panic handler.
    #[must_use]
    pub fn panic_handler(mut self, handle: H) -> Self {
        self.panic_handler = Some(handle);
        self
    }
}
