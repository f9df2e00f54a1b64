//! Copy-on-write router publication.
//!
//! Trees are not safe to mutate while requests are being looked up. To
//! change the route table while serving, build a new [`Router`] and publish
//! it atomically; readers keep whichever snapshot they loaded.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::error::RouteError;
use crate::router::Router;

/// A router that can be replaced while other threads look routes up.
///
/// Reads are lock-free. Writers are serialized so that two concurrent
/// [`SharedRouter::update`] calls cannot lose each other's routes.
///
/// # Example
///
/// ```rust
/// use arbor_router::{Router, SharedRouter};
///
/// let shared = SharedRouter::new(Router::new());
///
/// shared
///     .update(|router| {
///         router.get("/users", "listUsers")?;
///         router.get("/users/:id", "getUser")?;
///         Ok(())
///     })
///     .unwrap();
///
/// let snapshot = shared.load();
/// let found = snapshot.lookup("GET", "/users/42").unwrap();
/// assert_eq!(found.params.get("id"), Some("42"));
/// ```
pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
    write_lock: Mutex<()>,
}

impl<H> SharedRouter<H> {
    /// Publishes `router` as the initial snapshot.
    #[must_use]
    pub fn new(router: Router<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Replaces the published router.
    pub fn store(&self, router: Router<H>) {
        let _guard = self.write_lock.lock();
        let routes = router.len();
        self.current.store(Arc::new(router));
        tracing::info!(routes, "Published router snapshot");
    }
}

impl<H: Clone> SharedRouter<H> {
    /// Applies `f` to a copy of the current router and publishes the copy.
    ///
    /// If `f` fails nothing is published and the current snapshot stays in
    /// place, so a batch of registrations is applied all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteError`] produced by `f`.
    pub fn update<F>(&self, f: F) -> Result<(), RouteError>
    where
        F: FnOnce(&mut Router<H>) -> Result<(), RouteError>,
    {
        let _guard = self.write_lock.lock();

        let mut next = Router::clone(&self.current.load());
        f(&mut next)?;

        let routes = next.len();
        self.current.store(Arc::new(next));
        tracing::info!(routes, "Published router snapshot");
        Ok(())
    }
}

impl<H> From<Router<H>> for SharedRouter<H> {
    fn from(router: Router<H>) -> Self {
        Self::new(router)
    }
}

impl<H: std::fmt::Debug> std::fmt::Debug for SharedRouter<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRouter")
            .field("current", &self.current.load_full())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_update_publishes() {
        let shared = SharedRouter::new(Router::new());
        let before = shared.load();

        shared
            .update(|router| {
                router.get("/users", "listUsers")?;
                Ok(())
            })
            .unwrap();

        assert!(before.lookup("GET", "/users").is_none());
        assert_eq!(
            shared.load().lookup("GET", "/users").unwrap().handle,
            Some(&"listUsers")
        );
    }

    #[test]
    fn test_failed_update_is_discarded() {
        let mut initial = Router::new();
        initial.get("/users/:id", "getUser").unwrap();
        let shared = SharedRouter::new(initial);

        let err = shared
            .update(|router| {
                router.get("/posts", "listPosts")?;
                router.get("/users/:name", "conflict")?;
                Ok(())
            })
            .unwrap_err();

        assert!(matches!(err, RouteError::WildcardConflict { .. }));

        let snapshot = shared.load();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.lookup("GET", "/posts").unwrap().handle.is_none());
        assert_eq!(
            snapshot.lookup("GET", "/users/7").unwrap().handle,
            Some(&"getUser")
        );
    }

    #[test]
    fn test_store_replaces() {
        let shared: SharedRouter<&str> = Router::new().into();
        let mut next = Router::new();
        next.post("/items", "createItem").unwrap();

        shared.store(next);
        assert_eq!(shared.load().methods(), vec!["POST"]);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let shared = Arc::new(SharedRouter::new(Router::new()));

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    shared
                        .update(|router| {
                            router.get(&format!("/worker{i}"), i)?;
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        let snapshot = shared.load();
        assert_eq!(snapshot.len(), 8);
        for i in 0..8 {
            let found = snapshot.lookup("GET", &format!("/worker{i}")).unwrap();
            assert_eq!(found.handle, Some(&i));
        }
    }
}
