//! Read-only route lookup.
//!
//! [`Node::get_value`] walks the tree once, left to right over the request
//! path, and never backtracks. Besides the matched handle it reports whether
//! the same path with a trailing slash added or removed would have matched.

use crate::node::{lossy, Node, NodeKind};
use crate::params::Params;

/// The outcome of walking a tree for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<'a, T> {
    /// The matched handle, if any.
    pub handle: Option<&'a T>,
    /// Parameters captured along the walk, in path order. May be non-empty
    /// even when no handle matched.
    pub params: Params,
    /// Trailing-slash redirect hint: retrying with the trailing slash added
    /// or removed would find a handle.
    pub tsr: bool,
}

impl<'a, T> Lookup<'a, T> {
    fn miss(params: Params, tsr: bool) -> Self {
        Self {
            handle: None,
            params,
            tsr,
        }
    }

    fn hit(handle: &'a T, params: Params) -> Self {
        Self {
            handle: Some(handle),
            params,
            tsr: false,
        }
    }

    /// Returns true if a handle matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.handle.is_some()
    }
}

impl<T> Node<T> {
    /// Looks up the handle registered for `path`.
    ///
    /// # Panics
    ///
    /// Panics if the wildcard child of a node is neither a param nor a
    /// catch-all node, which cannot happen for trees built with
    /// [`Node::add_route`].
    #[must_use]
    pub fn get_value(&self, path: &str) -> Lookup<'_, T> {
        let mut path = path.as_bytes();
        let mut params = Params::new();
        let mut n = self;

        loop {
            let prefix = n.path.as_slice();

            if path.len() > prefix.len() {
                if path.starts_with(prefix) {
                    path = &path[prefix.len()..];

                    if !n.wild_child {
                        let idxc = path[0];
                        if let Some(i) = n.indices.iter().position(|&c| c == idxc) {
                            n = &n.children[i];
                            continue;
                        }

                        // a leaf exists for the path without the trailing slash
                        let tsr = path == b"/" && n.handle.is_some();
                        return Lookup::miss(params, tsr);
                    }

                    n = &n.children[0];
                    match n.kind {
                        NodeKind::Param => {
                            let end = path.iter().position(|&c| c == b'/').unwrap_or(path.len());
                            params.push(lossy(&n.path[1..]), lossy(&path[..end]));

                            if end < path.len() {
                                if let Some(child) = n.children.first() {
                                    path = &path[end..];
                                    n = child;
                                    continue;
                                }

                                return Lookup::miss(params, path.len() == end + 1);
                            }

                            if let Some(handle) = n.handle.as_ref() {
                                return Lookup::hit(handle, params);
                            }

                            let tsr = n.children.len() == 1 && {
                                let child = &n.children[0];
                                (child.path == b"/" && child.handle.is_some())
                                    || (child.path.is_empty() && child.indices == b"/")
                            };
                            return Lookup::miss(params, tsr);
                        }
                        NodeKind::CatchAll => {
                            // leaf path is "/*name"
                            params.push(lossy(&n.path[2..]), lossy(path));
                            return Lookup {
                                handle: n.handle.as_ref(),
                                params,
                                tsr: false,
                            };
                        }
                        NodeKind::Static | NodeKind::Root => unreachable!("invalid node type"),
                    }
                }
            } else if path == prefix {
                if let Some(handle) = n.handle.as_ref() {
                    return Lookup::hit(handle, params);
                }

                // a wildcard child means a handle exists one level down
                // with a trailing slash
                if path == b"/" && n.wild_child && n.kind != NodeKind::Root {
                    return Lookup::miss(params, true);
                }

                if let Some(i) = n.indices.iter().position(|&c| c == b'/') {
                    let child = &n.children[i];
                    let catch_all_leaf = child.kind == NodeKind::CatchAll
                        && child.children.first().is_some_and(|leaf| leaf.handle.is_some());
                    let tsr = (child.path.len() == 1 && child.handle.is_some()) || catch_all_leaf;
                    return Lookup::miss(params, tsr);
                }

                return Lookup::miss(params, false);
            }

            // Nothing found. Recommend adding a trailing slash if a leaf
            // exists for that path.
            let tsr = path == b"/"
                || (prefix.len() == path.len() + 1
                    && prefix[path.len()] == b'/'
                    && path == &prefix[..path.len()]
                    && n.handle.is_some());
            return Lookup::miss(params, tsr);
        }
    }
}
