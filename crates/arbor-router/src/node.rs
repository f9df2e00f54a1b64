//! Radix tree node and route insertion.
//!
//! This module provides the compressed trie that backs each per-method route
//! table. Insertion splits edges on the longest common prefix, materializes
//! `:param` and `*catchall` segments and keeps siblings ordered by priority.
//! Lookup lives in [`crate::lookup`].
//!
//! Paths are handled as bytes: two routes such as `/α` and `/β` share the
//! first byte of their UTF-8 encoding, so an edge split can fall inside a
//! multi-byte character.

use std::mem;

use crate::error::RouteError;

/// Kind of a node in the radix tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Literal path fragment.
    #[default]
    Static,
    /// Root of a method tree.
    Root,
    /// Named parameter (`:name`), matches one segment.
    Param,
    /// Catch-all (`*name`), matches the rest of the path.
    CatchAll,
}

/// A node in the radix tree.
///
/// Concatenating [`Node::path`] from the root down to any node yields a
/// prefix of every route registered below it. Static children are addressed
/// by the first byte of their path through `indices`; a node either has a
/// single wildcard child or only static children.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) path: Vec<u8>,
    pub(crate) wild_child: bool,
    pub(crate) kind: NodeKind,
    pub(crate) indices: Vec<u8>,
    pub(crate) children: Vec<Node<T>>,
    pub(crate) handle: Option<T>,
    pub(crate) priority: u32,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Creates an empty node, ready to act as the root of a new tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind(Vec::new(), NodeKind::Static)
    }

    fn with_kind(path: Vec<u8>, kind: NodeKind) -> Self {
        Self {
            path,
            wild_child: false,
            kind,
            indices: Vec::new(),
            children: Vec::new(),
            handle: None,
            priority: 0,
        }
    }

    /// The compressed path fragment held by this node.
    #[must_use]
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// The node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// First bytes of the static children, parallel to [`Node::children`].
    #[must_use]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Child nodes in priority order.
    #[must_use]
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Whether the only child is a param or catch-all node.
    #[must_use]
    pub fn wild_child(&self) -> bool {
        self.wild_child
    }

    /// The handle stored on this node, if a route terminates here.
    #[must_use]
    pub fn handle(&self) -> Option<&T> {
        self.handle.as_ref()
    }

    /// Number of routes passing through this node.
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Bumps the priority of the child at `pos` and moves it towards the
    /// front past every sibling with a strictly lower priority.
    ///
    /// Returns the new position of the child.
    fn increment_child_prio(&mut self, pos: usize) -> usize {
        self.children[pos].priority += 1;
        let prio = self.children[pos].priority;

        let mut new_pos = pos;
        while new_pos > 0 && self.children[new_pos - 1].priority < prio {
            self.children.swap(new_pos - 1, new_pos);
            new_pos -= 1;
        }

        // keep indices paired with children
        if new_pos != pos {
            self.indices[new_pos..=pos].rotate_right(1);
        }

        new_pos
    }

    /// Registers `handle` for `path`.
    ///
    /// The walk is iterative so stack usage does not depend on the depth of
    /// the tree. On error the tree may already have been partially modified.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when the path is malformed or conflicts with
    /// a route that is already registered.
    pub fn add_route(&mut self, path: &str, handle: T) -> Result<(), RouteError> {
        let full_path = path;
        let mut path = path.as_bytes();
        self.priority += 1;

        if self.path.is_empty() && self.indices.is_empty() {
            self.insert_child(path, full_path, handle)?;
            self.kind = NodeKind::Root;
            return Ok(());
        }

        let mut n = self;

        loop {
            // The common prefix never contains ':' or '*' since stored
            // static fragments cannot hold them.
            let i = longest_common_prefix(path, &n.path);

            // Split edge
            if i < n.path.len() {
                let child = Node {
                    path: n.path[i..].to_vec(),
                    wild_child: n.wild_child,
                    kind: NodeKind::Static,
                    indices: mem::take(&mut n.indices),
                    children: mem::take(&mut n.children),
                    handle: n.handle.take(),
                    priority: n.priority.saturating_sub(1),
                };

                n.indices = vec![n.path[i]];
                n.path.truncate(i);
                n.children = vec![child];
                n.wild_child = false;
            }

            if i < path.len() {
                path = &path[i..];

                if n.wild_child {
                    n = &mut n.children[0];
                    n.priority += 1;

                    let len = n.path.len();
                    if path.len() >= len
                        && n.path[..] == path[..len]
                        && n.kind != NodeKind::CatchAll
                        && (len >= path.len() || path[len] == b'/')
                    {
                        continue;
                    }

                    if n.kind == NodeKind::CatchAll
                        && path == n.path.as_slice()
                        && n.handle.is_some()
                    {
                        return Err(RouteError::HandleAlreadyRegistered {
                            full_path: full_path.to_string(),
                        });
                    }

                    let segment = if n.kind == NodeKind::CatchAll {
                        path
                    } else {
                        path.iter()
                            .position(|&c| c == b'/')
                            .map_or(path, |end| &path[..end])
                    };
                    let consumed = full_path.len() - path.len();
                    let mut prefix = full_path.as_bytes()[..consumed].to_vec();
                    prefix.extend_from_slice(&n.path);

                    return Err(RouteError::WildcardConflict {
                        segment: lossy(segment),
                        full_path: full_path.to_string(),
                        existing: lossy(&n.path),
                        prefix: lossy(&prefix),
                    });
                }

                let idxc = path[0];

                // '/' after param
                if n.kind == NodeKind::Param && idxc == b'/' && n.children.len() == 1 {
                    n = &mut n.children[0];
                    n.priority += 1;
                    continue;
                }

                if let Some(pos) = n.indices.iter().position(|&c| c == idxc) {
                    let pos = n.increment_child_prio(pos);
                    n = &mut n.children[pos];
                    continue;
                }

                if idxc != b':' && idxc != b'*' {
                    n.indices.push(idxc);
                    n.children.push(Node::new());
                    let last = n.indices.len() - 1;
                    let pos = n.increment_child_prio(last);
                    n = &mut n.children[pos];
                }

                return n.insert_child(path, full_path, handle);
            }

            if n.handle.is_some() {
                return Err(RouteError::HandleAlreadyRegistered {
                    full_path: full_path.to_string(),
                });
            }
            n.handle = Some(handle);
            return Ok(());
        }
    }

    /// Stores the remaining `path` below this node, creating param and
    /// catch-all nodes for every wildcard it contains.
    fn insert_child(
        &mut self,
        mut path: &[u8],
        full_path: &str,
        handle: T,
    ) -> Result<(), RouteError> {
        let mut n = self;

        while let Some(wildcard) = find_wildcard(path) {
            if !wildcard.valid {
                return Err(RouteError::MultipleWildcardInSegment {
                    wildcard: lossy(wildcard.name),
                    full_path: full_path.to_string(),
                });
            }

            if wildcard.name.len() < 2 {
                return Err(RouteError::EmptyNameWildcard {
                    full_path: full_path.to_string(),
                });
            }

            // existing children would become unreachable
            if !n.children.is_empty() {
                return Err(RouteError::WildcardChildConflict {
                    wildcard: lossy(wildcard.name),
                    full_path: full_path.to_string(),
                });
            }

            let start = wildcard.start;

            if wildcard.name[0] == b':' {
                if start > 0 {
                    n.path = path[..start].to_vec();
                    path = &path[start..];
                }

                n.wild_child = true;
                n.children = vec![Node::with_kind(wildcard.name.to_vec(), NodeKind::Param)];
                n = &mut n.children[0];
                n.priority += 1;

                // a static subpath starting with '/' follows the param
                if wildcard.name.len() < path.len() {
                    path = &path[wildcard.name.len()..];
                    let mut child = Node::new();
                    child.priority = 1;
                    n.children = vec![child];
                    n = &mut n.children[0];
                    continue;
                }

                n.handle = Some(handle);
                return Ok(());
            }

            if start + wildcard.name.len() != path.len() {
                return Err(RouteError::InvalidCatchallPosition {
                    full_path: full_path.to_string(),
                });
            }

            if n.path.last() == Some(&b'/') {
                return Err(RouteError::CatchallConflict {
                    full_path: full_path.to_string(),
                });
            }

            if start == 0 || path[start - 1] != b'/' {
                return Err(RouteError::SlashBeforeCatchall {
                    full_path: full_path.to_string(),
                });
            }

            let slash = start - 1;
            n.path = path[..slash].to_vec();

            let mut leaf = Node::with_kind(path[slash..].to_vec(), NodeKind::CatchAll);
            leaf.handle = Some(handle);
            leaf.priority = 1;

            let mut anchor = Node::with_kind(Vec::new(), NodeKind::CatchAll);
            anchor.wild_child = true;
            anchor.priority = 1;
            anchor.children = vec![leaf];

            n.children = vec![anchor];
            n.indices = vec![b'/'];
            return Ok(());
        }

        n.path = path.to_vec();
        n.handle = Some(handle);
        Ok(())
    }

    /// Verifies the structural invariants of the subtree rooted here.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut stack = vec![self];

        while let Some(n) = stack.pop() {
            let here = lossy(&n.path);

            if n.wild_child {
                let wild = n.children.first().map(|c| c.kind);
                if n.children.len() != 1
                    || !matches!(wild, Some(NodeKind::Param | NodeKind::CatchAll))
                {
                    return Err(format!("node '{here}' has a wildcard child and other children"));
                }
            } else if n.kind != NodeKind::Param || !n.indices.is_empty() {
                if n.indices.len() != n.children.len() {
                    return Err(format!("node '{here}' has indices out of step with children"));
                }
                for (idx, child) in n.indices.iter().zip(&n.children) {
                    let first = child.path.first().copied().unwrap_or(b'/');
                    if first != *idx {
                        return Err(format!("node '{here}' indexes a child under the wrong byte"));
                    }
                }
                if n.children.windows(2).any(|w| w[0].priority < w[1].priority) {
                    return Err(format!("children of '{here}' are not ordered by priority"));
                }
            }

            stack.extend(n.children.iter());
        }

        Ok(())
    }
}

/// A `:name` or `*name` token found in a path.
struct Wildcard<'a> {
    name: &'a [u8],
    start: usize,
    valid: bool,
}

/// Finds the first wildcard token and checks it for a second marker.
fn find_wildcard(path: &[u8]) -> Option<Wildcard<'_>> {
    let start = path.iter().position(|&c| c == b':' || c == b'*')?;

    let mut valid = true;
    for (end, &c) in path[start + 1..].iter().enumerate() {
        match c {
            b'/' => {
                return Some(Wildcard {
                    name: &path[start..start + 1 + end],
                    start,
                    valid,
                })
            }
            b':' | b'*' => valid = false,
            _ => {}
        }
    }

    Some(Wildcard {
        name: &path[start..],
        start,
        valid,
    })
}

fn longest_common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
