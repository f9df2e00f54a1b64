//! Path parameters captured during lookup.
//!
//! Parameters are kept in the order their wildcard segments appear in the
//! matched path. Storage is a small vector so that the common case of a few
//! parameters does not touch the heap for the container itself.

use smallvec::SmallVec;

/// Maximum number of parameters stored inline (stack allocated).
const INLINE_PARAMS: usize = 4;

/// Key under which the registered route pattern is reported when
/// `save_matched_route_path` was enabled for that route.
pub const MATCHED_ROUTE_PATH_PARAM: &str = "$matchedRoutePath";

/// A single captured `{key, value}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    /// Wildcard name without its `:`/`*` marker.
    pub key: String,
    /// The matched portion of the request path.
    pub value: String,
}

impl Param {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered path parameters from a lookup.
///
/// # Example
///
/// ```rust
/// use arbor_router::Params;
///
/// let mut params = Params::new();
/// params.push("tool", "test");
/// params.push("sub", "3");
///
/// assert_eq!(params.get("tool"), Some("test"));
/// assert_eq!(params.get("sub"), Some("3"));
/// assert_eq!(params.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[Param; INLINE_PARAMS]>,
}

impl Params {
    /// Creates a new empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.push(Param::new(key, value));
    }

    /// Returns the value of the first parameter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// Returns the pattern of the matched route, if it was recorded.
    #[must_use]
    pub fn matched_route_path(&self) -> Option<&str> {
        self.get(MATCHED_ROUTE_PATH_PARAM)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over `(key, value)` pairs in match order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|p| (p.key.as_str(), p.value.as_str()))
    }

    /// Returns the parameters as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Param] {
        &self.inner
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
