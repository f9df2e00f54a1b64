//! Route registration errors.
//!
//! Every variant is a configuration-time failure raised while building the
//! route table. Lookups never fail.

use thiserror::Error;

/// Errors returned when a route cannot be registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The registered path does not start with `/`.
    #[error("path must start with '/' in path '{full_path}'")]
    NoLeadingSlash {
        /// The rejected path.
        full_path: String,
    },

    /// The same literal path was registered twice for one method.
    #[error("a handle is already registered for path '{full_path}'")]
    HandleAlreadyRegistered {
        /// The duplicated path.
        full_path: String,
    },

    /// A wildcard segment collides with an existing, different wildcard.
    #[error(
        "'{segment}' in new path '{full_path}' conflicts with existing wildcard '{existing}' \
         in existing prefix '{prefix}'"
    )]
    WildcardConflict {
        /// The conflicting segment of the new path.
        segment: String,
        /// The new path.
        full_path: String,
        /// The wildcard already stored in the tree.
        existing: String,
        /// The registered prefix that ends in `existing`.
        prefix: String,
    },

    /// A path segment contains more than one `:`/`*` marker.
    #[error("only one wildcard per path segment is allowed, has: '{wildcard}' in path '{full_path}'")]
    MultipleWildcardInSegment {
        /// The offending segment.
        wildcard: String,
        /// The rejected path.
        full_path: String,
    },

    /// A `:` or `*` marker is not followed by a name.
    #[error("wildcards must be named with a non-empty name in path '{full_path}'")]
    EmptyNameWildcard {
        /// The rejected path.
        full_path: String,
    },

    /// A wildcard would shadow static children that already exist.
    #[error("wildcard segment '{wildcard}' conflicts with existing children in path '{full_path}'")]
    WildcardChildConflict {
        /// The wildcard being inserted.
        wildcard: String,
        /// The rejected path.
        full_path: String,
    },

    /// A catch-all segment is not the last segment of the path.
    #[error("catch-all routes are only allowed at the end of the path in path '{full_path}'")]
    InvalidCatchallPosition {
        /// The rejected path.
        full_path: String,
    },

    /// A catch-all collides with a handle at the root of its segment.
    #[error("catch-all conflicts with existing handle for the path segment root in path '{full_path}'")]
    CatchallConflict {
        /// The rejected path.
        full_path: String,
    },

    /// A catch-all is not directly preceded by `/`.
    #[error("no / before catch-all in path '{full_path}'")]
    SlashBeforeCatchall {
        /// The rejected path.
        full_path: String,
    },
}

impl RouteError {
    /// Returns the full path of the registration that failed.
    #[must_use]
    pub fn full_path(&self) -> &str {
        match self {
            Self::NoLeadingSlash { full_path }
            | Self::HandleAlreadyRegistered { full_path }
            | Self::WildcardConflict { full_path, .. }
            | Self::MultipleWildcardInSegment { full_path, .. }
            | Self::EmptyNameWildcard { full_path }
            | Self::WildcardChildConflict { full_path, .. }
            | Self::InvalidCatchallPosition { full_path }
            | Self::CatchallConflict { full_path }
            | Self::SlashBeforeCatchall { full_path } => full_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_conflict_message() {
        let err = RouteError::WildcardConflict {
            segment: ":name".to_string(),
            full_path: "/user/:name".to_string(),
            existing: ":id".to_string(),
            prefix: "/user/:id".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("':name' in new path '/user/:name'"));
        assert!(msg.contains("existing wildcard ':id'"));
        assert!(msg.contains("existing prefix '/user/:id'"));
    }

    #[test]
    fn test_full_path_accessor() {
        let err = RouteError::SlashBeforeCatchall {
            full_path: "/src*all".to_string(),
        };
        assert_eq!(err.full_path(), "/src*all");
        assert_eq!(err.to_string(), "no / before catch-all in path '/src*all'");
    }

    #[test]
    fn test_handle_already_registered_message() {
        let err = RouteError::HandleAlreadyRegistered {
            full_path: "/users".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "a handle is already registered for path '/users'"
        );
    }
}
