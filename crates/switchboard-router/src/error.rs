//! Registration-time error types.
//!
//! Matching never fails structurally; the trie is validated when routes are
//! added, so every error in this module is returned synchronously from the
//! registration API. A miss at match time is an ordinary `None`, not an error.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`RouteError`].
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors returned when registering a route.
///
/// A failed registration leaves the trie exactly as it was: conflicts are
/// detected by a read-only pass before any node is created or split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern would place a segment where an incompatible segment kind
    /// is already registered.
    #[error("pattern {pattern:?} conflicts with an existing route: {reason}")]
    Conflict {
        /// The normalized pattern that was rejected.
        pattern: String,
        /// What the pattern collided with.
        reason: ConflictReason,
    },

    /// The pattern itself is malformed.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The normalized pattern that was rejected.
        pattern: String,
        /// Why the pattern was rejected.
        reason: &'static str,
    },

    /// Registration was attempted under a method the table has no slot for.
    ///
    /// Matching an unrecognized method is simply a miss; registering under
    /// one is reported so the route is not silently dropped.
    #[error("no route table for method {method}")]
    UnsupportedMethod {
        /// The offending method.
        method: http::Method,
    },
}

/// The specific structural collision behind a [`RouteError::Conflict`].
///
/// A position in the path space is either fixed-text branching, a single
/// parameter slot, or a trailing wildcard; these variants name the pairing
/// that was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// A literal segment would land where a parameter is registered.
    StaticOverParam,
    /// A literal segment would land where a wildcard is registered.
    StaticOverWildcard,
    /// A parameter would land beside an existing literal child.
    ParamOverStatic {
        /// Prefix of the literal child already at that position.
        existing: String,
    },
    /// A parameter would land where a wildcard is registered.
    ParamOverWildcard,
    /// A wildcard would land beside an existing literal child.
    WildcardOverStatic {
        /// Prefix of the literal child already at that position.
        existing: String,
    },
    /// A wildcard would land where a parameter is registered.
    WildcardOverParam,
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticOverParam => write!(f, "a parameter is registered at this position"),
            Self::StaticOverWildcard => write!(f, "a wildcard is registered at this position"),
            Self::ParamOverStatic { existing } => {
                write!(f, "literal {existing:?} is registered at this position")
            }
            Self::ParamOverWildcard => {
                write!(f, "a wildcard is registered at this position")
            }
            Self::WildcardOverStatic { existing } => {
                write!(f, "literal {existing:?} is registered at this position")
            }
            Self::WildcardOverParam => {
                write!(f, "a parameter is registered at this position")
            }
        }
    }
}
