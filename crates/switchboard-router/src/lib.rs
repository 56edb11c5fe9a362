//! Prefix-compressed routing trie for Switchboard.
//!
//! This crate maps an HTTP method and URL path to a registered handler chain
//! using a byte-level radix tree (compressed trie). Lookup is O(k) in the
//! path length, allocation-light, and lock-free once registration is done.
//!
//! # Features
//!
//! - **Prefix compression**: nodes hold the longest shared fragment and are
//!   split on demand as routes are registered
//! - **Positional captures**: `:` takes one path segment, `*` takes the whole
//!   remainder, values come back in pattern order
//! - **Per-method roots**: nine independent tries, one per standard HTTP
//!   method, so path spaces never interfere
//! - **Atomic registration**: conflicts are detected by a read-only pass, so
//!   a rejected route never leaves the trie half-split
//!
//! # Example
//!
//! ```rust
//! use switchboard_router::Router;
//! use http::Method;
//!
//! let mut router = Router::new();
//! router.get("/users", vec!["listUsers"]).unwrap();
//! router.get("/users/:", vec!["getUser"]).unwrap();
//! router.get("/assets/*", vec!["serveAsset"]).unwrap();
//!
//! let m = router.match_route(&Method::GET, "/assets/css/app.css").unwrap();
//! assert_eq!(m.handlers, &["serveAsset"]);
//! assert_eq!(m.params.get(0), Some("css/app.css"));
//! ```
//!
//! # Architecture
//!
//! Registering `/users`, `/users/:` and `/assets/*` under GET builds:
//!
//! ```text
//!            "/"
//!         ┌───┴────────┐
//!      "users"      "assets/"
//!      [chain]          │
//!         │           (*)  [chain]
//!        "/"
//!         │
//!        (:)  [chain]
//! ```
//!
//! The trie is built single-threaded during configuration and then frozen;
//! matching takes `&self` and is safe for unbounded concurrent callers.

mod error;
mod method;
mod node;
mod params;
mod pattern;
mod router;

pub use error::{ConflictReason, RouteError, RouteResult};
pub use params::Params;
pub use router::Router;

/// A matched route: the registered handler chain and the ordered captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'r, 'p, H> {
    /// The handler chain registered for the matched pattern, in order.
    pub handlers: &'r [H],
    /// Parameter values captured from the path, in pattern order.
    pub params: Params<'p>,
}
