//! High-level router API.
//!
//! [`Router`] is the primary interface: register handler chains against
//! method + pattern during a configuration phase, then match request paths.
//! It is generic over the handler payload `H` so the trie stays agnostic of
//! how the embedding application represents callable units.

use http::Method;

use crate::error::{RouteError, RouteResult};
use crate::method::MethodTable;
use crate::pattern;
use crate::RouteMatch;

/// A prefix-compressed routing trie with one root per HTTP method.
///
/// Routes are registered single-threaded during configuration; once the first
/// request is served the router must be treated as frozen. Matching takes
/// `&self`, never locks, and is safe for unbounded concurrent callers.
///
/// # Example
///
/// ```rust
/// use switchboard_router::Router;
/// use http::Method;
///
/// let mut router = Router::new();
/// router.get("/users", vec!["listUsers"]).unwrap();
/// router.get("/users/:", vec!["getUser"]).unwrap();
/// router.get("/assets/*", vec!["serveAsset"]).unwrap();
///
/// let m = router.match_route(&Method::GET, "/users/42").unwrap();
/// assert_eq!(m.handlers, &["getUser"]);
/// assert_eq!(m.params.get(0), Some("42"));
/// ```
///
/// # Route priority
///
/// At every branch point, literal text wins over a parameter, which wins over
/// a wildcard. Registration rejects patterns that would make a position both
/// fixed text and a capture, so matching never backtracks.
#[derive(Debug, Clone)]
pub struct Router<H> {
    table: MethodTable<H>,
    route_count: usize,
}

impl<H> Router<H> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: MethodTable::new(),
            route_count: 0,
        }
    }

    /// Registers a handler chain for `pattern` under `method`.
    ///
    /// The pattern is normalized first (separators collapsed, `.`/`..`
    /// resolved, leading `/` ensured). `:` marks a single-segment capture and
    /// `*` a trailing capture of everything that remains; either marker may
    /// carry a name (`:id`, `*rest`), which is ignored: captures are
    /// positional.
    ///
    /// Registering the same pattern twice replaces the chain. A conflicting
    /// or malformed pattern is rejected without mutating the trie.
    pub fn add(&mut self, method: &Method, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        let root = self
            .table
            .root_mut(method)
            .ok_or_else(|| RouteError::UnsupportedMethod {
                method: method.clone(),
            })?;
        let normalized = pattern::normalize(pattern);
        let tokens = pattern::tokenize(&normalized)?;
        let replaced = root
            .add_route(&tokens, handlers)
            .map_err(|reason| RouteError::Conflict {
                pattern: normalized,
                reason,
            })?;
        if !replaced {
            self.route_count += 1;
        }
        Ok(())
    }

    /// Registers a GET route.
    pub fn get(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::GET, pattern, handlers)
    }

    /// Registers a HEAD route.
    pub fn head(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::HEAD, pattern, handlers)
    }

    /// Registers a POST route.
    pub fn post(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::POST, pattern, handlers)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::PUT, pattern, handlers)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::PATCH, pattern, handlers)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::DELETE, pattern, handlers)
    }

    /// Registers a CONNECT route.
    pub fn connect(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::CONNECT, pattern, handlers)
    }

    /// Registers an OPTIONS route.
    pub fn options(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::OPTIONS, pattern, handlers)
    }

    /// Registers a TRACE route.
    pub fn trace(&mut self, pattern: &str, handlers: Vec<H>) -> RouteResult<()> {
        self.add(&Method::TRACE, pattern, handlers)
    }

    /// Matches a request path under a method.
    ///
    /// The path is expected to be already normalized by the host layer.
    /// Returns `None` when nothing matches, including for methods outside
    /// the standard nine.
    #[must_use]
    pub fn match_route<'r, 'p>(
        &'r self,
        method: &Method,
        path: &'p str,
    ) -> Option<RouteMatch<'r, 'p, H>> {
        let root = self.table.root(method)?;
        let (handlers, params) = root.match_path(path)?;
        Some(RouteMatch { handlers, params })
    }

    /// Number of distinct routes registered. Overwriting an existing
    /// pattern's chain does not change the count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no routes were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}
