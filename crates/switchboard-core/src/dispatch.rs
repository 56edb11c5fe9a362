//! Route registration and request dispatch.
//!
//! [`Dispatcher`] glues the routing trie to chain execution: it owns the
//! router, the interceptor handlers prepended to every subsequently
//! registered chain, the not-found chain, and a context pool. Registration is
//! configuration-phase only; once serving starts, `dispatch` takes `&self`
//! and is safe for concurrent callers.

use http::Method;
use switchboard_router::{RouteResult, Router};

use crate::handler::HandleFunc;
use crate::pool::ContextPool;

/// Routes requests to handler chains and runs them.
///
/// # Example
///
/// ```rust
/// use switchboard_core::{handle_fn, Context, Dispatcher};
/// use http::Method;
///
/// let mut app: Dispatcher<String> = Dispatcher::new();
/// app.get("/hello/:", vec![handle_fn(|ctx: &mut Context<String>| {
///     let name = ctx.param(0).unwrap_or("world").to_string();
///     ctx.set_data(format!("hello {name}"));
/// })]).unwrap();
///
/// let reply = app.dispatch_with(&Method::GET, "/hello/ada", String::new());
/// assert_eq!(reply.as_deref(), Some("hello ada"));
/// ```
pub struct Dispatcher<T> {
    router: Router<HandleFunc<T>>,
    intercept: Vec<HandleFunc<T>>,
    not_found: Vec<HandleFunc<T>>,
    pool: ContextPool<T>,
}

impl<T> Dispatcher<T> {
    /// Creates a dispatcher with no routes, no interceptors, and an empty
    /// not-found chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            intercept: Vec::new(),
            not_found: Vec::new(),
            pool: ContextPool::new(),
        }
    }

    /// Sets the interceptor chain.
    ///
    /// Interceptors are prepended to the chain of every route registered
    /// *after* this call; routes registered earlier keep the chain they were
    /// registered with.
    pub fn intercept(&mut self, handlers: Vec<HandleFunc<T>>) {
        self.intercept = handlers;
    }

    /// Sets the chain run when no route matches.
    pub fn not_found(&mut self, handlers: Vec<HandleFunc<T>>) {
        self.not_found = handlers;
    }

    /// Registers a handler chain, with the current interceptors prepended.
    pub fn add(
        &mut self,
        method: &Method,
        pattern: &str,
        handlers: Vec<HandleFunc<T>>,
    ) -> RouteResult<()> {
        let mut chain = self.intercept.clone();
        chain.extend(handlers);
        self.router.add(method, pattern, chain)?;
        tracing::debug!(method = %method, pattern, "route registered");
        Ok(())
    }

    /// Registers a GET route.
    pub fn get(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::GET, pattern, handlers)
    }

    /// Registers a HEAD route.
    pub fn head(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::HEAD, pattern, handlers)
    }

    /// Registers a POST route.
    pub fn post(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::POST, pattern, handlers)
    }

    /// Registers a PUT route.
    pub fn put(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::PUT, pattern, handlers)
    }

    /// Registers a PATCH route.
    pub fn patch(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::PATCH, pattern, handlers)
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::DELETE, pattern, handlers)
    }

    /// Registers a CONNECT route.
    pub fn connect(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::CONNECT, pattern, handlers)
    }

    /// Registers an OPTIONS route.
    pub fn options(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::OPTIONS, pattern, handlers)
    }

    /// Registers a TRACE route.
    pub fn trace(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::TRACE, pattern, handlers)
    }

    /// Returns a registration handle that prefixes every pattern.
    pub fn scope(&mut self, prefix: &str) -> Scope<'_, T> {
        Scope {
            prefix: prefix.to_string(),
            dispatcher: self,
        }
    }

    /// Read access to the underlying router.
    #[must_use]
    pub fn router(&self) -> &Router<HandleFunc<T>> {
        &self.router
    }

    /// Matches and runs the chain for one request.
    ///
    /// Acquires a pooled context, loads it with the matched chain and
    /// captures (or the not-found chain), runs it to completion, and reports
    /// whether a route matched.
    pub fn dispatch(&self, method: &Method, path: &str) -> bool {
        self.run_chain(method, path, None).0
    }

    /// Like [`dispatch`](Self::dispatch), seeding the context's data slot and
    /// returning whatever the chain left in it.
    pub fn dispatch_with(&self, method: &Method, path: &str, data: T) -> Option<T> {
        self.run_chain(method, path, Some(data)).1
    }

    fn run_chain(&self, method: &Method, path: &str, data: Option<T>) -> (bool, Option<T>) {
        let mut ctx = self.pool.acquire();
        let matched = match self.router.match_route(method, path) {
            Some(m) => {
                ctx.begin(m.handlers, &m.params);
                true
            }
            None => {
                tracing::debug!(method = %method, path, "no route matched");
                ctx.begin(&self.not_found, std::iter::empty::<&str>());
                false
            }
        };
        if let Some(data) = data {
            ctx.set_data(data);
        }
        ctx.run();
        (matched, ctx.take_data())
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registers routes under a shared path prefix.
///
/// Patterns are joined to the prefix before normalization, so prefixes and
/// patterns compose regardless of stray separators. Scopes nest.
pub struct Scope<'d, T> {
    prefix: String,
    dispatcher: &'d mut Dispatcher<T>,
}

impl<T> Scope<'_, T> {
    fn join(&self, pattern: &str) -> String {
        format!("{}/{}", self.prefix, pattern)
    }

    /// Registers a handler chain under the scope's prefix.
    pub fn add(
        &mut self,
        method: &Method,
        pattern: &str,
        handlers: Vec<HandleFunc<T>>,
    ) -> RouteResult<()> {
        let joined = self.join(pattern);
        self.dispatcher.add(method, &joined, handlers)
    }

    /// Registers a GET route under the prefix.
    pub fn get(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::GET, pattern, handlers)
    }

    /// Registers a HEAD route under the prefix.
    pub fn head(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::HEAD, pattern, handlers)
    }

    /// Registers a POST route under the prefix.
    pub fn post(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::POST, pattern, handlers)
    }

    /// Registers a PUT route under the prefix.
    pub fn put(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::PUT, pattern, handlers)
    }

    /// Registers a PATCH route under the prefix.
    pub fn patch(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::PATCH, pattern, handlers)
    }

    /// Registers a DELETE route under the prefix.
    pub fn delete(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::DELETE, pattern, handlers)
    }

    /// Registers a CONNECT route under the prefix.
    pub fn connect(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::CONNECT, pattern, handlers)
    }

    /// Registers an OPTIONS route under the prefix.
    pub fn options(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::OPTIONS, pattern, handlers)
    }

    /// Registers a TRACE route under the prefix.
    pub fn trace(&mut self, pattern: &str, handlers: Vec<HandleFunc<T>>) -> RouteResult<()> {
        self.add(&Method::TRACE, pattern, handlers)
    }

    /// Returns a nested scope with the prefixes joined.
    pub fn scope(&mut self, prefix: &str) -> Scope<'_, T> {
        Scope {
            prefix: self.join(prefix),
            dispatcher: &mut *self.dispatcher,
        }
    }
}
