//! Handler chains, request contexts, and dispatch on top of
//! [`switchboard-router`](switchboard_router).
//!
//! The router crate answers "which chain handles this method and path"; this
//! crate runs the answer. A [`Dispatcher`] owns the router plus the chains
//! around it (interceptors, not-found), and executes matched chains through
//! pooled [`Context`] values that carry captured parameters, a cursor over
//! the chain, and a typed data slot.
//!
//! ## Example
//!
//! ```rust
//! use switchboard_core::{handle_fn, Context, Dispatcher};
//! use http::Method;
//!
//! let mut app: Dispatcher<Vec<String>> = Dispatcher::new();
//! app.intercept(vec![handle_fn(|ctx: &mut Context<Vec<String>>| {
//!     if let Some(log) = ctx.data_mut().as_mut() {
//!         log.push("intercepted".into());
//!     }
//! })]);
//! app.get("/users/:", vec![handle_fn(|ctx: &mut Context<Vec<String>>| {
//!     let id = ctx.param(0).unwrap_or("").to_string();
//!     if let Some(log) = ctx.data_mut().as_mut() {
//!         log.push(format!("user {id}"));
//!     }
//! })]).unwrap();
//!
//! let log = app
//!     .dispatch_with(&Method::GET, "/users/42", Vec::new())
//!     .unwrap();
//! assert_eq!(log, ["intercepted", "user 42"]);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! dispatch(method, path)
//!     │
//!     ▼
//! ContextPool ──acquire──▶ Context ◀─load── Router::match_route
//!     ▲                      │
//!     └──────reset/drop──────┘ run(): chain[0], chain[1], ...
//! ```

pub mod context;
pub mod dispatch;
pub mod handler;
pub mod pool;

pub use context::Context;
pub use dispatch::{Dispatcher, Scope};
pub use handler::{handle_fn, Handle, HandleFunc};
pub use pool::{ContextPool, PooledContext};

pub use switchboard_router::{ConflictReason, Params, RouteError, RouteMatch, RouteResult, Router};
