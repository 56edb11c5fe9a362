//! Handler traits for chain execution.
//!
//! A handler is an opaque callable unit taking the per-request [`Context`].
//! Chains are ordered sequences of type-erased handlers; each handler may let
//! the chain continue, drive the remainder itself via [`Context::next`], or
//! stop it with [`Context::abort`].

use std::sync::Arc;

use crate::context::Context;

/// A single callable unit in a handler chain.
///
/// `T` is the caller-defined payload carried in the context's data slot.
/// Implemented for any compatible closure, so plain functions and captures
/// both work:
///
/// ```rust
/// use switchboard_core::{handle_fn, Context, HandleFunc};
///
/// let greet: HandleFunc<String> = handle_fn(|ctx: &mut Context<String>| {
///     ctx.set_data("hello".to_string());
/// });
/// ```
pub trait Handle<T>: Send + Sync {
    /// Processes the request represented by `ctx`.
    fn call(&self, ctx: &mut Context<T>);
}

impl<T, F> Handle<T> for F
where
    F: Fn(&mut Context<T>) + Send + Sync,
{
    fn call(&self, ctx: &mut Context<T>) {
        self(ctx);
    }
}

/// A type-erased, shareable handler.
///
/// Chains are stored as `Vec<HandleFunc<T>>`; cloning a handler is an `Arc`
/// bump, so the same unit can appear in many chains.
pub type HandleFunc<T> = Arc<dyn Handle<T>>;

/// Wraps a closure into a [`HandleFunc`].
pub fn handle_fn<T, F>(f: F) -> HandleFunc<T>
where
    F: Fn(&mut Context<T>) + Send + Sync + 'static,
{
    Arc::new(f)
}
