//! Context pooling.
//!
//! Dispatch reuses [`Context`] values across non-overlapping requests to
//! avoid reallocating their capture, chain, and data storage each time. The
//! pool hands out contexts through an RAII guard; dropping the guard resets
//! the context completely and returns it to the free list, so a pooled
//! context never leaks state from a previous request.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use crate::context::Context;

/// A free list of reset [`Context`] values.
///
/// `acquire` pops an idle context or creates a fresh one; the returned guard
/// gives exclusive access for the duration of one request.
pub struct ContextPool<T> {
    idle: Mutex<Vec<Context<T>>>,
}

impl<T> ContextPool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Takes a context out of the pool, creating one if none is idle.
    pub fn acquire(&self) -> PooledContext<'_, T> {
        let ctx = self.idle.lock().pop().unwrap_or_default();
        PooledContext {
            pool: self,
            ctx: Some(ctx),
        }
    }

    /// Number of idle contexts currently held.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, mut ctx: Context<T>) {
        ctx.reset();
        self.idle.lock().push(ctx);
    }
}

impl<T> Default for ContextPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to a pooled [`Context`] for one request.
///
/// Dropping the guard resets the context and returns it to the pool.
pub struct PooledContext<'a, T> {
    pool: &'a ContextPool<T>,
    ctx: Option<Context<T>>,
}

impl<T> Deref for PooledContext<'_, T> {
    type Target = Context<T>;

    fn deref(&self) -> &Self::Target {
        // The slot is only emptied in drop.
        self.ctx.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<T> DerefMut for PooledContext<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<T> Drop for PooledContext<'_, T> {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            self.pool.release(ctx);
        }
    }
}
