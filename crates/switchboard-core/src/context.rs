//! Per-request context and chain cursor.
//!
//! A [`Context`] is owned exclusively by the request being handled: the
//! captured parameter values, a caller-defined data slot passed along the
//! chain, and the cursor over the handler chain itself. Contexts are reused
//! across non-overlapping requests through the pool and fully reset in
//! between.

use crate::handler::HandleFunc;

/// Per-request state threaded through a handler chain.
///
/// `T` is the caller-defined payload type for data handed from one handler to
/// the next, a typed replacement for an "anything" slot.
pub struct Context<T> {
    params: Vec<String>,
    data: Option<T>,
    chain: Vec<HandleFunc<T>>,
    index: usize,
}

impl<T> Context<T> {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            data: None,
            chain: Vec::new(),
            index: 0,
        }
    }

    /// The captured parameter values, in pattern order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The capture at `index`, if any.
    #[must_use]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Borrows the data slot.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Mutably borrows the data slot.
    pub fn data_mut(&mut self) -> &mut Option<T> {
        &mut self.data
    }

    /// Stores a value in the data slot, replacing any previous one.
    pub fn set_data(&mut self, data: T) {
        self.data = Some(data);
    }

    /// Takes the value out of the data slot.
    pub fn take_data(&mut self) -> Option<T> {
        self.data.take()
    }

    /// Runs the remainder of the chain from inside a handler, then returns.
    ///
    /// When the current handler returns afterwards, the outer loop sees the
    /// cursor past the end and finishes; handlers after the caller run
    /// exactly once either way.
    pub fn next(&mut self) {
        self.index += 1;
        self.run();
    }

    /// Stops the chain: no further handler runs.
    pub fn abort(&mut self) {
        self.index = self.chain.len();
    }

    /// Drives the chain from the current cursor to the end.
    pub(crate) fn run(&mut self) {
        while self.index < self.chain.len() {
            let handler = self.chain[self.index].clone();
            handler.call(self);
            self.index += 1;
        }
    }

    /// Loads a chain and captures for one request. The cursor starts at the
    /// first handler.
    pub(crate) fn begin<'p>(
        &mut self,
        chain: &[HandleFunc<T>],
        params: impl IntoIterator<Item = &'p str>,
    ) {
        self.chain.extend(chain.iter().cloned());
        self.params.extend(params.into_iter().map(str::to_string));
    }

    /// Clears all request state, keeping allocated capacity for reuse.
    pub(crate) fn reset(&mut self) {
        self.params.clear();
        self.data = None;
        self.chain.clear();
        self.index = 0;
    }
}

impl<T> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handle_fn;

    fn mark(tag: &'static str) -> HandleFunc<Vec<&'static str>> {
        handle_fn(move |ctx: &mut Context<Vec<&'static str>>| {
            ctx.data_mut().get_or_insert_with(Vec::new).push(tag);
        })
    }

    #[test]
    fn test_chain_runs_in_order() {
        let mut ctx = Context::new();
        ctx.begin(&[mark("a"), mark("b"), mark("c")], std::iter::empty::<&str>());
        ctx.run();
        assert_eq!(ctx.take_data().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_next_runs_remainder_once() {
        let around = handle_fn(|ctx: &mut Context<Vec<&'static str>>| {
            ctx.data_mut().get_or_insert_with(Vec::new).push("pre");
            ctx.next();
            ctx.data_mut().get_or_insert_with(Vec::new).push("post");
        });

        let mut ctx = Context::new();
        ctx.begin(&[around, mark("inner")], std::iter::empty::<&str>());
        ctx.run();
        assert_eq!(ctx.take_data().unwrap(), vec!["pre", "inner", "post"]);
    }

    #[test]
    fn test_abort_stops_chain() {
        let stop = handle_fn(|ctx: &mut Context<Vec<&'static str>>| {
            ctx.data_mut().get_or_insert_with(Vec::new).push("stop");
            ctx.abort();
        });

        let mut ctx = Context::new();
        ctx.begin(&[mark("a"), stop, mark("never")], std::iter::empty::<&str>());
        ctx.run();
        assert_eq!(ctx.take_data().unwrap(), vec!["a", "stop"]);
    }

    #[test]
    fn test_params_are_loaded() {
        let mut ctx: Context<()> = Context::new();
        ctx.begin(&[], ["acme", "42"]);
        assert_eq!(ctx.params(), &["acme", "42"]);
        assert_eq!(ctx.param(0), Some("acme"));
        assert_eq!(ctx.param(2), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ctx = Context::new();
        ctx.begin(&[mark("a")], ["x"]);
        ctx.set_data(vec!["seed"]);
        ctx.run();

        ctx.reset();
        assert!(ctx.params().is_empty());
        assert!(ctx.data().is_none());
        ctx.run(); // Empty chain: nothing happens.
        assert!(ctx.take_data().is_none());
    }
}
