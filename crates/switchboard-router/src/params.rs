//! Ordered parameter captures.
//!
//! Captures borrow directly from the matched path and are stored with a
//! small-vector optimization, so matching a typical route performs no heap
//! allocation.

use smallvec::SmallVec;

/// Number of captures stored inline (stack allocated).
const INLINE_PARAMS: usize = 4;

/// The ordered parameter values captured by a route match.
///
/// Values appear in the order their markers occur in the registered pattern:
/// matching `/a/:/b/:` against `/a/X/b/Y` yields `["X", "Y"]`.
///
/// # Example
///
/// ```rust
/// use switchboard_router::Router;
/// use http::Method;
///
/// let mut router = Router::new();
/// router.get("/orgs/:/users/:", vec!["getOrgUser"]).unwrap();
///
/// let m = router.match_route(&Method::GET, "/orgs/acme/users/123").unwrap();
/// assert_eq!(m.params.get(0), Some("acme"));
/// assert_eq!(m.params.get(1), Some("123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params<'p> {
    inner: SmallVec<[&'p str; INLINE_PARAMS]>,
}

impl<'p> Params<'p> {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured value.
    pub(crate) fn push(&mut self, value: &'p str) {
        self.inner.push(value);
    }

    /// Returns the capture at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'p str> {
        self.inner.get(index).copied()
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the captures in order.
    pub fn iter(&self) -> impl Iterator<Item = &'p str> + '_ {
        self.inner.iter().copied()
    }

    /// Returns the captures as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[&'p str] {
        &self.inner
    }
}

impl<'a, 'p> IntoIterator for &'a Params<'p> {
    type Item = &'p str;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, &'p str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_new() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
        assert_eq!(params.get(0), None);
    }

    #[test]
    fn test_params_order() {
        let mut params = Params::new();
        params.push("X");
        params.push("Y");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get(0), Some("X"));
        assert_eq!(params.get(1), Some("Y"));
        assert_eq!(params.as_slice(), &["X", "Y"]);
    }

    #[test]
    fn test_params_iter() {
        let mut params = Params::new();
        params.push("a");
        params.push("b");

        let values: Vec<_> = params.iter().collect();
        assert_eq!(values, vec!["a", "b"]);

        let values: Vec<_> = (&params).into_iter().collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_params_spill_past_inline_capacity() {
        let mut params = Params::new();
        for _ in 0..10 {
            params.push("v");
        }
        assert_eq!(params.len(), 10);
        assert_eq!(params.get(9), Some("v"));
    }
}
