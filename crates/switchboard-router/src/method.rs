//! The per-method trie table.
//!
//! One independent trie root per standard HTTP method, so path spaces never
//! interfere across methods. Slot selection is a plain match on
//! [`http::Method`]; anything outside the nine standard methods gets no slot.

use http::Method;

use crate::node::Node;

/// Number of standard methods with a dedicated root.
const METHOD_SLOTS: usize = 9;

/// A fixed collection of independent trie roots keyed by HTTP method.
#[derive(Debug, Clone)]
pub(crate) struct MethodTable<H> {
    roots: [Node<H>; METHOD_SLOTS],
}

fn slot(method: &Method) -> Option<usize> {
    match *method {
        Method::GET => Some(0),
        Method::HEAD => Some(1),
        Method::POST => Some(2),
        Method::PUT => Some(3),
        Method::PATCH => Some(4),
        Method::DELETE => Some(5),
        Method::CONNECT => Some(6),
        Method::OPTIONS => Some(7),
        Method::TRACE => Some(8),
        _ => None,
    }
}

impl<H> MethodTable<H> {
    pub(crate) fn new() -> Self {
        Self {
            roots: std::array::from_fn(|_| Node::root()),
        }
    }

    /// The root for a method, or `None` for an unrecognized method.
    pub(crate) fn root(&self, method: &Method) -> Option<&Node<H>> {
        slot(method).map(|at| &self.roots[at])
    }

    pub(crate) fn root_mut(&mut self, method: &Method) -> Option<&mut Node<H>> {
        slot(method).map(move |at| &mut self.roots[at])
    }
}

impl<H> Default for MethodTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
