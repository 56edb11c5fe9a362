//! Prefix-compressed trie nodes.
//!
//! Each node owns a literal path fragment shared by everything below it.
//! Static children are disjoint in their first byte, so lookup dispatches
//! directly instead of scanning ambiguous prefixes. A node holds at most one
//! of {literal children, a parameter child}; a wildcard child, once present,
//! is the only child and always terminal.
//!
//! Insertion runs in two phases: a read-only walk that reports every conflict
//! the mutating walk could hit, then the mutating walk itself. A rejected
//! route therefore leaves the trie untouched.

use std::mem;

use crate::error::ConflictReason;
use crate::params::Params;
use crate::pattern::Token;

/// What a node's fragment stands for in the path space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    /// Fixed text, matched byte-for-byte.
    Static,
    /// A single-segment capture; the node's own prefix is empty and its
    /// children hold whatever follows the captured segment.
    Param,
    /// A trailing capture of the remaining path. Always a leaf.
    Wildcard,
}

/// A node in the routing trie.
///
/// `handlers` being present marks a fully registered route; an absent chain
/// means the node is an internal branch point only.
#[derive(Debug, Clone)]
pub(crate) struct Node<H> {
    prefix: String,
    kind: SegmentKind,
    static_children: Vec<Node<H>>,
    param_child: Option<Box<Node<H>>>,
    wildcard_child: Option<Box<Node<H>>>,
    handlers: Option<Vec<H>>,
}

impl<H> Node<H> {
    /// Creates an empty root. The prefix stays empty until the first route
    /// is registered.
    pub(crate) fn root() -> Self {
        Self::new_static(String::new())
    }

    fn new_static(prefix: String) -> Self {
        Self {
            prefix,
            kind: SegmentKind::Static,
            static_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
            handlers: None,
        }
    }

    fn new_marker(kind: SegmentKind) -> Self {
        Self {
            prefix: String::new(),
            kind,
            static_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
            handlers: None,
        }
    }

    fn is_vacant(&self) -> bool {
        self.static_children.is_empty()
            && self.param_child.is_none()
            && self.wildcard_child.is_none()
            && self.handlers.is_none()
    }

    /// Registers a handler chain for a tokenized pattern.
    ///
    /// Re-registering a terminal node overwrites its chain; the return value
    /// reports whether that happened. On conflict the trie is left exactly
    /// as it was.
    pub(crate) fn add_route(
        &mut self,
        tokens: &[Token<'_>],
        handlers: Vec<H>,
    ) -> Result<bool, ConflictReason> {
        self.check_route(tokens)?;
        let mut node: &mut Self = self;
        for token in tokens {
            let current = node;
            node = match *token {
                Token::Literal(lit) => current.graft_literal(lit),
                Token::Param => current.graft_marker(SegmentKind::Param),
                Token::Wildcard => current.graft_marker(SegmentKind::Wildcard),
            };
        }
        let replaced = node.handlers.replace(handlers).is_some();
        Ok(replaced)
    }

    /// Read-only conflict detection, mirroring the mutating walk.
    fn check_route(&self, tokens: &[Token<'_>]) -> Result<(), ConflictReason> {
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(());
        };
        match *first {
            Token::Literal(lit) => self.check_literal(lit, rest),
            Token::Param => self.check_param(rest),
            Token::Wildcard => self.check_wildcard(),
        }
    }

    fn check_literal(&self, lit: &str, rest: &[Token<'_>]) -> Result<(), ConflictReason> {
        if self.kind == SegmentKind::Static && self.prefix.is_empty() && self.is_vacant() {
            // Fresh root: the token is adopted and everything below is new.
            return Ok(());
        }
        let common = common_prefix_len(&self.prefix, lit);
        let node_rem = &self.prefix[common..];
        let lit_rem = &lit[common..];
        if lit_rem.is_empty() {
            if node_rem.is_empty() {
                // Exact fragment; continue at this node.
                return self.check_route(rest);
            }
            // The node will be split and its remainder becomes the sole
            // literal child, so a following marker cannot coexist with it.
            return match rest.first() {
                Some(Token::Param) => Err(ConflictReason::ParamOverStatic {
                    existing: node_rem.to_string(),
                }),
                Some(Token::Wildcard) => Err(ConflictReason::WildcardOverStatic {
                    existing: node_rem.to_string(),
                }),
                _ => Ok(()),
            };
        }
        if node_rem.is_empty() {
            // The token outruns this fragment: descend.
            if self.param_child.is_some() {
                return Err(ConflictReason::StaticOverParam);
            }
            if self.wildcard_child.is_some() {
                return Err(ConflictReason::StaticOverWildcard);
            }
            let first_byte = lit_rem.as_bytes()[0];
            if let Some(child) = self
                .static_children
                .iter()
                .find(|c| c.prefix.as_bytes().first() == Some(&first_byte))
            {
                return child.check_literal(lit_rem, rest);
            }
            // No child shares the first byte: a fresh subtree.
            return Ok(());
        }
        // Divergent remainders: the node splits and the new branch is fresh.
        Ok(())
    }

    fn check_param(&self, rest: &[Token<'_>]) -> Result<(), ConflictReason> {
        if let Some(child) = self.static_children.first() {
            return Err(ConflictReason::ParamOverStatic {
                existing: child.prefix.clone(),
            });
        }
        if self.wildcard_child.is_some() {
            return Err(ConflictReason::ParamOverWildcard);
        }
        match &self.param_child {
            Some(child) => child.check_route(rest),
            None => Ok(()),
        }
    }

    fn check_wildcard(&self) -> Result<(), ConflictReason> {
        if let Some(child) = self.static_children.first() {
            return Err(ConflictReason::WildcardOverStatic {
                existing: child.prefix.clone(),
            });
        }
        if self.param_child.is_some() {
            return Err(ConflictReason::WildcardOverParam);
        }
        // An existing wildcard child is reused; its chain is overwritten at
        // the end of the walk.
        Ok(())
    }

    /// Mutating walk for one literal token. Infallible: `check_route` has
    /// already rejected every conflicting shape.
    fn graft_literal(&mut self, lit: &str) -> &mut Self {
        if self.kind == SegmentKind::Static && self.prefix.is_empty() && self.is_vacant() {
            self.prefix = lit.to_string();
            return self;
        }
        let common = common_prefix_len(&self.prefix, lit);
        if common == self.prefix.len() && common == lit.len() {
            return self;
        }
        if common == lit.len() {
            // Token is a strict prefix of this fragment: split off the tail.
            self.split_at(common);
            return self;
        }
        if common == self.prefix.len() {
            let rest = &lit[common..];
            let first_byte = rest.as_bytes()[0];
            if let Some(at) = self
                .static_children
                .iter()
                .position(|c| c.prefix.as_bytes().first() == Some(&first_byte))
            {
                return self.static_children[at].graft_literal(rest);
            }
            let at = self.static_children.len();
            self.static_children.push(Self::new_static(rest.to_string()));
            return &mut self.static_children[at];
        }
        // Partial overlap: keep the common prefix here and grow two branches.
        self.split_at(common);
        let at = self.static_children.len();
        self.static_children
            .push(Self::new_static(lit[common..].to_string()));
        &mut self.static_children[at]
    }

    /// Shortens this node's fragment to `at` bytes, pushing everything it
    /// owned (tail fragment, children, handlers) down into a new child.
    fn split_at(&mut self, at: usize) {
        let mut child = Self::new_static(self.prefix[at..].to_string());
        child.static_children = mem::take(&mut self.static_children);
        child.param_child = self.param_child.take();
        child.wildcard_child = self.wildcard_child.take();
        child.handlers = self.handlers.take();
        self.prefix.truncate(at);
        self.static_children.push(child);
    }

    fn graft_marker(&mut self, kind: SegmentKind) -> &mut Self {
        let slot = match kind {
            SegmentKind::Param => &mut self.param_child,
            _ => &mut self.wildcard_child,
        };
        &mut **slot.get_or_insert_with(|| Box::new(Self::new_marker(kind)))
    }

    /// Walks the trie for a request path, producing the handler chain and the
    /// ordered captures.
    ///
    /// Static children win over a parameter child, which wins over a wildcard
    /// child, at every branch point. Never allocates nodes and performs no
    /// heap allocation for routes with few captures.
    pub(crate) fn match_path<'n, 'p>(&'n self, path: &'p str) -> Option<(&'n [H], Params<'p>)> {
        let mut rest = path.strip_prefix(self.prefix.as_str())?;
        let mut params = Params::new();
        if rest.is_empty() {
            return self.matched(params);
        }
        let mut node = self;
        'walk: loop {
            for child in &node.static_children {
                if let Some(next) = rest.strip_prefix(child.prefix.as_str()) {
                    if next.is_empty() {
                        return child.matched(params);
                    }
                    node = child;
                    rest = next;
                    continue 'walk;
                }
            }
            if let Some(param) = node.param_child.as_deref() {
                return match rest.find('/') {
                    None => {
                        params.push(rest);
                        param.matched(params)
                    }
                    Some(sep) => {
                        params.push(&rest[..sep]);
                        rest = &rest[sep + 1..];
                        if rest.is_empty() {
                            return param.matched(params);
                        }
                        node = param;
                        continue 'walk;
                    }
                };
            }
            if let Some(wildcard) = node.wildcard_child.as_deref() {
                params.push(rest);
                return wildcard.matched(params);
            }
            return None;
        }
    }

    fn matched<'n, 'p>(&'n self, params: Params<'p>) -> Option<(&'n [H], Params<'p>)> {
        self.handlers.as_deref().map(|handlers| (handlers, params))
    }
}

/// Longest shared prefix of two fragments, in bytes, never splitting a
/// character.
fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            break;
        }
        len += ca.len_utf8();
    }
    len
}
