//! Pattern normalization and tokenization.
//!
//! A route pattern is normalized the way a filesystem path cleaner would
//! normalize a path (collapse repeated separators, resolve `.` and `..`,
//! ensure a leading `/`), then split into an alternating sequence of literal
//! runs and single-character markers: `:` captures one path segment, `*`
//! captures the remainder of the path.
//!
//! Markers may carry a name (`:id`, `*rest`); the name is ignored because
//! captures are positional. A literal run that follows a parameter carries no
//! leading `/`, since the parameter consumes the separator at match time.

use crate::error::RouteError;

/// One token of a parsed route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// A run of fixed text, matched byte-for-byte.
    Literal(&'a str),
    /// A single-segment capture (`:`).
    Param,
    /// A trailing capture of the whole remaining path (`*`).
    Wildcard,
}

/// Normalizes a route pattern to a clean absolute path.
///
/// Repeated separators collapse, `.` segments drop, `..` segments pop their
/// parent, and the result always starts with `/` and never ends with one
/// (except for the root itself).
pub(crate) fn normalize(pattern: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in pattern.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(pattern.len());
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Splits a normalized pattern into [`Token`]s.
///
/// The only malformed shape is a wildcard anywhere but the final segment.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>, RouteError> {
    let mut tokens = Vec::new();
    let mut rest = pattern;
    loop {
        let Some(at) = rest.find([':', '*']) else {
            if !rest.is_empty() {
                tokens.push(Token::Literal(rest));
            }
            break;
        };
        if at > 0 {
            tokens.push(Token::Literal(&rest[..at]));
        }
        let wildcard = rest.as_bytes()[at] == b'*';
        tokens.push(if wildcard { Token::Wildcard } else { Token::Param });
        // Skip the rest of the marker's segment; any name there is ignored.
        match rest[at..].find('/') {
            None => break,
            Some(_) if wildcard => {
                return Err(RouteError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "wildcard must be the final segment",
                });
            }
            Some(end) => {
                rest = &rest[at + end + 1..];
                if rest.is_empty() {
                    break;
                }
            }
        }
    }
    Ok(tokens)
}
