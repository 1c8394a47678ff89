//! Path tokenizer.
//!
//! A path goes through three steps before it touches the trie:
//!
//! ```text
//! "//a/:id/../b//"  ── normalize ──▶  "/a/b/"
//! "/a/:id/"         ── split     ──▶  ["/a", "/:id"]
//! ["/a", "/:id"]    ── classify  ──▶  [Literal("/a"), Variable("id")]
//! ```
//!
//! Every piece keeps its leading slash so a literal `/a` can never be
//! confused with a bare variable name `a`.

/// One slash-delimited unit of a route pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Matched by exact text. Holds the marked piece, e.g. `/users`.
    Literal(String),
    /// Matches any single path component. Holds the variable name, e.g. `id`.
    Variable(String),
}

/// Marker that opens a variable piece.
const VARIABLE_MARKER: &str = "/:";

/// Cleans `path` into its canonical form.
///
/// - empty input becomes `/`
/// - a leading `/` is added when missing
/// - repeated slashes, `.` and `..` are resolved lexically
/// - a trailing slash survives, except that the root stays `/`
///
/// Idempotent: `normalize(&normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return "/".to_owned();
    }

    let mut stack: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            part => stack.push(part),
        }
    }

    let mut clean = String::with_capacity(path.len() + 1);
    for part in &stack {
        clean.push('/');
        clean.push_str(part);
    }
    if clean.is_empty() {
        clean.push('/');
    } else if path.ends_with('/') {
        clean.push('/');
    }
    clean
}

/// Splits a normalized path into marked pieces.
///
/// One surrounding slash is trimmed from each end, the rest is split on `/`,
/// and every piece gets its slash back. The root path yields `["/"]`.
pub fn split(normalized: &str) -> Vec<String> {
    let trimmed = normalized.strip_suffix('/').unwrap_or(normalized);
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    trimmed.split('/').map(|piece| format!("/{piece}")).collect()
}

/// Classifies marked pieces as literal or variable segments.
pub fn classify(pieces: Vec<String>) -> Vec<Segment> {
    pieces
        .into_iter()
        .map(|piece| match piece.strip_prefix(VARIABLE_MARKER) {
            Some(name) => Segment::Variable(name.to_owned()),
            None => Segment::Literal(piece),
        })
        .collect()
}

/// Normalizes, splits and classifies a route pattern in one go.
pub fn tokenize(path: &str) -> Vec<Segment> {
    classify(split(&normalize(path)))
}
