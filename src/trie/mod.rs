//! Segment trie mapping `(method, path)` pairs to handlers.
//!
//! Each node is one path segment. Literal children are looked up by exact
//! text; a node may additionally own one variable child that captures any
//! single segment. Lookup walks one level per segment, so its cost depends on
//! the request path length and not on how many routes are registered.
//!
//! ```text
//! <root>
//!  └─ /products            GET POST
//!      ├─ /carts           GET
//!      │   └─ :cid         DELETE
//!      └─ :pid             GET PATCH
//!          ├─ /stars       GET
//!          └─ /comments    GET
//! ```
//!
//! The trie is built during startup and only read afterwards, which is what
//! lets the router share it across request tasks without locking.

pub mod path;

mod node;

use crate::error::{InsertError, LookupError};
use crate::vars::Vars;

use self::node::{Node, Step};
use self::path::Segment;

/// Result of [`RouteTrie::find`].
#[derive(Debug)]
pub struct Lookup<'a, T> {
    /// The matched handler, or why there is none.
    pub handler: Result<&'a T, LookupError>,
    /// Variables captured on the way down. Still populated on
    /// [`LookupError::MethodNotFound`].
    pub vars: Vars,
}

/// A prefix tree keyed by path segments.
#[derive(Debug)]
pub struct RouteTrie<T> {
    root: Node<T>,
}

impl<T> RouteTrie<T> {
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    /// Registers `handler` for `method` on the route pattern `path`.
    ///
    /// Segments starting with `:` declare variables. On failure the only
    /// lasting change is a set of handler-less literal nodes along the
    /// rejected path, which no lookup can tell apart from absent ones.
    pub fn insert(&mut self, method: &str, path: &str, handler: T) -> Result<(), InsertError> {
        let mut node = &mut self.root;
        for segment in path::tokenize(path) {
            node = match segment {
                Segment::Literal(text) => node.literal_child_mut(&text),
                Segment::Variable(name) => {
                    let child = node
                        .variable
                        .get_or_insert_with(|| Box::new(Node::new(name.as_str())));
                    if child.label != name {
                        return Err(InsertError::NameConflict {
                            existing: child.label.clone(),
                            conflicting: name,
                        });
                    }
                    &mut **child
                }
            };
        }

        node.handlers
            .set(method, handler)
            .map_err(|_| InsertError::HandlerConflict {
                method: method.to_ascii_uppercase(),
                path: path.to_owned(),
            })
    }

    /// Finds the handler for `method` on the request path `path`.
    ///
    /// At every level an exact literal child wins over the variable child,
    /// so `/a/b` is never shadowed by `/a/:id`. Request segments are matched
    /// as plain text; a leading `:` in a request path has no special meaning,
    /// so `/a/:x/b` against `/a/:id/b` captures `id = ":x"` with the colon kept.
    pub fn find(&self, method: &str, path: &str) -> Lookup<'_, T> {
        let mut vars = Vars::new();
        let mut node = &self.root;
        for piece in path::split(&path::normalize(path)) {
            node = match node.step(&piece) {
                Some(Step::Literal(child)) => child,
                Some(Step::Variable(child)) => {
                    vars.insert(&child.label, &piece[1..]);
                    child
                }
                None => {
                    return Lookup { handler: Err(LookupError::PathNotFound), vars };
                }
            };
        }

        let handler = node.handlers.get(method).ok_or(LookupError::MethodNotFound);
        Lookup { handler, vars }
    }
}

impl<T> Default for RouteTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}
