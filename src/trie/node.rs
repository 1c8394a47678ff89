//! Trie nodes and their per-method handler tables.

use std::collections::HashMap;

/// Label of the trie root.
pub(crate) const ROOT_LABEL: &str = "<root>";

/// Handlers registered at one node, keyed by HTTP method.
///
/// Methods are compared ASCII case-insensitively: `get` and `GET` name the
/// same slot.
#[derive(Debug)]
pub(crate) struct HandlerTable<T> {
    by_method: HashMap<String, T>,
}

impl<T> HandlerTable<T> {
    pub(crate) fn new() -> Self {
        Self { by_method: HashMap::new() }
    }

    /// Registers `handler` for `method`.
    ///
    /// Hands the handler back when the method already has one; the existing
    /// entry is left untouched.
    pub(crate) fn set(&mut self, method: &str, handler: T) -> Result<(), T> {
        let key = method.to_ascii_uppercase();
        if self.by_method.contains_key(&key) {
            return Err(handler);
        }
        self.by_method.insert(key, handler);
        Ok(())
    }

    pub(crate) fn get(&self, method: &str) -> Option<&T> {
        // Fast path: request methods arrive uppercase from the wire.
        if !method.bytes().any(|b| b.is_ascii_lowercase()) {
            return self.by_method.get(method);
        }
        self.by_method.get(&method.to_ascii_uppercase())
    }
}

/// One trie level.
///
/// Literal children are keyed by their marked segment text (`/users`). The
/// single variable child lives in its own slot and is labelled with the
/// variable name it captures under.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) label: String,
    pub(crate) children: HashMap<String, Node<T>>,
    pub(crate) variable: Option<Box<Node<T>>>,
    pub(crate) handlers: HandlerTable<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: HashMap::new(),
            variable: None,
            handlers: HandlerTable::new(),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(ROOT_LABEL)
    }

    /// Returns the literal child for `segment`, creating it if needed.
    pub(crate) fn literal_child_mut(&mut self, segment: &str) -> &mut Node<T> {
        self.children
            .entry(segment.to_owned())
            .or_insert_with(|| Node::new(segment))
    }

    /// Next node for a request segment: exact literal first, then the
    /// variable child.
    pub(crate) fn step(&self, segment: &str) -> Option<Step<'_, T>> {
        if let Some(child) = self.children.get(segment) {
            return Some(Step::Literal(child));
        }
        self.variable.as_deref().map(Step::Variable)
    }
}

/// Outcome of moving one level down during lookup.
pub(crate) enum Step<'a, T> {
    Literal(&'a Node<T>),
    Variable(&'a Node<T>),
}
