//! Captured path variables.

use std::collections::HashMap;

/// Path variables captured while matching one request.
///
/// For a route `/users/:id`, a request to `/users/42` yields
/// `vars.get("id") == Some("42")`. Values are the raw segment text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vars {
    inner: HashMap<String, String>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value captured under `name`, or `None` if the matched
    /// route declared no such variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn insert(&mut self, name: &str, value: &str) {
        self.inner.insert(name.to_owned(), value.to_owned());
    }
}

impl<K, V> FromIterator<(K, V)> for Vars
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
