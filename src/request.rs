//! Incoming HTTP request type.

use std::sync::Arc;

use bytes::Bytes;
use http::{Extensions, HeaderMap, Method, Uri};

use crate::vars::Vars;

/// An incoming HTTP request with its body fully read.
///
/// The router attaches the path variables it captured before calling the
/// handler; read them with [`Request::var`].
pub struct Request {
    inner: http::Request<Bytes>,
    vars: Vars,
    route: Option<Arc<str>>,
}

impl Request {
    /// Wraps an `http::Request`. Path variables start out empty.
    pub fn new(inner: http::Request<Bytes>) -> Self {
        Self { inner, vars: Vars::new(), route: None }
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn uri(&self) -> &Uri { self.inner.uri() }
    pub fn path(&self) -> &str { self.inner.uri().path() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn body(&self) -> &Bytes { self.inner.body() }
    pub fn extensions(&self) -> &Extensions { self.inner.extensions() }
    pub fn extensions_mut(&mut self) -> &mut Extensions { self.inner.extensions_mut() }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// All variables captured from the request path.
    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// Returns a named path variable.
    ///
    /// For a route `/users/:id`, `req.var("id")` on `/users/42` returns `Some("42")`.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name)
    }

    /// The pattern of the route that matched, e.g. `/users/:id`.
    ///
    /// `None` when the request is being answered by a fallback.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        self.inner
    }

    pub(crate) fn with_match(mut self, vars: Vars, route: Option<Arc<str>>) -> Self {
        self.vars = vars;
        self.route = route;
        self
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(inner: http::Request<Bytes>) -> Self {
        Self::new(inner)
    }
}
