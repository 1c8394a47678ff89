//! Request router.
//!
//! Owns the route trie, the middleware chain and the two fallback handlers.
//! Build it once at startup, then share it (behind an `Arc`) with every
//! request task. Nothing in it is mutated while serving, so dispatch takes
//! no locks.
//!
//! Per request:
//!
//! ```text
//! received ─▶ looked up ─┬─ matched ──────────┬─▶ dispatched ─▶ done
//!                        ├─ path not found ───┤   (through every middleware)
//!                        └─ method not found ─┘
//! ```

use http::StatusCode;
use http::header::X_CONTENT_TYPE_OPTIONS;

use crate::error::{InsertError, LookupError};
use crate::handler::{BoxFuture, Endpoint, Handler};
use crate::middleware::{Middleware, MiddlewareChain};
use crate::request::Request;
use crate::response::Response;
use crate::trie::RouteTrie;
use crate::vars::Vars;

/// The application router.
///
/// Route patterns are `/`-separated; a segment starting with `:` captures one
/// path component under that name:
///
/// ```rust
/// use trellis::{Request, Router};
///
/// async fn list(_: Request) -> &'static str { "[]" }
/// async fn show(req: Request) -> String {
///     format!("book {}", req.var("id").unwrap_or_default())
/// }
///
/// let app = Router::new()
///     .get("/books", list)
///     .get("/books/:id", show);
/// ```
pub struct Router {
    trie: RouteTrie<Endpoint>,
    middleware: MiddlewareChain,
    not_found: Endpoint,
    method_not_allowed: Endpoint,
}

impl Router {
    /// A router with no routes, no middleware and the default fallbacks:
    /// `404 Not Found` and `405 Method Not Allowed`, each answering with its
    /// reason phrase and a newline as `text/plain` body, plus
    /// `x-content-type-options: nosniff`.
    pub fn new() -> Self {
        Self {
            trie: RouteTrie::new(),
            middleware: MiddlewareChain::new(),
            not_found: Endpoint::fallback(default_not_found),
            method_not_allowed: Endpoint::fallback(default_method_not_allowed),
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    /// Replaces the handler used when no route matches the path.
    pub fn not_found(mut self, handler: impl Handler) -> Self {
        self.not_found = Endpoint::fallback(handler);
        self
    }

    /// Replaces the handler used when the path matches but the method does
    /// not. It receives whatever variables the path captured.
    pub fn method_not_allowed(mut self, handler: impl Handler) -> Self {
        self.method_not_allowed = Endpoint::fallback(handler);
        self
    }

    /// Appends a middleware. The first one added is the outermost.
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.add_middleware(middleware);
        self
    }

    pub fn add_middleware(&mut self, middleware: impl Middleware) {
        self.middleware.register(middleware);
        tracing::debug!(layers = self.middleware.len(), "middleware registered");
    }

    // ── Registration ──────────────────────────────────────────────────────────

    /// Registers a handler for a method + path pair.
    ///
    /// The method is matched case-insensitively. Fails if the method already
    /// has a handler at this path, or if a variable segment disagrees with
    /// the name already registered at the same position.
    pub fn handle(
        &mut self,
        method: impl AsRef<str>,
        path: &str,
        handler: impl Handler,
    ) -> Result<(), InsertError> {
        let method = method.as_ref();
        self.trie.insert(method, path, Endpoint::route(path, handler))?;
        tracing::debug!(method, path, "route registered");
        Ok(())
    }

    /// Registers a handler and returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics on a conflicting registration. A broken route table is a
    /// startup bug; use [`Router::handle`] to inspect the error instead.
    ///
    /// ```rust,should_panic
    /// # use trellis::{Request, Router};
    /// # async fn a(_: Request) -> &'static str { "" }
    /// Router::new()
    ///     .on("GET", "/a/:x", a)
    ///     .on("GET", "/a/:y", a); // panics: `x` vs `y`
    /// ```
    pub fn on(mut self, method: impl AsRef<str>, path: &str, handler: impl Handler) -> Self {
        let method = method.as_ref();
        if let Err(e) = self.handle(method, path, handler) {
            panic!("invalid route `{method} {path}`: {e}");
        }
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on("GET", path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on("POST", path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on("PUT", path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on("PATCH", path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on("DELETE", path, handler)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    /// Routes one request and runs it through the middleware chain.
    ///
    /// Handler selection happens before this returns; the returned future
    /// owns everything it needs and does not borrow the router.
    pub fn dispatch(&self, req: Request) -> BoxFuture {
        let (endpoint, vars) = self.select(req.method().as_str(), req.path());
        let req = req.with_match(vars, endpoint.route);
        self.middleware.compose(endpoint.handler).run(req)
    }

    /// Picks the handler for `(method, path)`: the matched route, or the
    /// fallback matching the lookup failure.
    fn select(&self, method: &str, path: &str) -> (Endpoint, Vars) {
        let found = self.trie.find(method, path);
        match found.handler {
            Ok(handler) => {
                tracing::trace!(method, path, outcome = "matched");
                (handler.clone(), found.vars)
            }
            Err(LookupError::PathNotFound) => {
                tracing::trace!(method, path, outcome = "path not found");
                (self.not_found.clone(), Vars::new())
            }
            Err(LookupError::MethodNotFound) => {
                tracing::trace!(method, path, outcome = "method not found");
                (self.method_not_allowed.clone(), found.vars)
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

async fn default_not_found(_req: Request) -> Response {
    plain_error(StatusCode::NOT_FOUND)
}

async fn default_method_not_allowed(_req: Request) -> Response {
    plain_error(StatusCode::METHOD_NOT_ALLOWED)
}

/// Reason phrase plus newline, never content-sniffed.
fn plain_error(status: StatusCode) -> Response {
    Response::builder()
        .status(status)
        .header(X_CONTENT_TYPE_OPTIONS, "nosniff")
        .text(format!("{}\n", status.canonical_reason().unwrap_or_default()))
}
