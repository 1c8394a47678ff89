//! Middleware layer.
//!
//! Middleware wraps the handler the router selected, whether that is a
//! matched route or one of the fallbacks. It is the place for cross-cutting
//! concerns: tracing, request-id injection, authentication-header checks.
//!
//! Layers compose as an onion. With `A` registered before `B`:
//!
//! ```text
//! A pre → B pre → handler → B post → A post
//! ```
//!
//! A middleware is any async function taking the request and a [`Next`]:
//!
//! ```rust
//! use trellis::{Request, Response, Router};
//! use trellis::middleware::Next;
//!
//! async fn require_token(req: Request, next: Next) -> Response {
//!     if req.header("authorization").is_none() {
//!         return Response::status(trellis::StatusCode::UNAUTHORIZED);
//!     }
//!     next.run(req).await
//! }
//!
//! let app = Router::new().middleware(require_token);
//! ```

mod trace;

pub use trace::Trace;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, Handler};
use crate::request::Request;
use crate::response::IntoResponse;

/// A handler-wrapping transform.
///
/// Same calling convention as [`Handler`], plus the [`Next`] it wraps.
/// Implemented automatically for `async fn(Request, Next) -> impl IntoResponse`.
/// Implement it by hand for middleware that carries configuration.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let fut = self(req, next);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// The rest of the chain below the current middleware.
///
/// Calling [`Next::run`] invokes the next layer, or the handler itself once
/// every layer has run. Not calling it short-circuits the request.
#[derive(Clone)]
pub struct Next {
    layers: Arc<[Arc<dyn Middleware>]>,
    index: usize,
    endpoint: Arc<dyn Handler>,
}

impl Next {
    pub fn run(self, req: Request) -> BoxFuture {
        let Some(layer) = self.layers.get(self.index).cloned() else {
            return self.endpoint.call(req);
        };
        let next = Next { index: self.index + 1, ..self };
        layer.call(req, next)
    }
}

/// Ordered middleware, first registered is outermost.
///
/// Appended to during startup, frozen once serving starts. Composition is
/// done per request by handing out a [`Next`] that shares the layer slice.
#[derive(Clone)]
pub(crate) struct MiddlewareChain {
    layers: Arc<[Arc<dyn Middleware>]>,
}

impl MiddlewareChain {
    pub(crate) fn new() -> Self {
        Self { layers: Vec::new().into() }
    }

    pub(crate) fn register(&mut self, middleware: impl Middleware) {
        let mut layers = self.layers.to_vec();
        layers.push(Arc::new(middleware));
        self.layers = layers.into();
    }

    /// Wraps `endpoint` in every registered layer.
    pub(crate) fn compose(&self, endpoint: Arc<dyn Handler>) -> Next {
        Next { layers: Arc::clone(&self.layers), index: 0, endpoint }
    }

    pub(crate) fn len(&self) -> usize {
        self.layers.len()
    }
}
