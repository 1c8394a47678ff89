//! Endpoints: the code a request finally reaches.
//!
//! Routes, the two fallbacks and the innermost end of the middleware chain
//! are all the same thing to the router, a [`Handler`] behind an `Arc`.
//! Async functions and closures qualify automatically; types that need
//! state can implement the trait directly.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// The future every handler and middleware returns once erased.
///
/// Owns all it needs, so the transport can poll it on any worker thread.
/// Dropping it cancels the chain at its current await point.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Something that turns a request into a response.
///
/// ```rust
/// use trellis::{BoxFuture, Handler, Request, Response};
///
/// struct Fixed(&'static str);
///
/// impl Handler for Fixed {
///     fn call(&self, _req: Request) -> BoxFuture {
///         let body = self.0;
///         Box::pin(async move { Response::text(body) })
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

/// `async fn(Request) -> impl IntoResponse` and equivalent closures.
impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = self(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// A handler as the router stores it.
///
/// Route entries remember the pattern they were registered under so the
/// request can report which route served it; fallbacks have none.
#[derive(Clone)]
pub(crate) struct Endpoint {
    pub(crate) handler: Arc<dyn Handler>,
    pub(crate) route: Option<Arc<str>>,
}

impl Endpoint {
    pub(crate) fn route(pattern: &str, handler: impl Handler) -> Self {
        Self { handler: Arc::new(handler), route: Some(Arc::from(pattern)) }
    }

    pub(crate) fn fallback(handler: impl Handler) -> Self {
        Self { handler: Arc::new(handler), route: None }
    }
}
