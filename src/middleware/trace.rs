//! Per-request tracing middleware.

use std::time::Instant;

use tracing::Instrument;

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Logs one `info` event per request with method, path, matched route,
/// status and latency, and runs the rest of the chain inside a `request`
/// span.
///
/// Register it first so the latency covers every other layer:
///
/// ```rust
/// use trellis::Router;
/// use trellis::middleware::Trace;
///
/// let app = Router::new().middleware(Trace::new());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Trace {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for Trace {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let method = req.method().clone();
        let path = req.path().to_owned();
        let route = req.route().unwrap_or("-").to_owned();
        let span = tracing::info_span!("request", method = %method, path = %path, route = %route);

        Box::pin(
            async move {
                let start = Instant::now();
                let res = next.run(req).await;
                tracing::info!(
                    status = res.status_code().as_u16(),
                    latency_us = start.elapsed().as_micros() as u64,
                    "request completed"
                );
                res
            }
            .instrument(span),
        )
    }
}
