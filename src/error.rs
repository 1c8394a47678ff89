//! Error types.
//!
//! Three kinds of failure, three places they surface:
//!
//! - [`InsertError`] — a route table misconfiguration, reported at
//!   registration time before any request is served.
//! - [`LookupError`] — a request that matches no route or no method. The
//!   router turns these into its fallback handlers; they never reach user
//!   code as errors.
//! - [`Error`] — infrastructure failures in the [`Server`](crate::Server):
//!   binding to a port or reading the listener address.
//!
//! Application-level failures (422, 500, ...) are [`Response`](crate::Response)
//! values produced by handlers, not errors.

use thiserror::Error;

/// A route could not be registered.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InsertError {
    /// A variable segment reuses a trie position already claimed by a
    /// variable with a different name, e.g. `/a/:x` followed by `/a/:y`.
    #[error("variable name differs from the previously registered one: want `{existing}`, got `{conflicting}`")]
    NameConflict { existing: String, conflicting: String },

    /// The method already has a handler at this exact path.
    #[error("conflicting handler: {method} {path} already has a handler")]
    HandlerConflict { method: String, path: String },
}

/// A request could not be matched to a handler.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum LookupError {
    #[error("path is not found")]
    PathNotFound,
    #[error("method not found")]
    MethodNotFound,
}

/// The error type returned by the server.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
