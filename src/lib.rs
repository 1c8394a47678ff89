//! # trellis
//!
//! A trie-based HTTP request router. Nothing more. Nothing less.
//!
//! - **Segment trie** — one node per path segment, O(segments) lookup no
//!   matter how many routes are registered.
//! - **Path variables** — `/books/:id` captures one segment as `id`.
//!   A literal sibling (`/books/new`) always wins over the variable.
//! - **Onion middleware** — first registered runs outermost, and wraps the
//!   fallbacks exactly like it wraps matched routes.
//! - **Explicit fallbacks** — unknown path → `404`, known path with an
//!   unknown method → `405`. Both replaceable.
//!
//! The router is an ordinary value: build one at startup, hand it to a
//! [`Server`] (or call [`Router::dispatch`] from your own transport), and it
//! is never mutated again. There is no global registry.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use trellis::{Request, Response, Router, Server, StatusCode};
//! use trellis::middleware::Trace;
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .middleware(Trace::new())
//!         .get("/books",      list_books)
//!         .post("/books",     create_book)
//!         .get("/books/:id",  get_book);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn list_books(_req: Request) -> Response {
//!     Response::json(b"[]".to_vec())
//! }
//!
//! async fn get_book(req: Request) -> Response {
//!     let id = req.var("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn create_book(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/books/99")
//!         .json(req.body().clone())
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod vars;

pub mod middleware;
pub mod trie;

pub use error::{Error, InsertError, LookupError};
pub use handler::{BoxFuture, Handler};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use vars::Vars;

pub use http::{Method, StatusCode};
