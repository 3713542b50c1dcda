//! `routerify-tree` is a segment-trie HTTP router for the Rust HTTP library [hyper](https://hyper.rs/).
//!
//! Each of `GET`, `POST`, `PUT` and `DELETE` owns a trie keyed by path segment. Literal
//! segments match case-insensitively, segments written as `:name` match any single path
//! segment and bind its value to `name`.
//!
//! ## Basic Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use http_body_util::Full;
//! use hyper::service::Service;
//! use hyper::{Response, StatusCode};
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! use routerify_tree::{Context, Error, Router, RouterService};
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! // A handler for "/" page.
//! async fn home_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
//!     ctx.text(StatusCode::OK, "Home page")
//! }
//!
//! // A handler for "/users/:userId" page.
//! async fn user_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
//!     let user_id = ctx.param("userId").cloned().unwrap_or_default();
//!     ctx.json(StatusCode::OK, &format!("Hello {}", user_id))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // A duplicate route is a configuration error, so fail before serving anything.
//!     let router: Router<Error> = Router::builder()
//!         .get("/", home_handler)
//!         .get("/users/:userId", user_handler)
//!         .build()?;
//!
//!     let router_service = Arc::new(RouterService::new(router));
//!
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let router_service = router_service.clone();
//!
//!         tokio::spawn(async move {
//!             let request_service = router_service.call(&stream).await.unwrap();
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Paths
//!
//! A path is split on `/` and every piece is one segment, so `/book`, `/book/` and
//! `//book` are three different routes. Nothing is trimmed or validated.
//!
//! ### Match Order
//!
//! Lookup is a depth-first search over the trie that returns the first registered route
//! it can complete, trying sibling segments in the order they were registered. Literal
//! segments are not preferred over dynamic ones:
//!
//! ```
//! use bytes::Bytes;
//! use http::Method;
//! use http_body_util::Full;
//! use hyper::Response;
//! use routerify_tree::prelude::*;
//! use routerify_tree::{Error, Router};
//!
//! let router: Router<Error> = Router::builder()
//!     .get("/book/:id", |_| async { Ok(Response::new(Full::new(Bytes::from("by id")))) })
//!     .get("/book/detail", |_| async { Ok(Response::new(Full::new(Bytes::from("detail")))) })
//!     .build()
//!     .unwrap();
//!
//! // "/book/:id" was registered first, so it also serves "/book/detail".
//! let found = router.find_route(&Method::GET, "/book/detail").unwrap();
//! assert_eq!(found.params.get("id").unwrap(), "detail");
//! ```
//!
//! Register the more specific route first when both should be reachable.
//!
//! ### Route Parameters
//!
//! ```txt
//! Route path: /users/:userName/books/:bookName
//! Request URL: http://localhost:3000/users/alice/books/HarryPotter
//! ctx.params() returns: { "userName": "alice", "bookName": "HarryPotter" }
//! ```
//!
//! Two routes that only differ in a parameter name, like `/user/:id` and `/user/:name`,
//! are both accepted; the one registered first serves every request.
//!
//! ### Groups
//!
//! [`RouteRegister::group`] returns a registrar that prefixes every path, and groups nest.
//!
//! The registration and lookup methods live on the [`RouteRegister`] and [`RouteMatching`]
//! traits; `use routerify_tree::prelude::*` brings both into scope.
//!
//! ## Error Handling
//!
//! Registering the same pattern twice for a method fails with [`Error::DuplicateRoute`].
//! The builder keeps the first error and returns it from [`RouterBuilder::build`].
//!
//! At serving time a request without a route gets `404` and a handler error gets `500`,
//! both with a short JSON string body. Handler errors are logged through `tracing`.

pub use self::context::Context;
pub use self::error::{Error, RouteError};
pub use self::handler::{BoxedHandler, Handler, HandlerFuture};
pub use self::router::{RouteGroup, RouteMatching, RouteRegister, Router, RouterBuilder, SimpleRouter};
#[doc(hidden)]
pub use self::service::RequestService;
pub use self::service::RequestServiceBuilder;
pub use self::service::RouterService;
pub use self::tree::{Match, Tree};
pub use self::types::RouteParams;

mod constants;
mod context;
mod error;
mod handler;
mod helpers;
pub mod prelude;
mod router;
mod service;
mod tree;
mod types;

/// A Result type often returned from methods that can have routerify-tree errors.
pub type Result<T> = std::result::Result<T, Error>;
