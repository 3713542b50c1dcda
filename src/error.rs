use http::Method;
use thiserror::Error;

/// The boxed error type every handler error is converted into before it reaches the serving loop.
pub type RouteError = Box<dyn std::error::Error + Send + Sync>;

/// The error type used by the router, its route trees and the request context.
#[derive(Debug, Error)]
pub enum Error {
    /// The pattern already resolves to a registered route for the same method.
    #[error("route already registered: {method} {path}")]
    DuplicateRoute { method: Method, path: String },

    /// Routes can only be registered for GET, POST, PUT and DELETE.
    #[error("unsupported route method: {0}")]
    UnsupportedMethod(Method),

    #[error("couldn't percent decode request path: {0}")]
    InvalidPath(String),

    #[error("couldn't read request body: {0}")]
    Body(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("couldn't build response: {0}")]
    Response(#[from] http::Error),
}

impl Error {
    /// Returns `true` if this is a duplicate route registration.
    pub fn is_duplicate_route(&self) -> bool {
        matches!(self, Error::DuplicateRoute { .. })
    }
}
