use super::{RouteGroup, RouteRegister, Router};
use crate::context::Context;
use crate::handler::{self, BoxedHandler};
use crate::RouteError;
use bytes::Bytes;
use http::Method;
use http_body_util::Full;
use hyper::Response;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

/// Builder for the [Router](./struct.Router.html) type.
///
/// This `RouterBuilder<E>` type accepts a single type parameter: `E`.
///
/// * The `E` represents any error type which will be used by route handlers. This error type must implement the [std::error::Error](https://doc.rust-lang.org/std/error/trait.Error.html).
///
/// The first registration error is kept and returned by [`build`](RouterBuilder::build),
/// the registrations after it are skipped.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use http_body_util::Full;
/// use hyper::Response;
/// use routerify_tree::prelude::*;
/// use routerify_tree::{Context, Router};
/// use std::convert::Infallible;
///
/// async fn home_handler(_: Context) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("home"))))
/// }
///
/// # fn run() -> Router<Infallible> {
/// // Use Router::builder() method to create a new RouterBuilder instance.
/// // We will use the default error type `Infallible` for the handlers.
/// let router: Router<Infallible> = Router::builder()
///     .get("/", home_handler)
///     .group("/api", |api| {
///         api.get("/books/:id", home_handler)?;
///         api.delete("/books/:id", home_handler)
///     })
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct RouterBuilder<E> {
    inner: crate::Result<Router<E>>,
}

impl<E: Into<RouteError> + 'static> RouterBuilder<E> {
    /// Creates a new `RouterBuilder` instance with default options.
    pub fn new() -> RouterBuilder<E> {
        RouterBuilder::default()
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    pub fn build(self) -> crate::Result<Router<E>> {
        self.inner
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(Router<E>) -> crate::Result<Router<E>>,
    {
        RouterBuilder {
            inner: self.inner.and_then(func),
        }
    }

    /// Adds a new route with `GET` method and the handler at the specified path.
    pub fn get<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::GET, path, handler)
    }

    /// Adds a new route with `POST` method and the handler at the specified path.
    pub fn post<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::POST, path, handler)
    }

    /// Adds a new route with `PUT` method and the handler at the specified path.
    pub fn put<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::PUT, path, handler)
    }

    /// Adds a new route with `DELETE` method and the handler at the specified path.
    pub fn delete<P, H, R>(self, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add(Method::DELETE, path, handler)
    }

    /// Adds a new route with the specified method and the handler at the specified path.
    pub fn add<P, H, R>(self, method: Method, path: P, handler: H) -> Self
    where
        P: AsRef<str>,
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_boxed(method, path, handler::boxed(handler))
    }

    /// Adds a route served by a hand-written [`Handler`](crate::Handler).
    pub fn add_boxed<P: AsRef<str>>(self, method: Method, path: P, handler: BoxedHandler<E>) -> Self {
        self.and_then(move |mut router| {
            router.add_route(method, path.as_ref(), handler)?;
            Ok(router)
        })
    }

    /// Registers the routes added by `func` under `prefix`.
    pub fn group<P, F>(self, prefix: P, func: F) -> Self
    where
        P: Into<String>,
        F: FnOnce(&mut RouteGroup<'_, Router<E>>) -> crate::Result<()>,
    {
        self.and_then(move |mut router| {
            func(&mut router.group(prefix))?;
            Ok(router)
        })
    }
}

impl<E: Into<RouteError> + 'static> Default for RouterBuilder<E> {
    fn default() -> RouterBuilder<E> {
        RouterBuilder {
            inner: Ok(Router::new()),
        }
    }
}

impl<E> Debug for RouterBuilder<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(router) => write!(f, "RouterBuilder {{ {:?} }}", router),
            Err(err) => write!(f, "RouterBuilder {{ error: {} }}", err),
        }
    }
}
