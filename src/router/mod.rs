use crate::constants::SUPPORTED_METHODS;
use crate::context::Context;
use crate::handler::{self, BoxedHandler};
use crate::helpers::{self, canonical_method};
use crate::tree::{Match, Tree};
use crate::{Error, RouteError};
use bytes::Bytes;
use http::{Method, Request};
use http_body_util::Full;
use hyper::Response;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

pub use self::builder::RouterBuilder;
pub use self::group::RouteGroup;
pub use self::simple::SimpleRouter;

mod builder;
mod group;
mod simple;

/// The registration side of a router.
///
/// Implementors only provide [`add_route`](RouteRegister::add_route); the per-method
/// shortcuts and [`group`](RouteRegister::group) are built on top of it. A duplicate
/// pattern is reported as [`Error::DuplicateRoute`] and should be treated as a fatal
/// configuration error by the application.
pub trait RouteRegister<E: 'static> {
    fn add_route(&mut self, method: Method, path: &str, handler: BoxedHandler<E>) -> crate::Result<()>;

    fn get<H, R>(&mut self, path: &str, handler: H) -> crate::Result<()>
    where
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_route(Method::GET, path, handler::boxed(handler))
    }

    fn post<H, R>(&mut self, path: &str, handler: H) -> crate::Result<()>
    where
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_route(Method::POST, path, handler::boxed(handler))
    }

    fn put<H, R>(&mut self, path: &str, handler: H) -> crate::Result<()>
    where
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_route(Method::PUT, path, handler::boxed(handler))
    }

    fn delete<H, R>(&mut self, path: &str, handler: H) -> crate::Result<()>
    where
        H: Fn(Context) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.add_route(Method::DELETE, path, handler::boxed(handler))
    }

    /// Returns a registrar that prefixes every path with `prefix` before delegating to `self`.
    fn group<P: Into<String>>(&mut self, prefix: P) -> RouteGroup<'_, Self>
    where
        Self: Sized,
    {
        RouteGroup::new(self, prefix)
    }
}

/// The matching side of a router: finds the handler for a method and a path.
pub trait RouteMatching {
    type Error: 'static;

    fn find_route(&self, method: &Method, path: &str) -> Option<Match<'_, BoxedHandler<Self::Error>>>;

    /// Looks the request up by its method and its percent-decoded path, the same way
    /// [`RequestService`](crate::RequestService) does. A path that doesn't decode to UTF-8
    /// matches nothing.
    fn find_route_by_request<B>(&self, req: &Request<B>) -> Option<Match<'_, BoxedHandler<Self::Error>>> {
        let path = helpers::percent_decode_request_path(req.uri().path()).ok()?;
        self.find_route(req.method(), &path)
    }
}

/// The dynamic router: one segment [`Tree`] per supported method.
///
/// Routes are registered during startup, then the router is shared read-only between
/// the connections, see [`RouterService`](crate::RouterService).
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use http::Method;
/// use http_body_util::Full;
/// use hyper::Response;
/// use routerify_tree::{Context, Error, RouteMatching, RouteRegister, Router};
///
/// async fn book(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
///     let id = ctx.param("id").cloned().unwrap_or_default();
///     Ok(Response::new(Full::new(Bytes::from(id))))
/// }
///
/// let mut router: Router<Error> = Router::new();
/// router.get("/book/:id", book).unwrap();
///
/// let found = router.find_route(&Method::GET, "/BOOK/123").unwrap();
/// assert_eq!(found.params.get("id").unwrap(), "123");
/// assert!(router.find_route(&Method::POST, "/book/123").is_none());
/// ```
pub struct Router<E> {
    trees: HashMap<Method, Tree<BoxedHandler<E>>>,
}

impl<E: Into<RouteError> + 'static> Router<E> {
    pub fn new() -> Router<E> {
        Router {
            trees: SUPPORTED_METHODS
                .iter()
                .map(|method| (method.clone(), Tree::new(method.clone())))
                .collect(),
        }
    }

    /// Return a [RouterBuilder](./struct.RouterBuilder.html) instance to build a `Router`.
    pub fn builder() -> RouterBuilder<E> {
        RouterBuilder::new()
    }

    /// The route tree of a method, in any casing.
    pub fn tree(&self, method: &Method) -> Option<&Tree<BoxedHandler<E>>> {
        canonical_method(method).and_then(|method| self.trees.get(&method))
    }

    /// Number of registered routes across all methods.
    pub fn len(&self) -> usize {
        self.trees.values().map(Tree::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.values().all(Tree::is_empty)
    }
}

impl<E: Into<RouteError> + 'static> Default for Router<E> {
    fn default() -> Self {
        Router::new()
    }
}

impl<E: 'static> RouteRegister<E> for Router<E> {
    fn add_route(&mut self, method: Method, path: &str, handler: BoxedHandler<E>) -> crate::Result<()> {
        let tree = canonical_method(&method)
            .and_then(|method| self.trees.get_mut(&method))
            .ok_or_else(|| Error::UnsupportedMethod(method.clone()))?;

        tree.add_route(path, handler)
    }
}

impl<E: 'static> RouteMatching for Router<E> {
    type Error = E;

    fn find_route(&self, method: &Method, path: &str) -> Option<Match<'_, BoxedHandler<E>>> {
        let tree = canonical_method(method).and_then(|method| self.trees.get(&method))?;
        let found = tree.find(path);

        if found.is_none() {
            tracing::trace!(%method, path, "no route matched");
        }

        found
    }
}

impl<E> Debug for Router<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for method in SUPPORTED_METHODS.iter() {
            if let Some(tree) = self.trees.get(method) {
                Debug::fmt(tree, f)?;
            }
        }
        Ok(())
    }
}
