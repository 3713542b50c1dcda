use super::RouteRegister;
use crate::handler::BoxedHandler;
use http::Method;

/// A registrar that prepends a path prefix to every route it registers.
///
/// Groups nest: a group created from a group registers under both prefixes. A group is
/// only a registration front, lookups still go through the underlying router.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use http::Method;
/// use http_body_util::Full;
/// use hyper::Response;
/// use routerify_tree::{Error, RouteMatching, RouteRegister, Router};
///
/// let mut router: Router<Error> = Router::new();
/// {
///     let mut api = router.group("/api");
///     api.get("/ping", |_| async { Ok(Response::new(Full::new(Bytes::from("pong")))) })
///         .unwrap();
///
///     let mut v1 = api.group("/v1");
///     v1.get("/books/:id", |_| async { Ok(Response::new(Full::new(Bytes::new()))) })
///         .unwrap();
/// }
///
/// assert!(router.find_route(&Method::GET, "/api/ping").is_some());
/// assert!(router.find_route(&Method::GET, "/api/v1/books/3").is_some());
/// ```
#[derive(Debug)]
pub struct RouteGroup<'a, R> {
    router: &'a mut R,
    prefix: String,
}

impl<'a, R> RouteGroup<'a, R> {
    pub(crate) fn new<P: Into<String>>(router: &'a mut R, prefix: P) -> RouteGroup<'a, R> {
        RouteGroup {
            router,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<'a, E: 'static, R: RouteRegister<E>> RouteRegister<E> for RouteGroup<'a, R> {
    fn add_route(&mut self, method: Method, path: &str, handler: BoxedHandler<E>) -> crate::Result<()> {
        let path = format!("{}{}", self.prefix, path);
        self.router.add_route(method, &path, handler)
    }
}
