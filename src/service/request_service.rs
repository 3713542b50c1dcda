use crate::constants::{BAD_REQUEST_MESSAGE, INTERNAL_ERROR_MESSAGE, NOT_FOUND_MESSAGE};
use crate::context::{self, Context};
use crate::helpers;
use crate::router::RouteMatching;
use crate::{Error, RouteError};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::{service::Service, Request, Response, StatusCode};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// Serves the requests of one connection: route lookup, handler call and the
/// translation of a missing route or a failed handler into a response.
pub struct RequestService<R> {
    pub(crate) router: Arc<R>,
    pub(crate) remote_addr: SocketAddr,
}

impl<R, T> Service<Request<T>> for RequestService<R>
where
    R: RouteMatching + Send + Sync + 'static,
    R::Error: Into<RouteError>,
    T: Body + Send + 'static,
    T::Data: Send,
    T::Error: Into<RouteError>,
{
    type Response = Response<Full<Bytes>>;
    type Error = RouteError;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<T>) -> Self::Future {
        Box::pin(serve(self.router.clone(), self.remote_addr, req))
    }
}

async fn serve<R, T>(router: Arc<R>, remote_addr: SocketAddr, req: Request<T>) -> Result<Response<Full<Bytes>>, RouteError>
where
    R: RouteMatching + Send + Sync + 'static,
    R::Error: Into<RouteError>,
    T: Body + Send + 'static,
    T::Data: Send,
    T::Error: Into<RouteError>,
{
    let method = req.method().clone();

    let target_path = match helpers::percent_decode_request_path(req.uri().path()) {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(%method, error = %err, "rejecting request path");
            return Ok(message(StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE)?);
        }
    };

    let Some((handler, params)) = router
        .find_route(&method, &target_path)
        .map(|found| (Arc::clone(found.handler), found.params))
    else {
        tracing::debug!(%method, path = %target_path, "route not found");
        return Ok(message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)?);
    };

    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            let err: RouteError = err.into();
            let err = Error::Body(err.to_string());
            tracing::warn!(%method, path = %target_path, error = %err, "rejecting request");
            return Ok(message(StatusCode::BAD_REQUEST, BAD_REQUEST_MESSAGE)?);
        }
    };

    let ctx = Context::new(Request::from_parts(parts, body), remote_addr, params);

    match handler.handle(ctx).await {
        Ok(res) => Ok(res),
        Err(err) => {
            let err: RouteError = err.into();
            tracing::warn!(%method, path = %target_path, error = %err, "route handler failed");
            Ok(message(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)?)
        }
    }
}

/// A JSON string body, e.g. `"not found"`.
fn message(status: StatusCode, text: &str) -> crate::Result<Response<Full<Bytes>>> {
    let body = serde_json::to_vec(text)?;
    context::respond(status, "application/json", body)
}

#[derive(Debug)]
pub struct RequestServiceBuilder<R> {
    router: Arc<R>,
}

impl<R: RouteMatching> RequestServiceBuilder<R> {
    pub fn new(router: R) -> RequestServiceBuilder<R> {
        Self {
            router: Arc::from(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<R> {
        RequestService {
            router: self.router.clone(),
            remote_addr,
        }
    }
}
