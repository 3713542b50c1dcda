use crate::context::Context;
use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The future returned by a route handler.
pub type HandlerFuture<E> = Pin<Box<dyn Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static>>;

/// A shared, type-erased route handler as stored in the route trees.
pub type BoxedHandler<E> = Arc<dyn Handler<E>>;

/// Something that turns a request [`Context`] into a response or fails with `E`.
///
/// Every `async fn(Context) -> Result<Response<Full<Bytes>>, E>` and every closure of the
/// same shape is a handler. Implement it by hand for handlers that carry their own state.
pub trait Handler<E>: Send + Sync + 'static {
    fn handle(&self, ctx: Context) -> HandlerFuture<E>;
}

impl<E, F, R> Handler<E> for F
where
    F: Fn(Context) -> R + Send + Sync + 'static,
    R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
{
    fn handle(&self, ctx: Context) -> HandlerFuture<E> {
        Box::pin(self(ctx))
    }
}

pub(crate) fn boxed<E, H, R>(handler: H) -> BoxedHandler<E>
where
    E: 'static,
    H: Fn(Context) -> R + Send + Sync + 'static,
    R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
{
    Arc::new(handler)
}
