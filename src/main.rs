use bytes::Bytes;
use http_body_util::Full;
use hyper::service::Service;
use hyper::{Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use routerify_tree::prelude::*;
use routerify_tree::{Context, Error, Router, RouterService};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ADDR_ENV: &str = "ROUTERIFY_TREE_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Serialize, Deserialize)]
struct Book {
    id: u64,
    title: String,
}

// A handler for "/" page.
async fn home_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
    ctx.text(StatusCode::OK, "Home page")
}

// A handler for "/book/:id".
async fn book_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
    let id = ctx.param_or("id", 0u64);
    let title = ctx.query_string("title", "untitled");
    ctx.json(StatusCode::OK, &Book { id, title })
}

async fn create_book_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
    let book: Book = ctx.bind_json()?;
    ctx.json(StatusCode::CREATED, &book)
}

async fn delete_book_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
    ctx.json(StatusCode::OK, &format!("deleted {}", ctx.param_or("id", 0u64)))
}

async fn ping_handler(ctx: Context) -> Result<Response<Full<Bytes>>, Error> {
    ctx.text(StatusCode::OK, "pong")
}

fn router() -> routerify_tree::Result<Router<Error>> {
    let mut router = Router::builder()
        .get("/", home_handler)
        .get("/book/:id", book_handler)
        .post("/book", create_book_handler)
        .delete("/book/:id", delete_book_handler)
        .build()?;

    let mut api = router.group("/api");
    api.get("/ping", ping_handler)?;

    Ok(router)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routerify_tree=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An ambiguous route table is a programming error: refuse to start.
    let router = match router() {
        Ok(router) => router,
        Err(err) => {
            tracing::error!(error = %err, "invalid route table");
            std::process::exit(1);
        }
    };

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let addr: SocketAddr = match addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            tracing::error!(%addr, error = %err, "invalid listen address");
            std::process::exit(1);
        }
    };

    // Create a Service from the router above to handle incoming requests.
    let service = Arc::new(RouterService::new(router));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "couldn't bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "App is running");

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let service = Arc::clone(&service);

                tokio::task::spawn(async move {
                    let request_service = match service.call(&stream).await {
                        Ok(request_service) => request_service,
                        Err(never) => match never {},
                    };
                    let io = TokioIo::new(stream);
                    let builder = Builder::new(TokioExecutor::new());

                    if let Err(err) = builder.serve_connection(io, request_service).await {
                        tracing::error!(error = %err, "Error serving connection");
                    }
                });
            }
            Err(err) => {
                tracing::error!(error = %err, "Error accepting connection");
            }
        }
    }
}
