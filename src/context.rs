use crate::types::RouteParams;
use bytes::Bytes;
use http::header::{HeaderMap, CONTENT_TYPE};
use http::{Method, Request, StatusCode, Uri};
use http_body_util::Full;
use hyper::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::OnceLock;

type Values = HashMap<String, Vec<String>>;

/// The request-scoped value handed to every route handler.
///
/// It owns the request head, the fully read body, the peer address and the values bound
/// to the dynamic segments of the matched route.
#[derive(Debug)]
pub struct Context {
    request: Request<Bytes>,
    remote_addr: SocketAddr,
    params: RouteParams,
    query_cache: OnceLock<Values>,
    form_cache: OnceLock<Values>,
}

impl Context {
    pub fn new(request: Request<Bytes>, remote_addr: SocketAddr, params: RouteParams) -> Context {
        Context {
            request,
            remote_addr,
            params,
            query_cache: OnceLock::new(),
            form_cache: OnceLock::new(),
        }
    }

    pub fn request(&self) -> &Request<Bytes> {
        &self.request
    }

    pub fn into_request(self) -> Request<Bytes> {
        self.request
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// Returns the header value if it is present and visible ASCII.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.request.headers().get(key).and_then(|val| val.to_str().ok())
    }

    pub fn raw_data(&self) -> &Bytes {
        self.request.body()
    }

    // Route params.

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&String> {
        self.params.get(name)
    }

    /// Parses the route param, falling back to `def` when it is missing or doesn't parse.
    pub fn param_or<T: FromStr>(&self, name: &str, def: T) -> T {
        self.param(name).and_then(|val| val.parse().ok()).unwrap_or(def)
    }

    // Query string.

    pub fn query_all(&self) -> &HashMap<String, Vec<String>> {
        self.query_cache
            .get_or_init(|| parse_urlencoded(self.request.uri().query().unwrap_or_default().as_bytes()))
    }

    pub fn query_string(&self, key: &str, def: &str) -> String {
        last_value(self.query_all(), key).unwrap_or(def).to_owned()
    }

    pub fn query_int(&self, key: &str, def: i64) -> i64 {
        self.query_or(key, def)
    }

    pub fn query_array(&self, key: &str, def: Vec<String>) -> Vec<String> {
        self.query_all().get(key).cloned().unwrap_or(def)
    }

    pub fn query_or<T: FromStr>(&self, key: &str, def: T) -> T {
        parse_last(self.query_all(), key).unwrap_or(def)
    }

    // Url-encoded form body.

    pub fn form_all(&self) -> &HashMap<String, Vec<String>> {
        self.form_cache.get_or_init(|| {
            let is_form = self
                .header(CONTENT_TYPE.as_str())
                .is_some_and(is_form_content_type);
            if is_form {
                parse_urlencoded(self.request.body())
            } else {
                HashMap::new()
            }
        })
    }

    pub fn form_string(&self, key: &str, def: &str) -> String {
        last_value(self.form_all(), key).unwrap_or(def).to_owned()
    }

    pub fn form_int(&self, key: &str, def: i64) -> i64 {
        self.form_or(key, def)
    }

    pub fn form_array(&self, key: &str, def: Vec<String>) -> Vec<String> {
        self.form_all().get(key).cloned().unwrap_or(def)
    }

    pub fn form_or<T: FromStr>(&self, key: &str, def: T) -> T {
        parse_last(self.form_all(), key).unwrap_or(def)
    }

    // Json body.

    pub fn bind_json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_slice(self.request.body())?)
    }

    // Responses.

    pub fn json<T: Serialize + ?Sized>(&self, status: StatusCode, obj: &T) -> crate::Result<Response<Full<Bytes>>> {
        let body = serde_json::to_vec(obj)?;
        respond(status, "application/json", body)
    }

    pub fn text<S: Into<String>>(&self, status: StatusCode, text: S) -> crate::Result<Response<Full<Bytes>>> {
        respond(status, "text/plain; charset=utf-8", text.into())
    }

    pub fn html<S: Into<String>>(&self, status: StatusCode, html: S) -> crate::Result<Response<Full<Bytes>>> {
        respond(status, "text/html; charset=utf-8", html.into())
    }
}

pub(crate) fn respond<B: Into<Bytes>>(
    status: StatusCode,
    content_type: &'static str,
    body: B,
) -> crate::Result<Response<Full<Bytes>>> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Full::new(body.into()))?)
}

/// Media types are case-insensitive and may carry parameters, e.g. `; charset=UTF-8`.
fn is_form_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
}

fn parse_urlencoded(input: &[u8]) -> Values {
    let mut values = Values::new();
    for (key, val) in url::form_urlencoded::parse(input) {
        values.entry(key.into_owned()).or_default().push(val.into_owned());
    }
    values
}

fn last_value<'a>(values: &'a Values, key: &str) -> Option<&'a str> {
    values.get(key).and_then(|vals| vals.last()).map(String::as_str)
}

fn parse_last<T: FromStr>(values: &Values, key: &str) -> Option<T> {
    last_value(values, key).and_then(|val| val.parse().ok())
}
