/// Leading character of a named dynamic segment, e.g. `:id`.
pub(crate) const DYNAMIC_SEGMENT_MARKER: char = ':';

pub(crate) const SEGMENT_SEPARATOR: char = '/';

/// Methods that own a route tree.
pub(crate) const SUPPORTED_METHODS: [http::Method; 4] = [
    http::Method::GET,
    http::Method::POST,
    http::Method::PUT,
    http::Method::DELETE,
];

pub(crate) const NOT_FOUND_MESSAGE: &str = "not found";
pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "inner error";
pub(crate) const BAD_REQUEST_MESSAGE: &str = "bad request";
