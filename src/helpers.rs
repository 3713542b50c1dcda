use crate::constants::{DYNAMIC_SEGMENT_MARKER, SUPPORTED_METHODS};
use http::Method;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Returns `true` if the segment names a dynamic parameter, e.g. `:id`.
pub(crate) fn is_dynamic_segment(segment: &str) -> bool {
    segment.starts_with(DYNAMIC_SEGMENT_MARKER)
}

/// Literal segments are stored and compared upper-cased; dynamic segments keep their parameter name as written.
pub(crate) fn canonical_segment(segment: &str) -> Cow<'_, str> {
    if is_dynamic_segment(segment) {
        return Cow::Borrowed(segment);
    }

    let upper = segment.to_uppercase();
    if upper == segment {
        Cow::Borrowed(segment)
    } else {
        Cow::Owned(upper)
    }
}

/// Maps any casing of a supported method name onto its standard `Method`.
pub(crate) fn canonical_method(method: &Method) -> Option<Method> {
    let upper = method.as_str().to_ascii_uppercase();
    SUPPORTED_METHODS.iter().find(|m| m.as_str() == upper).cloned()
}

/// Canonical key for a whole path, used by the flat-map router.
pub(crate) fn canonical_path(path: &str) -> String {
    path.to_uppercase()
}

pub(crate) fn percent_decode_request_path(val: &str) -> crate::Result<String> {
    percent_decode_str(val)
        .decode_utf8()
        .map(|val| val.to_string())
        .map_err(|e| crate::Error::InvalidPath(e.to_string()))
}
