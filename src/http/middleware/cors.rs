//! CORS negotiation.
//!
//! `OPTIONS` requests are answered here and never reach the dispatch table.
//! A request carrying `Origin`, `Access-Control-Request-Method` and
//! `Access-Control-Request-Headers` is a preflight and gets the allow-list
//! with the requested headers echoed back unfiltered. Any other `OPTIONS`
//! request gets a bare `Allow` header.
//!
//! Every response leaving the server is then stamped with
//! [`ALLOW_ORIGIN_ANY`] and [`RESPONSE_ALLOW_METHODS`] by the layers from
//! [`response_header_layers`], OPTIONS responses included. That method list
//! differs from [`PREFLIGHT_ALLOW_METHODS`]; both are part of the public
//! contract.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method},
    response::Response,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// `Access-Control-Allow-Origin` on every response.
pub const ALLOW_ORIGIN_ANY: &str = "*";

/// `Access-Control-Allow-Methods` on preflight responses.
pub const PREFLIGHT_ALLOW_METHODS: &str = "GET,HEAD,POST,OPTIONS";

/// `Access-Control-Max-Age` on preflight responses, in seconds.
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// `Allow` on plain OPTIONS responses.
pub const OPTIONS_ALLOW: &str = "GET, HEAD, POST, OPTIONS";

/// `Access-Control-Allow-Methods` stamped on every outgoing response.
pub const RESPONSE_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// How the negotiator sees a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsRequest {
    /// OPTIONS with all three preflight headers; carries the requested headers verbatim.
    Preflight { requested_headers: HeaderValue },
    /// Any other OPTIONS request.
    PlainOptions,
    /// Not OPTIONS; handled by dispatch.
    Simple,
}

/// Classify a request by method and headers.
pub fn classify(method: &Method, headers: &HeaderMap) -> CorsRequest {
    if method != Method::OPTIONS {
        return CorsRequest::Simple;
    }

    let present = |name: header::HeaderName| {
        headers
            .get(name)
            .filter(|v| !v.as_bytes().is_empty())
            .cloned()
    };

    match (
        present(header::ORIGIN),
        present(header::ACCESS_CONTROL_REQUEST_METHOD),
        combined(headers, header::ACCESS_CONTROL_REQUEST_HEADERS),
    ) {
        (Some(_), Some(_), Some(requested_headers)) => CorsRequest::Preflight { requested_headers },
        _ => CorsRequest::PlainOptions,
    }
}

/// Every line of a repeated header joined with `", "`, or `None` when the
/// result is empty.
fn combined(headers: &HeaderMap, name: header::HeaderName) -> Option<HeaderValue> {
    let mut values = headers.get_all(name).iter();
    let first = values.next()?;

    let mut joined = first.as_bytes().to_vec();
    for value in values {
        joined.extend_from_slice(b", ");
        joined.extend_from_slice(value.as_bytes());
    }
    if joined.is_empty() {
        return None;
    }

    HeaderValue::from_bytes(&joined).ok()
}

/// Answer OPTIONS requests; `None` means the request goes on to dispatch.
pub fn classify_and_respond(method: &Method, headers: &HeaderMap) -> Option<Response> {
    match classify(method, headers) {
        CorsRequest::Preflight { requested_headers } => Some(preflight_response(requested_headers)),
        CorsRequest::PlainOptions => Some(options_response()),
        CorsRequest::Simple => None,
    }
}

/// Empty 200 with the preflight allow-list.
pub fn preflight_response(requested_headers: HeaderValue) -> Response {
    let mut response = Response::new(Body::empty());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN_ANY),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(PREFLIGHT_ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static(PREFLIGHT_MAX_AGE),
    );
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested_headers);
    response
}

/// Empty 200 with `Allow`.
pub fn options_response() -> Response {
    let mut response = Response::new(Body::empty());
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(OPTIONS_ALLOW));
    response
}

/// Layers that overwrite the two CORS headers on every response.
pub fn response_header_layers() -> [SetResponseHeaderLayer<HeaderValue>; 2] {
    [
        SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN_ANY),
        ),
        SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(RESPONSE_ALLOW_METHODS),
        ),
    ]
}
