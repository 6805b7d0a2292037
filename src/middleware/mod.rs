use hyper::{HeaderMap, header::{HeaderName, HeaderValue}};
use tracing::info;
use warp::log::{Info, Log};
use warp::Reply;


pub fn add_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("Content-Type"),
    );
}

pub fn with_cors(reply: impl Reply) -> warp::reply::Response {
    let mut response = reply.into_response();
    add_cors_headers(response.headers_mut());
    response
}

/// One structured event per request: method, path, status, latency.
pub fn access_log() -> Log<impl Fn(Info<'_>) + Copy + Send + Sync + 'static> {
    warp::log::custom(|info: Info<'_>| {
        info!(
            method = %info.method(),
            path = info.path(),
            status = info.status().as_u16(),
            elapsed_ms = info.elapsed().as_millis() as u64,
            "request"
        );
    })
}
