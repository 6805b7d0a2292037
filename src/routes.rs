use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;
use crate::handlers;
use crate::middleware::{access_log, with_cors};
use crate::services::AnswerService;

/// Maximum accepted `/ask` body, in bytes.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn routes(
    service: Arc<AnswerService>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    let with_service = warp::any().map(move || service.clone());

    let health_check = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| "OK");

    let status = warp::path("status")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service.clone())
        .map(handlers::status);

    let ask = warp::path("ask")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_service)
        .and_then(handlers::ask);

    let preflight = warp::method().and_then(handlers::preflight);

    health_check
        .or(status)
        .or(ask)
        .or(preflight)
        .recover(handlers::handle_rejection)
        .map(|reply| with_cors(reply))
        .with(access_log())
}
