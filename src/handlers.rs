use std::convert::Infallible;
use std::sync::Arc;
use hyper::{Method, StatusCode};
use serde_json::json;
use tracing::debug;
use warp::Reply;
use crate::errors::ApiError;
use crate::knowledge::{ASSISTANT_NAME, GREETING};
use crate::models::{AskRequest, AskResponse, StatusResponse};
use crate::services::AnswerService;


/// Every accepted question gets a 200 with a customer-facing answer,
/// including rate-limit and upstream failures.
pub async fn ask(req: AskRequest, service: Arc<AnswerService>) -> Result<impl Reply, warp::Rejection> {
    if req.question.trim().is_empty() {
        return Err(warp::reject::custom(ApiError::EmptyQuestion));
    }
    let answer = service.answer(&req.question).await;
    Ok(warp::reply::json(&AskResponse { answer }))
}

pub fn status(service: Arc<AnswerService>) -> impl Reply {
    warp::reply::json(&StatusResponse {
        online: service.is_online(),
        assistant: ASSISTANT_NAME.to_string(),
        greeting: GREETING.to_string(),
    })
}

/// CORS preflight on any path. Other methods fall through as "not found" so
/// unknown routes keep reporting 404 rather than 405.
pub async fn preflight(method: Method) -> Result<StatusCode, warp::Rejection> {
    if method == Method::OPTIONS {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(warp::reject::not_found())
    }
}

pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if let Some(e) = err.find::<ApiError>() {
        match e {
            ApiError::EmptyQuestion => (StatusCode::BAD_REQUEST, "Question must not be empty"),
        }
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Expected a JSON body like {\"question\": \"...\"}")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Content-Type must be application/json")
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length header is required")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Question too long")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        debug!(?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(warp::reply::with_status(warp::reply::json(&json!({ "error": message })), code))
}
