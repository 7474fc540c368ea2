use axum::{
    Json,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found(uri: Uri) -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::NotFound.as_str(),
        ErrorCode::NotFound.default_message(),
        format!("no route for {}", uri.path()),
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Handler for 405 Method Not Allowed errors.
///
/// Use with `Router::method_not_allowed_fallback`.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::MethodNotAllowed.as_str(),
        ErrorCode::MethodNotAllowed.default_message(),
        "",
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}

/// Response mapper giving timed-out requests the standard error body.
///
/// `tower_http::timeout::TimeoutLayer` answers with a bare 408; use with
/// `axum::middleware::map_response` outside that layer. A 408 that already
/// carries a content type is left alone.
pub async fn request_timeout_body(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT
        || response.headers().contains_key(header::CONTENT_TYPE)
    {
        return response;
    }

    tracing::warn!(
        error_code = ErrorCode::RequestTimeout.code(),
        "Request exceeded the write timeout"
    );

    let body = Json(ErrorResponse::new(
        ErrorCode::RequestTimeout.as_str(),
        ErrorCode::RequestTimeout.default_message(),
        "",
    ));

    (StatusCode::REQUEST_TIMEOUT, body).into_response()
}
