//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": "INTERNAL_ERROR",
        "message": "An internal server error occurred",
        "developerMessage": ""
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - body is not the expected JSON object",
    content_type = "application/json",
    example = json!({
        "code": "INVALID_JSON",
        "message": "Invalid JSON format",
        "developerMessage": "Failed to deserialize the JSON body into the target type: missing field `email`"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "developerMessage": "username: username is required"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": "NOT_FOUND",
        "message": "Resource not found",
        "developerMessage": "user 65f1c0ffee0000000000abcd not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "code": "SERVICE_UNAVAILABLE",
        "message": "Service is temporarily unavailable",
        "developerMessage": ""
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
