use axum::response::{IntoResponse, Response};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    ErrorResponse::from_code(ErrorCode::NotFound).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::from_code(ErrorCode::MethodNotAllowed).into_response()
}
