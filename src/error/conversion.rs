/**
 * Error Conversion
 *
 * Converts `ApiError` into HTTP responses so handlers can return it directly.
 *
 * # Response Format
 *
 * Errors are returned as JSON:
 *
 * ```json
 * { "message": "Validation failed, entered data is incorrect",
 *   "data": [{ "field": "title", "message": "Title must not be empty" }] }
 * ```
 *
 * `data` is present only for validation errors. Storage and internal faults
 * are logged in full here and surface with a generic message so internal
 * detail never reaches a client.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Validation { errors } => serde_json::json!({
                "message": self.to_string(),
                "data": errors,
            }),
            ApiError::Storage(err) => {
                tracing::error!("Storage fault: {err}");
                serde_json::json!({ "message": "Internal server error" })
            }
            ApiError::Internal(detail) => {
                tracing::error!("Internal fault: {detail}");
                serde_json::json!({ "message": "Internal server error" })
            }
            _ => serde_json::json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
