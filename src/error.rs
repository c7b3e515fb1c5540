// src/error.rs

use std::{collections::BTreeMap, fmt};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Application error.
/// Every failure a handler can produce is collapsed into one of four status
/// codes: 400, 404, 422 or 500.
#[derive(Debug)]
pub enum AppError {
    // 400 Bad Request
    BadRequest(String),

    // 400 Bad Request, with per-field reasons
    Validation(ValidationErrors),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (entity located but could not be mutated)
    Unprocessable(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fixed human-readable message for each status code the API produces.
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::NOT_FOUND => "The resource you requested was not found",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable entity",
        _ => "Internal server error",
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            AppError::Validation(errors) => write!(f, "validation failed: {errors}"),
            AppError::NotFound(msg) => write!(f, "not found: {msg}"),
            AppError::Unprocessable(msg) => write!(f, "unprocessable: {msg}"),
            AppError::InternalServerError(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

/// Renders `{"error": <code>, "message": <text>}`.
/// Client errors also carry a `detail` string, or a `fields` object for
/// validation failures. Internal errors are logged and never leak detail.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "error": status.as_u16(),
            "message": status_message(status),
        });

        match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
            }
            AppError::Validation(errors) => {
                body["fields"] = field_reasons(&errors);
            }
            AppError::BadRequest(detail)
            | AppError::NotFound(detail)
            | AppError::Unprocessable(detail) => {
                body["detail"] = Value::String(detail);
            }
        }

        (status, Json(body)).into_response()
    }
}

/// Flattens validator output into `{field: [reason, ...]}`, sorted by field.
fn field_reasons(errors: &ValidationErrors) -> Value {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), reasons)
        })
        .collect();

    json!(fields)
}

/// Read-path store failures surface as 500.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Malformed JSON, missing fields and wrong types all become 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// A path segment that does not parse is treated as an unmatched route.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use validator::ValidationError;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_body_echoes_code() {
        let (status, body) = render(AppError::NotFound("Question not found".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], 404);
        assert_eq!(body["message"], "The resource you requested was not found");
        assert_eq!(body["detail"], "Question not found");
    }

    #[tokio::test]
    async fn unprocessable_maps_to_422() {
        let (status, body) = render(AppError::Unprocessable("delete failed".into())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "Unprocessable entity");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let (status, body) =
            render(AppError::InternalServerError("connection refused".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("detail").is_none());
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("answer", ValidationError::new("length"));

        let (status, body) = render(AppError::Validation(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], 400);
        assert_eq!(body["message"], "Bad request");
        assert_eq!(body["fields"]["answer"][0], "length");
    }
}
