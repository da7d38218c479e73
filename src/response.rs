use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::explainer::ExplainError;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub trace_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub is_operational: bool,
}

impl AppError {
    fn operational(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.to_string(),
            is_operational: true,
        }
    }

    pub fn bad_request(code: &str, message: &str) -> Self {
        Self::operational(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::operational(StatusCode::UNAUTHORIZED, "AUTH_UNAUTHORIZED", message)
    }

    pub fn not_found(message: &str) -> Self {
        Self::operational(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self::operational(StatusCode::CONFLICT, code, message)
    }

    pub fn bad_gateway(code: &str, message: &str) -> Self {
        Self::operational(StatusCode::BAD_GATEWAY, code, message)
    }

    pub fn gateway_timeout(code: &str, message: &str) -> Self {
        Self::operational(StatusCode::GATEWAY_TIMEOUT, code, message)
    }

    pub fn service_unavailable(code: &str, message: &str) -> Self {
        Self::operational(StatusCode::SERVICE_UNAVAILABLE, code, message)
    }

    pub fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR".to_string(),
            message: message.to_string(),
            is_operational: false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Non-operational errors carry internal detail (storage paths, sled
        // messages) that must not reach the client.
        let exposed_message = if self.is_operational {
            self.message.clone()
        } else {
            "Internal server error".to_string()
        };

        if self.is_operational {
            tracing::warn!(status = %self.status, code = %self.code, error = %self.message, "API error");
        } else {
            tracing::error!(status = %self.status, code = %self.code, error = %self.message, "Internal API error");
        }

        (
            self.status,
            Json(ErrorBody {
                success: false,
                code: self.code,
                message: exposed_message,
                trace_id: None,
            }),
        )
            .into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match &value {
            StoreError::Validation(msg) => AppError::bad_request("VALIDATION_ERROR", msg),
            StoreError::NotFound { entity, .. } => {
                AppError::not_found(&format!("{entity} not found"))
            }
            StoreError::Conflict { entity, .. } => {
                AppError::conflict("CONFLICT", &format!("{entity} already exists"))
            }
            _ => AppError::internal(&value.to_string()),
        }
    }
}

impl From<ExplainError> for AppError {
    fn from(value: ExplainError) -> Self {
        match &value {
            ExplainError::Disabled => AppError::service_unavailable(
                "AI_DISABLED",
                "Mistake explanations are not enabled on this server",
            ),
            ExplainError::Timeout => {
                AppError::gateway_timeout("AI_TIMEOUT", "The explanation service timed out")
            }
            ExplainError::Connect(_) => AppError::bad_gateway(
                "AI_CONNECT_ERROR",
                "Could not reach the explanation service",
            ),
            ExplainError::Api { status, .. } => AppError::bad_gateway(
                "AI_UPSTREAM_ERROR",
                &format!("The explanation service returned status {status}"),
            ),
            ExplainError::Parse(_) => AppError::bad_gateway(
                "AI_PARSE_ERROR",
                "The explanation service returned an unreadable response",
            ),
        }
    }
}

pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data,
        }),
    )
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data,
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    use super::*;

    #[tokio::test]
    async fn internal_error_is_redacted() {
        let resp = AppError::internal("sled io failure at /data").into_response();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("sled io failure"));
        assert!(text.contains("Internal server error"));
    }

    #[tokio::test]
    async fn bad_request_keeps_message() {
        let resp = AppError::bad_request("BAD_INPUT", "invalid email").into_response();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("invalid email"));
        assert!(text.contains("BAD_INPUT"));
    }

    #[tokio::test]
    async fn store_not_found_maps_to_404() {
        let err: AppError = StoreError::NotFound {
            entity: "sentence".to_string(),
            key: "42".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let resp = err.into_response();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn explain_errors_map_to_distinct_codes() {
        let timeout: AppError = ExplainError::Timeout.into();
        assert_eq!(timeout.status, StatusCode::GATEWAY_TIMEOUT);

        let parse: AppError = ExplainError::Parse("bad json".to_string()).into();
        assert_eq!(parse.status, StatusCode::BAD_GATEWAY);
        assert_eq!(parse.code, "AI_PARSE_ERROR");

        let disabled: AppError = ExplainError::Disabled.into();
        assert_eq!(disabled.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
