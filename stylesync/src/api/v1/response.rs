//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint except the wardrobe download returns an
//! [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                                    // present on success
//!   "error": { "code": "empty_wardrobe", "message": "..." }  // present on error
//! }
//! ```
//!
//! ## ID Formats
//!
//! - **sessionId**: nanoid, 21 characters (e.g. `"V1StGXR8_Z5jdHi6B-myT"`)
//! - **itemId**: positive integer assigned in insertion order, starting at 1.
//!   Path lookups also accept the textual form.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::StyleSyncError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed or failed validation. HTTP 400.
    InvalidRequest,
    /// No model credential is available for this session. HTTP 401.
    MissingCredential,
    /// The session or item does not exist. HTTP 404.
    NotFound,
    /// Recommendations were requested for an empty wardrobe. HTTP 409.
    EmptyWardrobe,
    /// The uploaded image exceeds the configured size limit. HTTP 413.
    PayloadTooLarge,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
    /// The model gateway failed. HTTP 502.
    GatewayError,
}

impl ErrorCode {
    /// Returns the HTTP status code corresponding to this error code.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::MissingCredential => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::EmptyWardrobe => StatusCode::CONFLICT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::GatewayError => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::MissingCredential => write!(f, "missing_credential"),
            Self::NotFound => write!(f, "not_found"),
            Self::EmptyWardrobe => write!(f, "empty_wardrobe"),
            Self::PayloadTooLarge => write!(f, "payload_too_large"),
            Self::InternalError => write!(f, "internal_error"),
            Self::GatewayError => write!(f, "gateway_error"),
        }
    }
}

/// Structured error payload within the API envelope.
///
/// ```json
/// { "code": "not_found", "message": "Item 7 not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    pub message: String,
}

/// Canonical v1 API response envelope.
///
/// On success, `data` is present and `error` is absent. On error, `error`
/// is present and `data` is absent. The HTTP status is derived from the
/// error code or set through constructors like [`ApiResponse::created`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Resource created response (HTTP 201).
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::CREATED,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<StyleSyncError> for ApiResponse<T> {
    /// Convert a [`StyleSyncError`] into a v1 [`ApiResponse`].
    ///
    /// Gateway failures keep their user-facing message. Plumbing failures
    /// are logged and replaced with a generic message.
    fn from(err: StyleSyncError) -> Self {
        match err {
            StyleSyncError::NotFound(msg) => ApiResponse::error(ErrorCode::NotFound, msg),

            StyleSyncError::Validation(msg) => ApiResponse::error(ErrorCode::InvalidRequest, msg),

            StyleSyncError::MissingCredential => {
                ApiResponse::error(ErrorCode::MissingCredential, err.to_string())
            }

            StyleSyncError::EmptyWardrobe => {
                ApiResponse::error(ErrorCode::EmptyWardrobe, err.to_string())
            }

            StyleSyncError::Extraction(_) | StyleSyncError::Recommendation(_) => {
                ApiResponse::error(ErrorCode::GatewayError, err.to_string())
            }

            StyleSyncError::Llm(_)
            | StyleSyncError::LlmUnavailable(_)
            | StyleSyncError::LlmRateLimit { .. } => {
                tracing::warn!(error = %err, "Gateway error mapped to v1 response");
                ApiResponse::error(ErrorCode::GatewayError, err.to_string())
            }

            ref internal @ (StyleSyncError::Json(_)
            | StyleSyncError::Io(_)
            | StyleSyncError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
