use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};

use crate::api::v1::response::{ApiResponse, ErrorCode};

/// `axum::Json` whose rejections come back as a v1 error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonBodyRejection))]
pub struct AppJson<T>(pub T);

pub struct JsonBodyRejection(ApiResponse<()>);

impl From<JsonRejection> for JsonBodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(map_json_rejection(rejection))
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

fn map_json_rejection(rejection: JsonRejection) -> ApiResponse<()> {
    let message = match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            match extract_missing_field(&message) {
                Some(field) => format!("Missing required field: {field}"),
                None => format!("Invalid JSON: {message}"),
            }
        }
        JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Missing `Content-Type: application/json` header".to_string()
        }
        JsonRejection::BytesRejection(_) => {
            return ApiResponse::error(ErrorCode::InternalError, "Failed to read request body");
        }
        other => other.body_text(),
    };

    ApiResponse::error(ErrorCode::InvalidRequest, message)
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
