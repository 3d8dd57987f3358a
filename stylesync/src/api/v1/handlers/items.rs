//! v1 Wardrobe handlers.
//!
//! Upload-and-analyze, listing, single-item lookup, stats, and the raw JSON
//! download. Everything except the download is wrapped in [`ApiResponse`].

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;

use crate::api::v1::dto::ListItemsResponse;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::WardrobeItem;
use crate::services::{Session, WardrobeStats, EXPORT_FILE_NAME};

/// `POST /api/v1/sessions/{sessionId}/items:analyze`
///
/// Accepts a multipart form with a single image in the `file` field,
/// analyzes it, and appends the result to the wardrobe. Returns 201 with
/// the stored item. A failed analysis leaves the wardrobe untouched.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/items:analyze",
    tag = "wardrobe",
    operation_id = "items.analyze",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body(content_type = "multipart/form-data", content = String, description = "Clothing photo in the `file` field (JPEG, PNG or WebP)"),
    responses(
        (status = 201, description = "Item analyzed and stored", body = WardrobeItem),
        (status = 400, description = "Missing or unreadable file", body = ApiError),
        (status = 401, description = "No model credential for this session", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 413, description = "Image too large", body = ApiError),
        (status = 502, description = "Model gateway failed", body = ApiError),
    )
)]
pub async fn analyze_item(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    mut multipart: Multipart,
) -> ApiResponse<WardrobeItem> {
    let max_bytes = state.config.wardrobe.max_upload_bytes;
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(e.status(), e.body_text(), max_bytes),
        };

        if field.name() != Some("file") {
            continue;
        }

        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => return multipart_error(e.status(), e.body_text(), max_bytes),
        };

        if bytes.len() > max_bytes {
            return too_large(bytes.len(), max_bytes);
        }

        file_bytes = Some(bytes.to_vec());
        break;
    }

    let Some(file_bytes) = file_bytes else {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Missing `file` field");
    };
    if file_bytes.is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Uploaded file is empty");
    }

    match session.analyze_and_add(&file_bytes).await {
        Ok(item) => ApiResponse::created(item),
        Err(e) => e.into(),
    }
}

fn multipart_error(status: StatusCode, detail: String, max_bytes: usize) -> ApiResponse<WardrobeItem> {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiResponse::error(
            ErrorCode::PayloadTooLarge,
            format!("File too large (max {max_bytes} bytes)"),
        );
    }
    ApiResponse::error(ErrorCode::InvalidRequest, format!("Failed to read upload: {detail}"))
}

fn too_large(size: usize, max_bytes: usize) -> ApiResponse<WardrobeItem> {
    ApiResponse::error(
        ErrorCode::PayloadTooLarge,
        format!("File too large: {size} bytes (max {max_bytes} bytes)"),
    )
}

/// `GET /api/v1/sessions/{sessionId}/items`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/items",
    tag = "wardrobe",
    operation_id = "items.list",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Wardrobe items in insertion order", body = ListItemsResponse),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn list_items(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResponse<ListItemsResponse> {
    let wardrobe = session.wardrobe().await;
    ApiResponse::success(ListItemsResponse {
        total: wardrobe.len(),
        items: wardrobe.list().to_vec(),
    })
}

/// `GET /api/v1/sessions/{sessionId}/items/{itemId}`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/items/{itemId}",
    tag = "wardrobe",
    operation_id = "items.get",
    params(
        ("sessionId" = String, Path, description = "Session ID"),
        ("itemId" = String, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Item found", body = WardrobeItem),
        (status = 404, description = "Session or item not found", body = ApiError),
    )
)]
pub async fn get_item(
    Extension(session): Extension<Arc<Session>>,
    Path((_session_id, item_id)): Path<(String, String)>,
) -> ApiResponse<WardrobeItem> {
    match session.get_item(&item_id).await {
        Some(item) => ApiResponse::success(item),
        None => ApiResponse::error(ErrorCode::NotFound, format!("Item {item_id} not found")),
    }
}

/// `GET /api/v1/sessions/{sessionId}/stats`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/stats",
    tag = "wardrobe",
    operation_id = "items.stats",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Wardrobe statistics", body = WardrobeStats),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn wardrobe_stats(
    Extension(session): Extension<Arc<Session>>,
) -> ApiResponse<WardrobeStats> {
    ApiResponse::success(session.wardrobe().await.stats())
}

/// `GET /api/v1/sessions/{sessionId}/wardrobe:export`
///
/// Raw pretty-printed JSON array, served as a file download rather than
/// inside the envelope.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/wardrobe:export",
    tag = "wardrobe",
    operation_id = "wardrobe.export",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Wardrobe download", body = Vec<WardrobeItem>, content_type = "application/json"),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn export_wardrobe(Extension(session): Extension<Arc<Session>>) -> Response {
    match session.wardrobe().await.export() {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => ApiResponse::<()>::from(e).into_response(),
    }
}
