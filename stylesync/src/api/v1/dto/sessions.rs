use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::llm::CredentialSource;
use crate::services::Session;

/// Body of `POST /sessions`. The whole body is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Model credential for this session only. Falls back to the server's
    /// environment credential when omitted.
    #[validate(length(max = 512, message = "must be at most 512 characters"))]
    pub api_key: Option<String>,
}

/// Body of `PUT /sessions/{sessionId}/credential`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequest {
    #[validate(length(min = 1, max = 512, message = "must be between 1 and 512 characters"))]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    /// Whether analysis and recommendations can run.
    pub bot_ready: bool,
    pub credential_source: CredentialSource,
    /// Provider misconfiguration that no API key can fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_reason: Option<String>,
    pub item_count: usize,
}

impl SessionResponse {
    pub async fn from_session(session: &Session) -> Self {
        let stylist = session.stylist();
        Self {
            session_id: session.id().to_string(),
            created_at: session.created_at(),
            bot_ready: stylist.is_ready(),
            credential_source: stylist.credential_source(),
            unavailable_reason: stylist.unavailable_reason().map(str::to_string),
            item_count: session.item_count().await,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSessionResponse {
    pub session_id: String,
    pub deleted: bool,
}
