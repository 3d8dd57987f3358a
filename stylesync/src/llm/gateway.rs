//! The seam between the stylist and the hosted model.
//!
//! Callers describe one round-trip as a [`GatewayRequest`]: a system
//! instruction, a user message that may carry an image, and the name of the
//! output schema the instruction asks for. A [`ModelGateway`] answers with a
//! JSON value; [`complete_structured`] decodes it strictly into the target
//! record type.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, StyleSyncError};

/// MIME type used when the image bytes cannot be sniffed.
pub const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub base64_data: String,
}

impl ImageAttachment {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime_type = infer::get(bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| FALLBACK_IMAGE_MIME.to_string());

        Self {
            mime_type,
            base64_data: STANDARD.encode(bytes),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub system: String,
    pub user_text: String,
    pub image: Option<ImageAttachment>,
    pub schema_name: &'static str,
}

impl GatewayRequest {
    pub fn new(schema_name: &'static str, system: String, user_text: String) -> Self {
        Self {
            system,
            user_text,
            image: None,
            schema_name,
        }
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }
}

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Run one prompt/response round-trip and return the parsed JSON reply.
    async fn generate_json(&self, request: &GatewayRequest) -> Result<Value>;
}

/// Run `request` and decode the reply into `T`, rejecting replies that miss
/// required fields.
pub async fn complete_structured<T: DeserializeOwned>(
    gateway: &dyn ModelGateway,
    request: &GatewayRequest,
) -> Result<T> {
    let value = gateway.generate_json(request).await?;

    serde_json::from_value(value).map_err(|e| {
        StyleSyncError::Llm(format!(
            "Response did not match the {} schema: {e}",
            request.schema_name
        ))
    })
}
