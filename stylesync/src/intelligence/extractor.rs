use std::sync::Arc;

use crate::error::{Result, StyleSyncError};
use crate::llm::{complete_structured, prompts, GatewayRequest, ImageAttachment, ModelGateway};
use crate::models::ClothingItem;

/// Turns a clothing photo into a [`ClothingItem`] via the vision model.
#[derive(Clone)]
pub struct AttributeExtractor {
    gateway: Arc<dyn ModelGateway>,
}

impl AttributeExtractor {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Analyze one image. Every gateway failure collapses into
    /// [`StyleSyncError::Extraction`]; nothing is retried here.
    pub async fn analyze(&self, image_bytes: &[u8]) -> Result<ClothingItem> {
        let image = ImageAttachment::from_bytes(image_bytes);
        tracing::debug!(
            image_bytes = image_bytes.len(),
            mime_type = %image.mime_type,
            "Analyzing clothing image"
        );

        let request = GatewayRequest::new(
            prompts::CLOTHING_ITEM_SCHEMA,
            prompts::clothing_analysis_system_prompt(),
            prompts::ANALYSIS_USER_PROMPT.to_string(),
        )
        .with_image(image);

        match complete_structured::<ClothingItem>(self.gateway.as_ref(), &request).await {
            Ok(item) => {
                tracing::info!(category = %item.category, "Clothing item analyzed");
                Ok(item)
            }
            Err(StyleSyncError::MissingCredential) => Err(StyleSyncError::MissingCredential),
            Err(error) => {
                tracing::error!(error = %error, "Error analyzing image");
                Err(StyleSyncError::Extraction(error.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct RecordingGateway {
        reply: Result<Value>,
        requests: Mutex<Vec<GatewayRequest>>,
    }

    impl RecordingGateway {
        fn new(reply: Result<Value>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ModelGateway for RecordingGateway {
        async fn generate_json(&self, request: &GatewayRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(value) => Ok(value.clone()),
                Err(error) => Err(StyleSyncError::Llm(error.to_string())),
            }
        }
    }

    fn tshirt_json() -> Value {
        json!({
            "category": "T-Shirt",
            "description": "Blue cotton tee",
            "color": ["Blue"],
            "gender": "Unisex",
            "fabric": "Cotton",
            "pattern": "Solid",
            "fit": "Regular Fit",
            "sleeve_length": "Short",
            "neck_type": "Round",
            "occasion": ["Casual"],
            "season": ["Summer"],
            "features": ["Breathable"]
        })
    }

    #[tokio::test]
    async fn test_analyze_returns_item_and_sends_image() {
        let gateway = RecordingGateway::new(Ok(tshirt_json()));
        let extractor = AttributeExtractor::new(gateway.clone());

        let item = extractor.analyze(b"jpeg bytes").await.unwrap();
        assert_eq!(item.category, "T-Shirt");

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.schema_name, "ClothingItem");
        assert!(request.system.contains("expert fashion analyst"));
        assert_eq!(request.user_text, prompts::ANALYSIS_USER_PROMPT);
        assert!(request.image.is_some());
    }

    #[tokio::test]
    async fn test_gateway_failure_becomes_extraction_error() {
        let gateway = RecordingGateway::new(Err(StyleSyncError::Llm("timeout".into())));
        let extractor = AttributeExtractor::new(gateway);

        let result = extractor.analyze(b"bytes").await;
        match result {
            Err(StyleSyncError::Extraction(message)) => assert!(message.contains("timeout")),
            other => panic!("Expected extraction error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_incomplete_reply_becomes_extraction_error() {
        let mut reply = tshirt_json();
        reply.as_object_mut().unwrap().remove("fabric");
        let extractor = AttributeExtractor::new(RecordingGateway::new(Ok(reply)));

        let result = extractor.analyze(b"bytes").await;
        match result {
            Err(StyleSyncError::Extraction(message)) => assert!(message.contains("fabric")),
            other => panic!("Expected extraction error, got: {other:?}"),
        }
    }
}
