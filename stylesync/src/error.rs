use thiserror::Error;

#[derive(Error, Debug)]
pub enum StyleSyncError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    /// The model gateway failed while analyzing an image.
    #[error("Error analyzing image: {0}")]
    Extraction(String),

    /// The model gateway failed while generating recommendations.
    #[error("Error getting recommendations: {0}")]
    Recommendation(String),

    #[error("Your wardrobe is empty. Add some clothing items first")]
    EmptyWardrobe,

    #[error("No API credential available. Provide an API key to continue")]
    MissingCredential,
}

pub type Result<T> = std::result::Result<T, StyleSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_message_prefix() {
        let error = StyleSyncError::Extraction("quota exhausted".into());
        assert_eq!(error.to_string(), "Error analyzing image: quota exhausted");
    }
}
