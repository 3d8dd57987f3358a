mod api;
mod gateway;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use gateway::{complete_structured, GatewayRequest, ImageAttachment, ModelGateway};
pub use provider::{CredentialSource, LlmBackend, LlmProvider};
