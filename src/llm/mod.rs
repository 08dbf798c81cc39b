pub mod azure;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use azure::DeploymentProvider;
pub use models::{ChatOptions, ChatResponse, Message};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Completion Error {status}: {body}")]
    Api { status: u16, body: String },
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn chat(
        &self,
        messages: &[Message],
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError>;
}
