use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::config::LlmConfig;
use crate::llm::{ChatOptions, ChatResponse, LlmError, LlmProvider, Message};

/// Hosted-deployment chat completion endpoint: the model is chosen by the
/// deployment name baked into the URL, auth is a static `api-key` header.
pub struct DeploymentProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    deployment: String,
    api_version: String,
}

impl DeploymentProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

#[async_trait]
impl LlmProvider for DeploymentProvider {
    fn name(&self) -> &str {
        "azure"
    }

    async fn chat(
        &self,
        messages: &[Message],
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let body = json!({
            "messages": messages,
            "temperature": options.temperature.unwrap_or(0.0),
            "max_tokens": options.max_tokens.unwrap_or(1024),
        });

        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        // A successful call with no content is an empty answer, not an error.
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        Ok(ChatResponse {
            content,
            model: self.deployment.clone(),
        })
    }
}
