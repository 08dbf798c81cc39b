use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::config::SearchConfig;
use crate::search::models::{SearchResponse, SearchResultItem};
use crate::search::{SearchError, SearchProvider};

// The provider only takes locale as part of the query payload; we always
// search as US English.
const LANGUAGE_CODE: &str = "en";
const LOCATION_NAME: &str = "United States";

pub struct SearchClient {
    client: Client,
    api_base: String,
    login: String,
    password: String,
}

impl SearchClient {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            login: config.login.clone(),
            password: config.password.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    async fn ping(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .get(format!("{}/v3/appendix/user_data", self.api_base))
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Api {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SearchError> {
        info!("Fetching web results for: {}", query);

        // The live endpoint takes a batch array; we always post a single task.
        let body = json!([{
            "keyword": query,
            "language_code": LANGUAGE_CODE,
            "location_name": LOCATION_NAME,
        }]);

        let response = self
            .client
            .post(format!(
                "{}/v3/serp/google/organic/live/advanced",
                self.api_base
            ))
            .basic_auth(&self.login, Some(&self.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(parsed.into_items())
    }
}
