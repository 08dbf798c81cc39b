pub mod client;
pub mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use client::SearchClient;
pub use models::SearchResultItem;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("Search API Error {status}: {body}")]
    Api { status: u16, body: String },
}

/// Seam between the pipeline and the search provider. The probe and the
/// organic query are separate calls because the probe runs before request
/// validation and never fetches data.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Lightweight authenticated status call. Ok(()) means reachable.
    async fn ping(&self) -> Result<(), SearchError>;

    /// One organic query, normalized. A response with no items is Ok(vec![]).
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SearchError>;
}
