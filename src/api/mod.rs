pub mod models;
pub mod routes;

use thiserror::Error;

use crate::llm::LlmError;
use crate::search::SearchError;

/// Anything that goes wrong between the search fetch and the final response.
/// Caught at one boundary in the handler and reported as a 500 whose body is
/// this error's display text.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Search(#[from] SearchError),
    #[error("{0}")]
    Completion(#[from] LlmError),
}
