//! Pull request error types.

use thiserror::Error;

/// Errors that can occur during PR and comment operations.
#[derive(Debug, Error)]
pub enum PrError {
    /// GitHub API error, including any non-2xx response.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}
