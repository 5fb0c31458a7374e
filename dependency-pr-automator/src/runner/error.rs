//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings or repository name errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Unrecognised trigger event.
    #[error(transparent)]
    Event(#[from] crate::event::EventError),

    /// Changed-dependency query errors.
    #[error(transparent)]
    Dependencies(#[from] crate::dependencies::DependencyError),

    /// Failing git command.
    #[error(transparent)]
    Git(#[from] crate::git::GitError),

    /// GitHub API errors.
    #[error(transparent)]
    PullRequest(#[from] crate::pull_requests::PrError),

    /// Comment template errors.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// An input the selected flow needs was not provided.
    #[error("Missing required input: {name}")]
    MissingInput { name: &'static str },

    /// The PR number is not a positive integer.
    #[error("Invalid PR number '{value}'")]
    InvalidPrNumber { value: String },
}
