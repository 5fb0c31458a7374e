//! Runner configuration.

use crate::config::DEFAULT_REPOSITORY;
use std::fmt;

/// Per-run inputs, normally taken from the workflow environment.
#[derive(Clone)]
pub struct RunnerConfig {
    /// GitHub event name that triggered the run.
    event: String,
    /// Branch the update is based on.
    branch: String,
    /// Token used to create and update PRs.
    token: Option<String>,
    /// Token used to comment on contributor PRs.
    comment_token: Option<String>,
    /// Contributor PR number, as provided by the trigger.
    pr_number: Option<String>,
    /// Repository hosting the PRs, as `owner/name`.
    repository: String,
    /// Contributor repository for cross-fork runs, as `owner/name`.
    fork_repository: Option<String>,
    /// Workflow run identifier for comment links.
    run_id: Option<String>,
}

impl RunnerConfig {
    /// Creates a configuration targeting the default repository, without tokens.
    pub fn new(event: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            branch: branch.into(),
            token: None,
            comment_token: None,
            pr_number: None,
            repository: DEFAULT_REPOSITORY.to_string(),
            fork_repository: None,
            run_id: None,
        }
    }

    /// Sets the repository hosting the PRs.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    /// Sets the token for creating and updating PRs.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets a separate token for posting comments.
    pub fn with_comment_token(mut self, token: impl Into<String>) -> Self {
        self.comment_token = Some(token.into());
        self
    }

    /// Sets the contributor PR number.
    pub fn with_pr_number(mut self, pr_number: impl Into<String>) -> Self {
        self.pr_number = Some(pr_number.into());
        self
    }

    /// Sets the contributor repository.
    pub fn with_fork_repository(mut self, repository: impl Into<String>) -> Self {
        self.fork_repository = Some(repository.into());
        self
    }

    /// Sets the workflow run identifier.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Returns the trigger event name.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the base branch.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Returns the PR token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the comment token, falling back to the PR token.
    pub fn comment_token(&self) -> Option<&str> {
        self.comment_token.as_deref().or(self.token.as_deref())
    }

    /// Returns the raw contributor PR number.
    pub fn pr_number(&self) -> Option<&str> {
        self.pr_number.as_deref()
    }

    /// Returns the repository hosting the PRs.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the contributor repository.
    pub fn fork_repository(&self) -> Option<&str> {
        self.fork_repository.as_deref()
    }

    /// Returns the workflow run identifier.
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("event", &self.event)
            .field("branch", &self.branch)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field(
                "comment_token",
                &self.comment_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("pr_number", &self.pr_number)
            .field("repository", &self.repository)
            .field("fork_repository", &self.fork_repository)
            .field("run_id", &self.run_id)
            .finish()
    }
}
