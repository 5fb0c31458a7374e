//! Git operations on the local checkout.
//!
//! Every command runs as a child process with the checkout as its working
//! directory, so the automator never changes its own current directory and
//! there is nothing to restore when a command fails. Any non-zero exit is
//! returned as an error and aborts the run.

mod error;
mod identity;

pub use error::GitError;
pub use identity::{AuthorIdentity, AuthorScope};

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// A git working tree driven through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
    timeout: Duration,
}

impl GitRepository {
    /// Wraps the checkout at `path`; each git invocation is bounded by `timeout`.
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    /// Returns the checkout path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the commit author identity into git config.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if either `git config` call fails.
    pub async fn configure_author(
        &self,
        identity: &AuthorIdentity,
        scope: AuthorScope,
    ) -> Result<(), GitError> {
        debug!(name = %identity.name, scope = scope.as_flag(), "Configuring git author");
        self.run(&["config", scope.as_flag(), "user.name", &identity.name])
            .await?;
        self.run(&["config", scope.as_flag(), "user.email", &identity.email])
            .await
    }

    /// Creates or resets `branch` at the current HEAD and switches to it.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if `git checkout` fails.
    pub async fn checkout_branch(&self, branch: &str) -> Result<(), GitError> {
        debug!(branch, "Checking out branch");
        self.run(&["checkout", "-B", branch]).await
    }

    /// Stages modifications and deletions of tracked files.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if `git add` fails.
    pub async fn stage_tracked(&self) -> Result<(), GitError> {
        self.run(&["add", "-u"]).await
    }

    /// Commits the staged changes.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if `git commit` fails, including when nothing is staged.
    pub async fn commit(&self, message: &str) -> Result<(), GitError> {
        debug!(message, "Committing");
        self.run(&["commit", "-m", message]).await
    }

    /// Switches to `branch` (resetting it to HEAD), stages tracked changes and
    /// commits them with `message`.
    ///
    /// # Errors
    ///
    /// Returns the first failing git command.
    pub async fn create_commit(&self, branch: &str, message: &str) -> Result<(), GitError> {
        self.checkout_branch(branch).await?;
        self.stage_tracked().await?;
        self.commit(message).await
    }

    /// Force-pushes `branch` to `remote` and sets it as upstream.
    ///
    /// This overwrites the remote branch history, which keeps re-runs idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if `git push` fails.
    pub async fn force_push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        info!(remote, branch, "Force pushing");
        self.run(&["push", "--force", "--set-upstream", remote, branch])
            .await
    }

    /// Runs a git command in the checkout, failing on a non-zero exit.
    async fn run(&self, args: &[&str]) -> Result<(), GitError> {
        let command = args.join(" ");

        let mut child = Command::new("git");
        child
            .args(args)
            .current_dir(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, child.output())
            .await
            .map_err(|_| GitError::Timeout {
                command: command.clone(),
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| GitError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::Failed {
                command,
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(())
    }
}
