//! Dependency diff error types.

use thiserror::Error;

/// Errors that can occur while querying changed dependencies.
#[derive(Debug, Error)]
pub enum DependencyError {
    /// The diff command could not be started.
    #[error("Failed to execute dependency diff '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The diff command exited with a non-zero status.
    #[error("Dependency diff '{program}' failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The diff command did not finish within the configured timeout.
    #[error("Dependency diff '{program}' timed out after {timeout_secs} seconds")]
    Timeout { program: String, timeout_secs: u64 },

    /// The diff command wrote something other than UTF-8 package names.
    #[error("Dependency diff '{program}' produced invalid output: {message}")]
    InvalidOutput { program: String, message: String },

    /// No command was configured.
    #[error("No dependency diff command configured")]
    MissingCommand,
}
