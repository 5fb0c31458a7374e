//! Dependency diff backed by an external command.

use super::{ChangeScope, DependencyDiff, DependencyError, DependencyQuery};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs the constraint diff script and reads one package name per stdout line.
///
/// The command is invoked from the query's `src_dir` with
/// `--base-branch <ref> --python-version <version> --src-dir <dir>` appended
/// (`<dir>` made absolute),
/// plus `--all-packages` when every changed package is requested.
#[derive(Debug, Clone)]
pub struct CommandDependencyDiff {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandDependencyDiff {
    /// Builds a diff from a command line whose first element is the program.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::MissingCommand`] if `command` is empty.
    pub fn new(command: &[String], timeout: Duration) -> Result<Self, DependencyError> {
        let (program, args) = command
            .split_first()
            .ok_or(DependencyError::MissingCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    fn query_args(&self, query: &DependencyQuery<'_>, src_dir: &Path) -> Vec<String> {
        let mut args = self.args.clone();
        args.extend([
            "--base-branch".to_string(),
            query.base_ref.to_string(),
            "--python-version".to_string(),
            query.python_version.to_string(),
            "--src-dir".to_string(),
            src_dir.display().to_string(),
        ]);
        if query.scope == ChangeScope::All {
            args.push("--all-packages".to_string());
        }
        args
    }
}

impl DependencyDiff for CommandDependencyDiff {
    async fn changed_dependencies(
        &self,
        query: &DependencyQuery<'_>,
    ) -> Result<Vec<String>, DependencyError> {
        // The command runs inside src_dir, so a relative --src-dir would not resolve.
        let src_dir = std::path::absolute(query.src_dir).map_err(|e| DependencyError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;
        let args = self.query_args(query, &src_dir);
        debug!(program = %self.program, ?args, "Querying changed dependencies");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .current_dir(&src_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| DependencyError::Timeout {
                program: self.program.clone(),
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| DependencyError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(DependencyError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            DependencyError::InvalidOutput {
                program: self.program.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(parse_package_list(&stdout))
    }
}

/// Splits command output into package names, skipping blank lines.
fn parse_package_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
