//! Commit, pull request and comment text.
//!
//! Title, description and branch formats must stay byte-for-byte stable:
//! existing update PRs are found by branch name.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{CommentContext, TemplateRenderer};

/// Title used when no direct dependency changed.
pub const INDIRECT_UPDATE_TITLE: &str = "Update indirect dependencies";

/// Prefix of every update branch.
pub const UPDATE_BRANCH_PREFIX: &str = "auto-update-dependencies";

/// Commit title and PR body for one set of dependency changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Commit message and PR title.
    pub title: String,

    /// PR description.
    pub body: String,
}

impl ChangeSummary {
    /// Formats the direct and full change lists.
    #[must_use]
    pub fn from_changes(direct: &[String], all: &[String]) -> Self {
        Self {
            title: commit_title(direct),
            body: long_description(all),
        }
    }
}

/// Generates the commit title from the changed direct dependencies.
///
/// Format: "Update `a`, `b`", or "Update indirect dependencies" when empty.
#[must_use]
pub fn commit_title(direct: &[String]) -> String {
    if direct.is_empty() {
        return INDIRECT_UPDATE_TITLE.to_string();
    }
    format!("Update {}", quote_packages(direct))
}

/// Generates the PR description from every changed dependency.
///
/// Format: "Updated packages: `a`, `b`"
#[must_use]
pub fn long_description(all: &[String]) -> String {
    format!("Updated packages: {}", quote_packages(all))
}

/// Generates the update branch for a scheduled or manual run on `base`.
///
/// Format: "auto-update-dependencies" for `main`, otherwise
/// "auto-update-dependencies-{base}"
#[must_use]
pub fn own_update_branch(base: &str) -> String {
    if base == "main" {
        UPDATE_BRANCH_PREFIX.to_string()
    } else {
        format!("{UPDATE_BRANCH_PREFIX}-{base}")
    }
}

/// Generates the bot-side branch for a contributor's branch.
///
/// Format: "auto-update-dependencies/{fork_repository}/{branch}"
#[must_use]
pub fn fork_update_branch(fork_repository: &str, branch: &str) -> String {
    format!("{UPDATE_BRANCH_PREFIX}/{fork_repository}/{branch}")
}

/// Link to GitHub's compare view for a PR from the bot branch into `branch`.
///
/// Format: "{web_url}/{target_repository}/compare/{branch}...{bot_login}:{update_branch}"
#[must_use]
pub fn compare_url(
    web_url: &str,
    target_repository: &str,
    branch: &str,
    bot_login: &str,
    update_branch: &str,
) -> String {
    format!(
        "{}/{target_repository}/compare/{branch}...{bot_login}:{update_branch}",
        web_url.trim_end_matches('/')
    )
}

/// Link to a directory on a branch.
#[must_use]
pub fn tree_url(web_url: &str, repository: &str, branch: &str, dir: &str) -> String {
    format!(
        "{}/{repository}/tree/{branch}/{}",
        web_url.trim_end_matches('/'),
        dir.trim_matches('/')
    )
}

/// Link to a workflow run.
#[must_use]
pub fn run_url(web_url: &str, repository: &str, run_id: &str) -> String {
    format!(
        "{}/{repository}/actions/runs/{run_id}",
        web_url.trim_end_matches('/')
    )
}

fn quote_packages(packages: &[String]) -> String {
    packages
        .iter()
        .map(|p| format!("`{p}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
