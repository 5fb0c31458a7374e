//! Request and response payloads for the pull request endpoints.

use serde::{Deserialize, Serialize};

/// Query for `GET /repos/{repo}/pulls`.
#[derive(Debug, Serialize)]
pub(crate) struct ListPullsQuery<'a> {
    pub state: &'a str,
    pub head: String,
}

/// Body of `POST /repos/{repo}/pulls`.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub head: String,
    pub base: &'a str,
    pub maintainer_can_modify: bool,
}

/// Body of `POST /repos/{repo}/pulls/{number}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdatePullRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Body of `POST /repos/{repo}/issues/{number}/comments`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateComment<'a> {
    pub body: &'a str,
}

/// The fields the automator reads from a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestRef {
    /// GitHub PR number.
    pub number: u64,
    /// GitHub PR URL.
    #[serde(default)]
    pub html_url: Option<String>,
}

/// The fields the automator reads from an issue comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRef {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}
