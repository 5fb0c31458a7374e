//! Pull request and comment operations against the GitHub REST API.
//!
//! Every call is a single request: any non-2xx response surfaces as
//! [`PrError`] and aborts the run.

mod client;
mod error;
mod models;

pub use client::build_client;
pub use error::PrError;
pub use models::{CommentRef, PullRequestRef};

use crate::config::RepositoryName;
use crate::templates::ChangeSummary;
use models::{CreateComment, CreatePullRequest, ListPullsQuery, UpdatePullRequest};
use octocrab::Octocrab;
use tracing::{debug, info, info_span, Instrument};

/// Finds an open PR whose head is `{owner}:{branch}`.
///
/// Meant to be called with an anonymous client. When several PRs match, the
/// first one in GitHub's default ordering wins.
///
/// # Returns
///
/// The PR number, or `None` if no open PR matches.
///
/// # Errors
///
/// Returns [`PrError`] if the request fails.
pub async fn find_open_pr(
    octocrab: &Octocrab,
    repository: &RepositoryName,
    branch: &str,
) -> Result<Option<u64>, PrError> {
    let query = ListPullsQuery {
        state: "open",
        head: format!("{}:{branch}", repository.owner()),
    };
    let route = format!("/repos/{repository}/pulls");

    async {
        let pulls: Vec<PullRequestRef> = octocrab.get(&route, Some(&query)).await?;
        debug!(count = pulls.len(), head = %query.head, "Listed open PRs");
        Ok(pulls.first().map(|pr| pr.number))
    }
    .instrument(info_span!("find_open_pr", repo = %repository, branch))
    .await
}

/// Opens a PR from `head` into `base` titled and described by `summary`.
///
/// When the head branch lives in a fork, `source_user` qualifies it as
/// `{source_user}:{head}`.
///
/// # Errors
///
/// Returns [`PrError`] if GitHub rejects the request.
pub async fn create_pr(
    octocrab: &Octocrab,
    repository: &RepositoryName,
    base: &str,
    head: &str,
    summary: &ChangeSummary,
    source_user: Option<&str>,
) -> Result<PullRequestRef, PrError> {
    let payload = CreatePullRequest {
        title: &summary.title,
        body: &summary.body,
        head: match source_user {
            Some(user) => format!("{user}:{head}"),
            None => head.to_string(),
        },
        base,
        maintainer_can_modify: true,
    };
    let route = format!("/repos/{repository}/pulls");

    async {
        info!(title = %payload.title, head = %payload.head, "Creating PR");
        let pr: PullRequestRef = octocrab.post(&route, Some(&payload)).await?;
        info!(
            pr_number = pr.number,
            url = pr.html_url.as_deref().unwrap_or_default(),
            "PR created"
        );
        Ok(pr)
    }
    .instrument(info_span!("create_pr", repo = %repository, base, head))
    .await
}

/// Overwrites the title and body of PR `number` with `summary`.
///
/// # Errors
///
/// Returns [`PrError`] if GitHub rejects the request.
pub async fn update_pr(
    octocrab: &Octocrab,
    repository: &RepositoryName,
    number: u64,
    summary: &ChangeSummary,
) -> Result<PullRequestRef, PrError> {
    let payload = UpdatePullRequest {
        title: &summary.title,
        body: &summary.body,
    };
    let route = format!("/repos/{repository}/pulls/{number}");

    async {
        info!(title = %payload.title, "Updating PR");
        let pr: PullRequestRef = octocrab.post(&route, Some(&payload)).await?;
        Ok(pr)
    }
    .instrument(info_span!("update_pr", repo = %repository, pr_number = number))
    .await
}

/// Appends a comment to issue or PR `number`.
///
/// # Errors
///
/// Returns [`PrError`] if GitHub rejects the request.
pub async fn add_comment(
    octocrab: &Octocrab,
    repository: &RepositoryName,
    number: u64,
    message: &str,
) -> Result<CommentRef, PrError> {
    let route = format!("/repos/{repository}/issues/{number}/comments");

    async {
        let comment: CommentRef = octocrab
            .post(&route, Some(&CreateComment { body: message }))
            .await?;
        info!(comment_id = comment.id, "Comment added");
        Ok(comment)
    }
    .instrument(info_span!("add_comment", repo = %repository, pr_number = number))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use std::time::Duration;

    fn repository() -> RepositoryName {
        RepositoryName::parse("napari/napari").unwrap()
    }

    fn summary() -> ChangeSummary {
        ChangeSummary {
            title: "Update `numpy`".to_string(),
            body: "Updated packages: `numpy`, `tifffile`".to_string(),
        }
    }

    fn client(server: &ServerGuard, token: Option<&str>) -> Octocrab {
        build_client(&server.url(), token, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn find_open_pr_returns_none_for_empty_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/napari/napari/pulls")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("state".into(), "open".into()),
                Matcher::UrlEncoded("head".into(), "napari:auto-update-dependencies".into()),
            ]))
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let found = find_open_pr(&client(&server, None), &repository(), "auto-update-dependencies")
            .await
            .unwrap();

        assert_eq!(found, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn find_open_pr_takes_first_entry() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/napari/napari/pulls")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"number": 7052, "title": "x"}, {"number": 7001}]"#)
            .create_async()
            .await;

        let found = find_open_pr(&client(&server, None), &repository(), "auto-update-dependencies")
            .await
            .unwrap();

        assert_eq!(found, Some(7052));
    }

    #[tokio::test]
    async fn create_pr_posts_summary() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/napari/napari/pulls")
            .match_header("authorization", Matcher::Regex("ghp-primary".into()))
            .match_body(Matcher::Json(json!({
                "title": "Update `numpy`",
                "body": "Updated packages: `numpy`, `tifffile`",
                "head": "auto-update-dependencies",
                "base": "main",
                "maintainer_can_modify": true
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"number": 12, "html_url": "https://github.com/napari/napari/pull/12"}"#)
            .create_async()
            .await;

        let pr = create_pr(
            &client(&server, Some("ghp-primary")),
            &repository(),
            "main",
            "auto-update-dependencies",
            &summary(),
            None,
        )
        .await
        .unwrap();

        assert_eq!(pr.number, 12);
        assert_eq!(
            pr.html_url.as_deref(),
            Some("https://github.com/napari/napari/pull/12")
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_pr_qualifies_fork_head() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/napari/napari/pulls")
            .match_body(Matcher::PartialJson(json!({
                "head": "napari-bot:auto-update-dependencies/contrib/napari/feature-x",
                "base": "feature-x"
            })))
            .with_status(201)
            .with_body(r#"{"number": 13}"#)
            .create_async()
            .await;

        let pr = create_pr(
            &client(&server, Some("ghp-primary")),
            &repository(),
            "feature-x",
            "auto-update-dependencies/contrib/napari/feature-x",
            &summary(),
            Some("napari-bot"),
        )
        .await
        .unwrap();

        assert_eq!(pr.number, 13);
        assert_eq!(pr.html_url, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_pr_fails_on_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/napari/napari/pulls")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Validation Failed", "documentation_url": "https://docs.github.com"}"#)
            .create_async()
            .await;

        let result = create_pr(
            &client(&server, Some("ghp-primary")),
            &repository(),
            "main",
            "auto-update-dependencies",
            &summary(),
            None,
        )
        .await;

        assert!(matches!(result, Err(PrError::GitHubError(_))));
    }

    #[tokio::test]
    async fn update_pr_overwrites_title_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/napari/napari/pulls/7052")
            .match_body(Matcher::Json(json!({
                "title": "Update `numpy`",
                "body": "Updated packages: `numpy`, `tifffile`"
            })))
            .with_status(200)
            .with_body(r#"{"number": 7052}"#)
            .create_async()
            .await;

        let pr = update_pr(
            &client(&server, Some("ghp-primary")),
            &repository(),
            7052,
            &summary(),
        )
        .await
        .unwrap();

        assert_eq!(pr.number, 7052);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_pr_fails_on_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/napari/napari/pulls/7052")
            .with_status(404)
            .with_body(r#"{"message": "Not Found", "documentation_url": "https://docs.github.com"}"#)
            .create_async()
            .await;

        let result = update_pr(
            &client(&server, Some("ghp-primary")),
            &repository(),
            7052,
            &summary(),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn add_comment_posts_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/napari/napari/issues/42/comments")
            .match_header("authorization", Matcher::Regex("ghs-workflow".into()))
            .match_body(Matcher::Json(json!({ "body": "hello" })))
            .with_status(201)
            .with_body(r#"{"id": 99, "html_url": "https://github.com/napari/napari/pull/42#issuecomment-99"}"#)
            .create_async()
            .await;

        let comment = add_comment(
            &client(&server, Some("ghs-workflow")),
            &repository(),
            42,
            "hello",
        )
        .await
        .unwrap();

        assert_eq!(comment.id, 99);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn add_comment_fails_on_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/repos/napari/napari/issues/42/comments")
            .with_status(403)
            .with_body(r#"{"message": "Resource not accessible by integration", "documentation_url": "https://docs.github.com"}"#)
            .create_async()
            .await;

        let result = add_comment(
            &client(&server, Some("ghs-workflow")),
            &repository(),
            42,
            "hello",
        )
        .await;

        assert!(matches!(result, Err(PrError::GitHubError(_))));
    }

    #[tokio::test]
    async fn invalid_api_url_is_rejected() {
        let result = build_client("not a uri", None, Duration::from_secs(5));
        assert!(result.is_err());
    }
}
