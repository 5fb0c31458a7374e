//! Orchestrates a dependency update run.
//!
//! The trigger event selects one of two flows:
//! - `schedule` / `workflow_dispatch`: commit to the bot's own update branch,
//!   force-push it upstream, then refresh the open PR for that branch or open
//!   a new one.
//! - `issue_comment` / `pull_request`: commit to a bot-namespaced branch,
//!   force-push it to the bot fork, and comment on the contributor's PR with a
//!   link for opening the update manually.

mod config;
mod error;
mod outcome;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use outcome::RunOutcome;

use crate::config::{RepositoryName, Settings};
use crate::dependencies::{summarize_changes, CommandDependencyDiff, DependencyDiff, SummaryRequest};
use crate::event::{Flow, TriggerEvent};
use crate::git::GitRepository;
use crate::pull_requests::{add_comment, build_client, create_pr, find_open_pr, update_pr};
use crate::templates::{
    compare_url, fork_update_branch, own_update_branch, run_url, tree_url, ChangeSummary,
    CommentContext, TemplateRenderer,
};
use tracing::{info, info_span, Instrument};

/// Inputs of the selected flow, validated before anything is mutated.
enum Plan<'a> {
    OwnPullRequest {
        token: &'a str,
    },
    CrossFork {
        pr_number: u64,
        fork: RepositoryName,
        comment_token: &'a str,
    },
}

/// Runs one dependency update against a checkout.
pub struct Runner<D = CommandDependencyDiff> {
    config: RunnerConfig,
    settings: Settings,
    repository: GitRepository,
    diff: D,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner that queries changed dependencies with the configured command.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the command is empty or the comment template
    /// cannot be loaded.
    pub fn new(config: RunnerConfig, settings: Settings) -> Result<Self, RunnerError> {
        let diff =
            CommandDependencyDiff::new(&settings.dependency_command, settings.command_timeout())?;
        Self::with_dependency_diff(config, settings, diff)
    }
}

impl<D: DependencyDiff> Runner<D> {
    /// Builds a runner around a custom dependency diff.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the comment template cannot be loaded or the
    /// checkout path cannot be resolved.
    pub fn with_dependency_diff(
        config: RunnerConfig,
        settings: Settings,
        diff: D,
    ) -> Result<Self, RunnerError> {
        let template = settings.load_comment_template()?;
        let renderer = TemplateRenderer::with_comment_template(template.as_deref())?;
        let repo_dir = settings.absolute_repo_dir()?;
        let repository = GitRepository::new(repo_dir, settings.command_timeout());
        Ok(Self {
            config,
            settings,
            repository,
            diff,
            renderer,
        })
    }

    /// Executes the flow selected by the trigger event.
    ///
    /// # Errors
    ///
    /// Returns the first failure; nothing is retried or rolled back.
    pub async fn run(&self) -> Result<RunOutcome, RunnerError> {
        let event: TriggerEvent = self.config.event().parse()?;
        let repository = RepositoryName::parse(self.config.repository())?;
        let plan = self.plan(event)?;

        let span = info_span!(
            "run",
            event = %event,
            branch = %self.config.branch(),
            repo = %repository
        );

        async {
            info!("Starting dependency update");
            self.repository
                .configure_author(&self.settings.author_identity(), self.settings.author_scope)
                .await?;

            match plan {
                Plan::OwnPullRequest { token } => {
                    self.create_or_update_own_pr(&repository, token).await
                }
                Plan::CrossFork {
                    pr_number,
                    fork,
                    comment_token,
                } => {
                    self.update_contributor_pr(&repository, pr_number, &fork, comment_token)
                        .await
                }
            }
        }
        .instrument(span)
        .await
    }

    fn plan(&self, event: TriggerEvent) -> Result<Plan<'_>, RunnerError> {
        match event.flow() {
            Flow::OwnPullRequest => {
                let token = self
                    .config
                    .token()
                    .ok_or(RunnerError::MissingInput { name: "GHA_TOKEN" })?;
                Ok(Plan::OwnPullRequest { token })
            }
            Flow::CrossFork => {
                let raw = self
                    .config
                    .pr_number()
                    .ok_or(RunnerError::MissingInput { name: "PR_NUMBER" })?;
                let pr_number = parse_pr_number(raw)?;
                let fork = self
                    .config
                    .fork_repository()
                    .ok_or(RunnerError::MissingInput { name: "FULL_NAME" })?;
                let comment_token = self
                    .config
                    .comment_token()
                    .ok_or(RunnerError::MissingInput { name: "GITHUB_TOKEN" })?;
                Ok(Plan::CrossFork {
                    pr_number,
                    fork: RepositoryName::parse(fork)?,
                    comment_token,
                })
            }
        }
    }

    async fn summarize(
        &self,
        title_base: &str,
        description_base: &str,
    ) -> Result<ChangeSummary, RunnerError> {
        let request = SummaryRequest {
            title_base,
            description_base,
            python_version: &self.settings.python_version,
            src_dir: self.repository.path(),
        };
        Ok(summarize_changes(&self.diff, &request).await?)
    }

    async fn create_or_update_own_pr(
        &self,
        repository: &RepositoryName,
        token: &str,
    ) -> Result<RunOutcome, RunnerError> {
        let base = self.config.branch();
        let branch = own_update_branch(base);

        let summary = self.summarize(base, base).await?;
        self.repository.create_commit(&branch, &summary.title).await?;
        self.repository
            .force_push(&self.settings.upstream_remote, &branch)
            .await?;

        let anonymous = build_client(&self.settings.api_url, None, self.settings.http_timeout())?;
        let existing = find_open_pr(&anonymous, repository, &branch).await?;

        let client = build_client(
            &self.settings.api_url,
            Some(token),
            self.settings.http_timeout(),
        )?;

        match existing {
            Some(number) => {
                info!(pr_number = number, "Updating existing PR");
                update_pr(&client, repository, number, &summary).await?;
                Ok(RunOutcome::Updated { number, branch })
            }
            None => {
                info!(branch = %branch, "Creating PR");
                let pr = create_pr(&client, repository, base, &branch, &summary, None).await?;
                Ok(RunOutcome::Created {
                    number: pr.number,
                    url: pr.html_url,
                    branch,
                })
            }
        }
    }

    async fn update_contributor_pr(
        &self,
        repository: &RepositoryName,
        pr_number: u64,
        fork: &RepositoryName,
        comment_token: &str,
    ) -> Result<RunOutcome, RunnerError> {
        let base = self.config.branch();
        let branch = fork_update_branch(&fork.to_string(), base);
        let description_base = format!("{}/{base}", self.settings.upstream_remote);

        let summary = self.summarize(base, &description_base).await?;
        self.repository.create_commit(&branch, &summary.title).await?;
        let comment = self.render_comment(&summary, repository, fork, &branch)?;
        self.repository
            .force_push(&self.settings.bot_remote, &branch)
            .await?;

        let client = build_client(
            &self.settings.api_url,
            Some(comment_token),
            self.settings.http_timeout(),
        )?;
        let posted = add_comment(&client, repository, pr_number, &comment).await?;
        info!(pr_number, "Contributor PR updated");

        Ok(RunOutcome::Commented {
            pr_number,
            branch,
            comment_url: posted.html_url,
        })
    }

    fn render_comment(
        &self,
        summary: &ChangeSummary,
        repository: &RepositoryName,
        fork: &RepositoryName,
        update_branch: &str,
    ) -> Result<String, RunnerError> {
        let bot_fork = self.settings.bot_fork_repository()?;
        let web_url = &self.settings.web_url;
        let branch = self.config.branch();
        let fork_name = fork.to_string();

        let context = CommentContext {
            description: summary.body.clone(),
            compare_url: compare_url(web_url, &fork_name, branch, bot_fork.owner(), update_branch),
            constraints_url: tree_url(
                web_url,
                &bot_fork.to_string(),
                update_branch,
                &self.settings.constraints_dir,
            ),
            run_url: self
                .config
                .run_id()
                .map(|id| run_url(web_url, &repository.to_string(), id))
                .unwrap_or_default(),
            branch: branch.to_string(),
            update_branch: update_branch.to_string(),
            target_repository: fork_name,
            bot_login: bot_fork.owner().to_string(),
        };

        Ok(self.renderer.render_comment(&context)?)
    }
}

/// Parses a trigger-provided PR number.
fn parse_pr_number(value: &str) -> Result<u64, RunnerError> {
    match value.trim().parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(RunnerError::InvalidPrNumber {
            value: value.to_string(),
        }),
    }
}
