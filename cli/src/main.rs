//! CLI for the dependency update PR automator.
//!
//! Meant to run inside a GitHub Actions job: every input can come from the
//! environment variables the workflow sets.

use clap::Parser;
use dependency_pr_automator::{RunOutcome, Runner, RunnerConfig, RunnerError, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Commit updated dependency constraints and open or refresh the update PR.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub event that triggered the workflow.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event: String,

    /// Branch the update is based on.
    #[arg(long, env = "BRANCH")]
    branch: String,

    /// Token used to create and update PRs (required for schedule and workflow_dispatch).
    #[arg(long, env = "GHA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Token used to comment on contributor PRs (defaults to --token).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    comment_token: Option<String>,

    /// Contributor PR number for comment and pull_request events.
    #[arg(long, env = "PR_NUMBER")]
    pr_number: Option<String>,

    /// Contributor repository (owner/name) for comment and pull_request events.
    #[arg(long, env = "FULL_NAME")]
    fork_repository: Option<String>,

    /// Repository hosting the PRs.
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = dependency_pr_automator::DEFAULT_REPOSITORY)]
    repository: String,

    /// Workflow run identifier, linked from contributor comments.
    #[arg(long, env = "GITHUB_RUN_ID")]
    run_id: Option<String>,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// GitHub web URL used in links.
    #[arg(long, env = "GITHUB_SERVER_URL")]
    server_url: Option<String>,

    /// Checkout to commit in.
    #[arg(long)]
    repo_dir: Option<PathBuf>,

    /// Path to a settings TOML file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Dependency update failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Applies command-line overrides on top of the loaded settings.
fn load_settings(args: &Args) -> Result<Settings, RunnerError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(api_url) = &args.api_url {
        settings.api_url.clone_from(api_url);
    }
    if let Some(server_url) = &args.server_url {
        settings.web_url.clone_from(server_url);
    }
    if let Some(repo_dir) = &args.repo_dir {
        settings.repo_dir.clone_from(repo_dir);
    }
    settings.validate("command line")?;
    Ok(settings)
}

fn runner_config(args: Args) -> RunnerConfig {
    let mut config = RunnerConfig::new(args.event, args.branch).with_repository(args.repository);
    if let Some(token) = args.token {
        config = config.with_token(token);
    }
    if let Some(token) = args.comment_token {
        config = config.with_comment_token(token);
    }
    if let Some(pr_number) = args.pr_number {
        config = config.with_pr_number(pr_number);
    }
    if let Some(fork) = args.fork_repository {
        config = config.with_fork_repository(fork);
    }
    if let Some(run_id) = args.run_id {
        config = config.with_run_id(run_id);
    }
    config
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunOutcome, RunnerError> {
    let settings = load_settings(&args)?;
    let runner = Runner::new(runner_config(args), settings)?;
    runner.run().await
}

/// Prints what the run did.
fn print_outcome(outcome: &RunOutcome) {
    println!("\nSummary:");
    match outcome {
        RunOutcome::Created { number, url, branch } => {
            println!("  Created PR #{number} from {branch}");
            if let Some(url) = url {
                println!("  {url}");
            }
        }
        RunOutcome::Updated { number, branch } => {
            println!("  Updated PR #{number} from {branch}");
        }
        RunOutcome::Commented {
            pr_number,
            branch,
            comment_url,
        } => {
            println!("  Commented on PR #{pr_number} with branch {branch}");
            if let Some(url) = comment_url {
                println!("  {url}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKFLOW_VARS: [&str; 10] = [
        "GITHUB_EVENT_NAME",
        "BRANCH",
        "GHA_TOKEN",
        "GITHUB_TOKEN",
        "PR_NUMBER",
        "FULL_NAME",
        "GITHUB_REPOSITORY",
        "GITHUB_RUN_ID",
        "GITHUB_API_URL",
        "GITHUB_SERVER_URL",
    ];

    /// Every workflow variable, unset unless listed in `set`.
    fn workflow_env(set: &[(&str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        WORKFLOW_VARS
            .iter()
            .map(|name| {
                let value = set.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect()
    }

    #[test]
    fn reads_workflow_environment() {
        let vars = workflow_env(&[
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("BRANCH", "feature-x"),
            ("GHA_TOKEN", "primary"),
            ("GITHUB_TOKEN", "workflow"),
            ("PR_NUMBER", "42"),
            ("FULL_NAME", "contrib/napari"),
            ("GITHUB_REPOSITORY", "napari/napari"),
            ("GITHUB_RUN_ID", "1234"),
        ]);

        temp_env::with_vars(vars, || {
            let args = Args::try_parse_from(["automator"]).unwrap();
            let config = runner_config(args);

            assert_eq!(config.event(), "pull_request");
            assert_eq!(config.branch(), "feature-x");
            assert_eq!(config.token(), Some("primary"));
            assert_eq!(config.comment_token(), Some("workflow"));
            assert_eq!(config.pr_number(), Some("42"));
            assert_eq!(config.fork_repository(), Some("contrib/napari"));
            assert_eq!(config.run_id(), Some("1234"));
        });
    }

    #[test]
    fn repository_defaults_to_napari() {
        let vars = workflow_env(&[
            ("GITHUB_EVENT_NAME", "schedule"),
            ("BRANCH", "main"),
            ("GHA_TOKEN", "primary"),
        ]);

        temp_env::with_vars(vars, || {
            let args = Args::try_parse_from(["automator"]).unwrap();
            assert_eq!(args.repository, "napari/napari");
            assert_eq!(runner_config(args).comment_token(), Some("primary"));
        });
    }

    #[test]
    fn fork_events_run_without_pr_token() {
        let vars = workflow_env(&[
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("BRANCH", "feature-x"),
            ("GITHUB_TOKEN", "workflow"),
            ("PR_NUMBER", "42"),
            ("FULL_NAME", "contrib/napari"),
        ]);

        temp_env::with_vars(vars, || {
            let args = Args::try_parse_from(["automator"]).unwrap();
            let config = runner_config(args);

            assert_eq!(config.token(), None);
            assert_eq!(config.comment_token(), Some("workflow"));
        });
    }

    #[test]
    fn event_and_branch_are_required() {
        temp_env::with_vars(workflow_env(&[]), || {
            assert!(Args::try_parse_from(["automator", "--token", "t"]).is_err());
        });
    }

    #[test]
    fn server_url_overrides_settings() {
        temp_env::with_vars(workflow_env(&[]), || {
            let args = Args::try_parse_from([
                "automator",
                "--event",
                "schedule",
                "--branch",
                "main",
                "--token",
                "t",
                "--server-url",
                "https://github.example.com",
                "--repo-dir",
                "/tmp/checkout",
            ])
            .unwrap();

            let settings = load_settings(&args).unwrap();
            assert_eq!(settings.web_url, "https://github.example.com");
            assert_eq!(settings.repo_dir, PathBuf::from("/tmp/checkout"));
            assert_eq!(settings.api_url, "https://api.github.com");
        });
    }

    #[test]
    fn invalid_api_url_override_is_rejected() {
        temp_env::with_vars(workflow_env(&[]), || {
            let args = Args::try_parse_from([
                "automator", "--event", "schedule", "--branch", "main", "--token", "t",
                "--api-url", "not a url",
            ])
            .unwrap();

            assert!(matches!(
                load_settings(&args),
                Err(RunnerError::Config(_))
            ));
        });
    }
}
