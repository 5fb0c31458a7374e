#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod dependencies;
pub mod event;
pub mod git;
pub mod pull_requests;
pub mod runner;
pub mod templates;

pub use config::{ConfigError, RepositoryName, Settings, DEFAULT_REPOSITORY};
pub use dependencies::{
    summarize_changes, ChangeScope, CommandDependencyDiff, DependencyDiff, DependencyError,
    DependencyQuery, SummaryRequest,
};
pub use event::{EventError, Flow, TriggerEvent};
pub use git::{AuthorIdentity, AuthorScope, GitError, GitRepository};
pub use pull_requests::{
    add_comment, build_client, create_pr, find_open_pr, update_pr, CommentRef, PrError,
    PullRequestRef,
};
pub use runner::{RunOutcome, Runner, RunnerConfig, RunnerError};
pub use templates::{
    commit_title, fork_update_branch, long_description, own_update_branch, ChangeSummary,
    CommentContext, TemplateError, TemplateRenderer,
};
