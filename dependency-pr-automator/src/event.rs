//! Workflow trigger events.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while interpreting the trigger event.
#[derive(Debug, Error)]
pub enum EventError {
    /// Event name the automator has no flow for.
    #[error("Unknown event name: {0}")]
    Unknown(String),
}

/// The GitHub Actions event that started the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Schedule,
    WorkflowDispatch,
    IssueComment,
    PullRequest,
}

/// What a run does in response to its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Push the bot's own update branch and open or refresh its PR.
    OwnPullRequest,
    /// Push to the bot fork and comment on a contributor's PR.
    CrossFork,
}

impl TriggerEvent {
    /// The flow this event selects.
    #[must_use]
    pub fn flow(self) -> Flow {
        match self {
            Self::Schedule | Self::WorkflowDispatch => Flow::OwnPullRequest,
            Self::IssueComment | Self::PullRequest => Flow::CrossFork,
        }
    }

    /// The GitHub event name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schedule => "schedule",
            Self::WorkflowDispatch => "workflow_dispatch",
            Self::IssueComment => "issue_comment",
            Self::PullRequest => "pull_request",
        }
    }
}

impl FromStr for TriggerEvent {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "schedule" => Ok(Self::Schedule),
            "workflow_dispatch" => Ok(Self::WorkflowDispatch),
            "issue_comment" => Ok(Self::IssueComment),
            "pull_request" => Ok(Self::PullRequest),
            other => Err(EventError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_and_manual_runs_own_the_pr() {
        for name in ["schedule", "workflow_dispatch"] {
            let event: TriggerEvent = name.parse().unwrap();
            assert_eq!(event.flow(), Flow::OwnPullRequest);
            assert_eq!(event.as_str(), name);
        }
    }

    #[test]
    fn contributor_events_use_cross_fork_flow() {
        for name in ["issue_comment", "pull_request"] {
            let event: TriggerEvent = name.parse().unwrap();
            assert_eq!(event.flow(), Flow::CrossFork);
            assert_eq!(event.to_string(), name);
        }
    }

    #[test]
    fn unknown_event_is_rejected() {
        let result = "push".parse::<TriggerEvent>();
        assert!(matches!(result, Err(EventError::Unknown(name)) if name == "push"));
        assert!("Schedule".parse::<TriggerEvent>().is_err());
    }
}
