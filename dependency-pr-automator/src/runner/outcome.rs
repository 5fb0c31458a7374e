//! Run outcome types.

/// What a successful run did on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A new update PR was opened.
    Created {
        /// GitHub PR number.
        number: u64,
        /// GitHub PR URL, when returned.
        url: Option<String>,
        /// Pushed update branch.
        branch: String,
    },

    /// The existing update PR was refreshed.
    Updated {
        /// GitHub PR number.
        number: u64,
        /// Pushed update branch.
        branch: String,
    },

    /// A contributor PR received a comment linking the bot branch.
    Commented {
        /// Contributor PR number.
        pr_number: u64,
        /// Branch pushed to the bot fork.
        branch: String,
        /// Comment URL, when returned.
        comment_url: Option<String>,
    },
}

impl RunOutcome {
    /// Returns the branch that was pushed.
    #[must_use]
    pub fn branch(&self) -> &str {
        match self {
            Self::Created { branch, .. }
            | Self::Updated { branch, .. }
            | Self::Commented { branch, .. } => branch,
        }
    }
}
