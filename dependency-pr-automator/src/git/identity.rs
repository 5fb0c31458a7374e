//! Commit author identity.

use serde::Deserialize;

/// Name and email written into git config before committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}

/// Which git config file receives the author identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorScope {
    /// `git config --global`, as CI runners expect.
    #[default]
    Global,

    /// `git config --local`, confined to the checkout.
    Local,
}

impl AuthorScope {
    /// The `git config` flag selecting this scope.
    #[must_use]
    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Global => "--global",
            Self::Local => "--local",
        }
    }
}
