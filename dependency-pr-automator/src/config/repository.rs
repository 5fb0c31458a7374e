//! `owner/name` repository identifiers.

use super::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Repository used when `GITHUB_REPOSITORY` is not set.
pub const DEFAULT_REPOSITORY: &str = "napari/napari";

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName {
    owner: String,
    name: String,
}

impl RepositoryName {
    /// Parses an `owner/name` string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] unless the value has exactly
    /// two non-empty, whitespace-free segments.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository {
            value: value.to_string(),
        };

        let (owner, name) = value.split_once('/').ok_or_else(invalid)?;
        let valid_segment =
            |s: &str| !s.is_empty() && !s.contains('/') && !s.chars().any(char::is_whitespace);

        if !valid_segment(owner) || !valid_segment(name) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The account (user or organisation) that owns the repository.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl FromStr for RepositoryName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
