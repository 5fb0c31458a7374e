//! Automator settings deserialization.

use super::{ConfigError, RepositoryName};
use crate::git::{AuthorIdentity, AuthorScope};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Origin label used in errors when settings come from built-in defaults.
const DEFAULTS_ORIGIN: &str = "<defaults>";

/// Settings for a run, typically loaded from a TOML file.
///
/// Every key is optional; missing keys take the values the napari
/// dependency-update workflow expects.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Settings {
    /// Checkout the automator commits in.
    pub repo_dir: PathBuf,

    /// Git author name for automated commits.
    pub bot_name: String,

    /// Git author email for automated commits.
    pub bot_email: String,

    /// Where the author identity is written.
    pub author_scope: AuthorScope,

    /// Remote that own update branches are pushed to.
    pub upstream_remote: String,

    /// Remote that cross-fork update branches are pushed to.
    pub bot_remote: String,

    /// Bot-owned fork that `bot_remote` points at, as `owner/name`.
    pub bot_fork: String,

    /// Python version passed to the dependency diff query.
    pub python_version: String,

    /// Directory holding the constraint files, relative to the repository root.
    pub constraints_dir: String,

    /// Program and leading arguments of the dependency diff query.
    pub dependency_command: Vec<String>,

    /// Optional Handlebars template replacing the built-in cross-fork comment.
    pub comment_template: Option<PathBuf>,

    /// GitHub REST API base URL.
    pub api_url: String,

    /// GitHub web URL used for links in comments.
    pub web_url: String,

    /// Timeout for each child process, in seconds.
    pub command_timeout_secs: u64,

    /// Timeout for each HTTP request, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_dir: PathBuf::from("napari_repo"),
            bot_name: "napari-bot".to_string(),
            bot_email: "napari-bot@users.noreply.github.com".to_string(),
            author_scope: AuthorScope::Global,
            upstream_remote: "origin".to_string(),
            bot_remote: "napari-bot".to_string(),
            bot_fork: "napari-bot/napari".to_string(),
            python_version: "3.11".to_string(),
            constraints_dir: "resources/constraints".to_string(),
            dependency_command: vec![
                "python".to_string(),
                "../tools/check_updated_packages.py".to_string(),
            ],
            comment_template: None,
            api_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            command_timeout_secs: 600,
            http_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or returns validated defaults when `path`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            let settings = Self::default();
            settings.validate(DEFAULTS_ORIGIN)?;
            return Ok(settings);
        };

        debug!(path = %path.display(), "Loading settings");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parses and validates settings from TOML text.
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;
        settings.validate(origin)?;
        Ok(settings)
    }

    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first offending key.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let fail = |message: &str| ConfigError::ValidationError {
            path: origin.to_string(),
            message: message.to_string(),
        };

        let required = [
            ("bot-name", &self.bot_name),
            ("bot-email", &self.bot_email),
            ("upstream-remote", &self.upstream_remote),
            ("bot-remote", &self.bot_remote),
            ("python-version", &self.python_version),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(fail(&format!("{key} must not be empty")));
            }
        }

        if self
            .dependency_command
            .first()
            .is_none_or(|program| program.trim().is_empty())
        {
            return Err(fail("dependency-command must name a program"));
        }

        if RepositoryName::parse(&self.bot_fork).is_err() {
            return Err(fail("bot-fork must be in 'owner/name' form"));
        }

        for (key, value) in [("api-url", &self.api_url), ("web-url", &self.web_url)] {
            if let Err(e) = Url::parse(value) {
                return Err(fail(&format!("{key} is not a valid URL: {e}")));
            }
        }

        if self.command_timeout_secs == 0 {
            return Err(fail("command-timeout-secs must be greater than zero"));
        }
        if self.http_timeout_secs == 0 {
            return Err(fail("http-timeout-secs must be greater than zero"));
        }

        Ok(())
    }

    /// The checkout as an absolute path, resolved against the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PathError`] if the current directory is unavailable.
    pub fn absolute_repo_dir(&self) -> Result<PathBuf, ConfigError> {
        std::path::absolute(&self.repo_dir).map_err(|e| ConfigError::PathError {
            path: self.repo_dir.display().to_string(),
            source: e,
        })
    }

    /// Git identity used for automated commits.
    #[must_use]
    pub fn author_identity(&self) -> AuthorIdentity {
        AuthorIdentity {
            name: self.bot_name.clone(),
            email: self.bot_email.clone(),
        }
    }

    /// The bot fork as a parsed repository name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] if `bot-fork` is malformed.
    pub fn bot_fork_repository(&self) -> Result<RepositoryName, ConfigError> {
        RepositoryName::parse(&self.bot_fork)
    }

    /// Per-process timeout.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Per-request timeout.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Reads the comment template override, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is blank.
    pub fn load_comment_template(&self) -> Result<Option<String>, ConfigError> {
        let Some(path) = &self.comment_template else {
            return Ok(None);
        };

        let template = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        if template.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: "comment template is empty".to_string(),
            });
        }

        Ok(Some(template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::load(None).unwrap();

        assert_eq!(settings.repo_dir, PathBuf::from("napari_repo"));
        assert_eq!(settings.bot_name, "napari-bot");
        assert_eq!(settings.upstream_remote, "origin");
        assert_eq!(settings.bot_remote, "napari-bot");
        assert_eq!(settings.python_version, "3.11");
        assert_eq!(settings.author_scope, AuthorScope::Global);
        assert_eq!(settings.bot_fork_repository().unwrap().owner(), "napari-bot");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let settings = Settings::from_toml_str(
            r#"
repo-dir = "/tmp/checkout"
author-scope = "local"
python-version = "3.12"
dependency-command = ["uv", "run", "check_updated_packages.py"]
"#,
            "test.toml",
        )
        .unwrap();

        assert_eq!(settings.repo_dir, PathBuf::from("/tmp/checkout"));
        assert_eq!(settings.author_scope, AuthorScope::Local);
        assert_eq!(settings.python_version, "3.12");
        assert_eq!(settings.dependency_command.len(), 3);
        assert_eq!(settings.bot_email, "napari-bot@users.noreply.github.com");
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = Settings::from_toml_str("bot-nmae = \"typo\"", "test.toml");
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_empty_command() {
        let result = Settings::from_toml_str("dependency-command = []", "test.toml");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_malformed_bot_fork() {
        let result = Settings::from_toml_str("bot-fork = \"napari-bot\"", "test.toml");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = Settings::from_toml_str("http-timeout-secs = 0", "test.toml");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_invalid_api_url() {
        let result = Settings::from_toml_str("api-url = \"not a url\"", "test.toml");
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = Settings::load(Some(&temp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn loads_comment_template_override() {
        let temp = TempDir::new().unwrap();
        let template_path = temp.path().join("comment.hbs");
        fs::write(&template_path, "Compare: {{compare_url}}").unwrap();

        let settings = Settings {
            comment_template: Some(template_path),
            ..Settings::default()
        };

        assert_eq!(
            settings.load_comment_template().unwrap().as_deref(),
            Some("Compare: {{compare_url}}")
        );
    }

    #[test]
    fn blank_comment_template_is_rejected() {
        let temp = TempDir::new().unwrap();
        let template_path = temp.path().join("comment.hbs");
        fs::write(&template_path, "  \n").unwrap();

        let settings = Settings {
            comment_template: Some(template_path),
            ..Settings::default()
        };

        assert!(matches!(
            settings.load_comment_template(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
