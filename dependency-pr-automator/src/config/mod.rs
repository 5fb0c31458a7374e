//! Configuration loading.
//!
//! This module handles parsing the optional settings TOML file and the
//! `owner/name` repository identifiers passed in through the environment.
//!
//! A settings file looks like:
//! ```toml
//! repo-dir = "napari_repo"
//! bot-name = "napari-bot"
//! bot-email = "napari-bot@users.noreply.github.com"
//! bot-remote = "napari-bot"
//! bot-fork = "napari-bot/napari"
//! python-version = "3.11"
//! dependency-command = ["python", "../tools/check_updated_packages.py"]
//! ```

mod error;
mod repository;
mod settings;

pub use error::ConfigError;
pub use repository::{RepositoryName, DEFAULT_REPOSITORY};
pub use settings::Settings;
