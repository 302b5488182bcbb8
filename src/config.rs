//! # Configuration
//!
//! This module defines the immutable configuration consumed by the entry
//! store, and the logic for loading it from a TOML file.
//!
//! Loading is forgiving by design: a missing or malformed file logs a
//! warning and falls back to the built-in defaults, so a bare deployment
//! works out of the box. The one fatal condition is a git executable that
//! cannot be invoked at all - without it no entry can ever be created or
//! committed, so [`Config::load`] surfaces that as a typed error for the
//! embedding application to act on at startup.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default commit identity applied when the caller supplies empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDefaults {
    /// Author/committer name used when the caller does not supply one.
    #[serde(default = "default_commit_name")]
    pub name: String,
    /// Author/committer email used when the caller does not supply one.
    #[serde(default = "default_commit_email")]
    pub email: String,
}

impl Default for CommitDefaults {
    fn default() -> Self {
        Self {
            name: default_commit_name(),
            email: default_commit_email(),
        }
    }
}

/// Immutable configuration for the entry store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port for the service collaborator. Carried here because it lives in
    /// the same file; the store itself never reads it.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base directory under which entry roots are created.
    #[serde(default = "default_repo")]
    pub repo: PathBuf,
    /// Name or path of the git executable.
    #[serde(default = "default_git")]
    pub git: String,
    /// Fallback commit identity.
    #[serde(default, rename = "commit_defaults")]
    pub commit: CommitDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            repo: default_repo(),
            git: default_git(),
            commit: CommitDefaults::default(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_repo() -> PathBuf {
    PathBuf::from("./repo")
}

fn default_git() -> String {
    "git".to_string()
}

fn default_commit_name() -> String {
    "anonymous".to_string()
}

fn default_commit_email() -> String {
    "anonymous@example.com".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// An unreadable or unparsable file logs a warning and yields the
    /// defaults. An uninvocable git executable is the only error.
    pub fn load(path: &Path) -> Result<Config> {
        let config = match std::fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring malformed config {}: {}", path.display(), e);
                    Config::default()
                }
            },
            Err(e) => {
                log::warn!("config {} not readable: {}", path.display(), e);
                Config::default()
            }
        };

        config.ensure_git_resolvable()?;
        Ok(config)
    }

    /// Verify that the configured git executable can actually be invoked.
    pub fn ensure_git_resolvable(&self) -> Result<()> {
        let output = Command::new(&self.git)
            .arg("--version")
            .output()
            .map_err(|e| Error::GitUnavailable {
                executable: self.git.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::GitUnavailable {
                executable: self.git.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.repo, PathBuf::from("./repo"));
        assert_eq!(config.git, "git");
        assert_eq!(config.commit.name, "anonymous");
        assert_eq!(config.commit.email, "anonymous@example.com");
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
            port = 9090
            repo = "/var/lib/entries"
            git = "git"

            [commit_defaults]
            name = "robot"
            email = "robot@example.com"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.repo, PathBuf::from("/var/lib/entries"));
        assert_eq!(config.commit.name, "robot");
        assert_eq!(config.commit.email, "robot@example.com");
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("port = 3000").unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.repo, PathBuf::from("./repo"));
        assert_eq!(config.git, "git");
        assert_eq!(config.commit.name, "anonymous");
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.git, "git");
    }

    #[test]
    fn test_load_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "port = [not valid").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_load_rejects_unresolvable_git() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "git = \"/nonexistent/git-binary\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::GitUnavailable { .. }));
    }
}
