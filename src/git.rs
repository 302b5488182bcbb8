//! Git subprocess invocation
//!
//! All history operations (init, add, commit) go through the system `git`
//! command via [`GitRunner`]. Using the real binary means the entries it
//! produces are ordinary repositories that any git tooling can inspect.
//!
//! The runner is synchronous and imposes no timeout: a hung git process
//! blocks its caller until it exits. This matches the rest of the crate's
//! blocking resource model and is a documented gap rather than an oversight.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// A single environment override applied to a git invocation.
///
/// Overrides are merged into a copy of the ambient process environment:
/// a matching key is replaced, an absent key is appended. The parent
/// environment is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Runs git commands inside a working directory.
///
/// When `verbose` is set, captured stdout and stderr are emitted through
/// `log::debug!` after every invocation, success or failure; otherwise the
/// captured output is discarded.
#[derive(Debug, Clone)]
pub struct GitRunner {
    executable: String,
    verbose: bool,
}

impl GitRunner {
    pub fn new(executable: &str, verbose: bool) -> Self {
        Self {
            executable: executable.to_string(),
            verbose,
        }
    }

    /// The configured git executable name or path.
    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Execute `git <args>` in `workdir` with the given environment
    /// overrides.
    ///
    /// Returns `Error::Git` for both launch failures and non-zero exits,
    /// carrying stderr (or the launch error) so callers can render a
    /// meaningful message.
    pub fn run(&self, workdir: &Path, args: &[&str], env: &[EnvVar]) -> Result<()> {
        let mut command = Command::new(&self.executable);
        command.args(args).current_dir(workdir);
        for var in env {
            command.env(&var.key, &var.value);
        }

        let output = command.output().map_err(|e| Error::Git {
            command: args.join(" "),
            message: e.to_string(),
        })?;

        if self.verbose {
            for stream in [&output.stdout, &output.stderr] {
                let text = String::from_utf8_lossy(stream);
                if !text.is_empty() {
                    log::debug!("git {}: {}", args.join(" "), text.trim_end());
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git {
                command: args.join(" "),
                message: stderr.trim_end().to_string(),
            });
        }

        Ok(())
    }
}
