//! # Entry Store and Per-Entry Handles
//!
//! This module is the heart of the crate. An [`EntryStore`] manages a base
//! directory of entries: independently stored, versioned units of content,
//! each living in its own git repository named by a random identifier. An
//! [`Entry`] is the handle for one of those repositories and exposes the
//! operations the service layer composes into user-facing behavior:
//! description read/write, file add, commit, traversal, and guarded reads.
//!
//! ## Design
//!
//! - **Allocation**: `make_entry` draws candidate identifiers from an
//!   injected [`IdGenerator`] and claims the first one whose directory does
//!   not already exist, with a bounded number of attempts. Collisions and
//!   transient git failures are expected to be rare but possible; the bound
//!   keeps the worst case deterministic and testable. A root left behind by
//!   a failed `git init` is removed best-effort before the next attempt.
//!
//! - **Containment**: every caller-influenced path is resolved lexically and
//!   checked against the entry root before any filesystem access, and the
//!   git control subtree is never treated as user content.
//!
//! - **Statelessness**: a handle is nothing but `{id, root, config}` plus a
//!   runner; it can be dropped and reconstructed through `load_entry` at any
//!   time. The store holds no shared mutable state, so distinct entries can
//!   be driven concurrently from separate callers. Operations on a single
//!   handle are not self-serializing; that is the caller's responsibility.
//!
//! Two concurrent `make_entry` calls can in principle race on the same drawn
//! identifier, since the existence check and the directory creation are not
//! atomic. With 62^16 possible identifiers this is accepted risk.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::{EnvVar, GitRunner};
use crate::id::{IdGenerator, RandomIdGenerator};
use crate::path::{contains, is_control_path, normalize, GIT_DIR};

/// Length of generated entry identifiers.
pub const ID_LENGTH: usize = 16;

/// Number of allocation attempts before `make_entry` gives up.
pub const MAKE_ATTEMPTS: u32 = 3;

/// Manages the base directory of entries.
pub struct EntryStore {
    config: Config,
    runner: GitRunner,
    ids: Box<dyn IdGenerator>,
}

impl EntryStore {
    /// Create a store over `config.repo`, creating the base directory if
    /// needed. `verbose` enables debug logging of git subprocess output.
    pub fn new(config: Config, verbose: bool) -> Result<Self> {
        Self::with_id_generator(config, verbose, Box::new(RandomIdGenerator))
    }

    /// Create a store with a custom identifier generator.
    ///
    /// This is how tests substitute a deterministic source; production code
    /// uses [`EntryStore::new`].
    pub fn with_id_generator(
        config: Config,
        verbose: bool,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self> {
        fs::create_dir_all(&config.repo)?;
        let runner = GitRunner::new(&config.git, verbose);
        Ok(Self {
            config,
            runner,
            ids,
        })
    }

    /// Allocate a new entry: fresh identifier, fresh directory, `git init`.
    ///
    /// Each failed attempt is logged at debug level and retried with a new
    /// identifier, up to [`MAKE_ATTEMPTS`] times. Exhaustion returns
    /// [`Error::AllocationExhausted`].
    pub fn make_entry(&self) -> Result<Entry> {
        for attempt in 1..=MAKE_ATTEMPTS {
            let id = self.ids.next(ID_LENGTH);
            let root = self.config.repo.join(&id);

            if root.exists() {
                log::debug!("attempt {}: id {} already taken", attempt, id);
                continue;
            }

            if let Err(e) = fs::create_dir_all(&root) {
                log::debug!("attempt {}: mkdir {} failed: {}", attempt, root.display(), e);
                continue;
            }

            match self.runner.run(&root, &["init"], &[]) {
                Ok(()) => {
                    return Ok(Entry {
                        id,
                        root,
                        config: self.config.clone(),
                        runner: self.runner.clone(),
                    })
                }
                Err(e) => {
                    log::debug!("attempt {}: git init in {} failed: {}", attempt, root.display(), e);
                    // Best-effort cleanup so a failed attempt does not leak
                    // a half-initialized root.
                    if let Err(e) = fs::remove_dir_all(&root) {
                        log::debug!("cleanup of {} failed: {}", root.display(), e);
                    }
                }
            }
        }

        Err(Error::AllocationExhausted {
            attempts: MAKE_ATTEMPTS,
        })
    }

    /// Load an existing entry by identifier.
    ///
    /// Fails with [`Error::NotFound`] when the directory is absent. The
    /// directory is not otherwise validated; a handle to a corrupted entry
    /// surfaces errors on first use instead.
    pub fn load_entry(&self, id: &str) -> Result<Entry> {
        let root = self.config.repo.join(id);
        if !contains(&self.config.repo, &root) {
            return Err(Error::UnsupportedPath {
                path: id.to_string(),
            });
        }
        if let Err(e) = fs::symlink_metadata(&root) {
            return Err(Error::NotFound {
                id: id.to_string(),
                source: e,
            });
        }
        Ok(Entry {
            id: id.to_string(),
            root,
            config: self.config.clone(),
            runner: self.runner.clone(),
        })
    }
}

/// Handle to one entry: a git repository under the store's base directory.
///
/// Stateless beyond its identifier, root, and configuration; safe to drop
/// and reconstruct via [`EntryStore::load_entry`] while the directory exists.
#[derive(Debug, Clone)]
pub struct Entry {
    id: String,
    root: PathBuf,
    config: Config,
    runner: GitRunner,
}

impl Entry {
    /// The entry's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The entry's storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn desc_path(&self) -> PathBuf {
        self.root.join(GIT_DIR).join("description")
    }

    /// Read the entry description from the git description file.
    ///
    /// Read errors propagate, including not-found for a description file
    /// that was never written.
    pub fn desc(&self) -> Result<String> {
        Ok(fs::read_to_string(self.desc_path())?)
    }

    /// Overwrite the entry description. Empty text is valid and clears it.
    pub fn apply_desc(&self, desc: &str) -> Result<()> {
        fs::write(self.desc_path(), desc)?;
        Ok(())
    }

    /// Resolve a caller-supplied relative path to `(target, root-relative)`,
    /// rejecting anything that escapes the root.
    fn resolve(&self, name: &str) -> Result<(PathBuf, PathBuf)> {
        let target = self.root.join(name);
        if !contains(&self.root, &target) {
            return Err(Error::UnsupportedPath {
                path: name.to_string(),
            });
        }
        let target = normalize(&target);
        let rel = target
            .strip_prefix(normalize(&self.root))
            .map_err(|_| Error::UnsupportedPath {
                path: name.to_string(),
            })?
            .to_path_buf();
        Ok((target, rel))
    }

    /// Write a new content file at `name` and stage it.
    ///
    /// Fails with [`Error::UnsupportedPath`] when `name` escapes the root or
    /// targets git metadata, and with [`Error::AlreadyExists`] when anything
    /// already occupies the path. Each relative path is written at most once
    /// per entry; there is no overwrite or merge.
    pub fn add(&self, name: &str, content: &[u8]) -> Result<()> {
        let (target, rel) = self.resolve(name)?;
        if is_control_path(&rel) {
            return Err(Error::UnsupportedPath {
                path: name.to_string(),
            });
        }
        if fs::symlink_metadata(&target).is_ok() {
            return Err(Error::AlreadyExists {
                path: name.to_string(),
            });
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;

        self.runner
            .run(&self.root, &["add", &rel.to_string_lossy()], &[])
    }

    /// Commit everything staged, with an explicitly empty message.
    ///
    /// The effective identity is the caller's `name`/`email` where
    /// non-empty, falling back per field to the configured defaults, and is
    /// injected as the git author/committer environment variables.
    pub fn commit(&self, name: &str, email: &str) -> Result<()> {
        self.runner.run(
            &self.root,
            &["commit", "--allow-empty-message", "-m", ""],
            &self.commit_env(name, email),
        )
    }

    fn commit_env(&self, name: &str, email: &str) -> Vec<EnvVar> {
        let name = if name.is_empty() {
            &self.config.commit.name
        } else {
            name
        };
        let email = if email.is_empty() {
            &self.config.commit.email
        } else {
            email
        };
        vec![
            EnvVar::new("GIT_AUTHOR_NAME", name),
            EnvVar::new("GIT_COMMITTER_NAME", name),
            EnvVar::new("GIT_AUTHOR_EMAIL", email),
            EnvVar::new("GIT_COMMITTER_EMAIL", email),
        ]
    }

    /// Traverse the entry's content recursively.
    ///
    /// Every file and directory except the git control subtree is forwarded
    /// to `visit` as `(root-relative path, is_directory)`, depth-first,
    /// lexicographic per directory level, directories before their children.
    /// Callers build ordered listings from this, so the ordering is part of
    /// the contract.
    pub fn walk<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&Path, bool) -> Result<()>,
    {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != std::ffi::OsStr::new(GIT_DIR));

        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| Error::UnsupportedPath {
                    path: entry.path().display().to_string(),
                })?;
            visit(rel, entry.file_type().is_dir())?;
        }
        Ok(())
    }

    /// Read the raw bytes of a content file.
    ///
    /// Fails with [`Error::UnsupportedPath`] when `path` escapes the root or
    /// falls under the git control subtree; other I/O errors propagate.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let (target, rel) = self.resolve(path)?;
        if is_control_path(&rel) {
            return Err(Error::UnsupportedPath {
                path: path.to_string(),
            });
        }
        Ok(fs::read(target)?)
    }
}
