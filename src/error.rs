//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! `entrykeep`. It uses the `thiserror` library to create a single `Error`
//! enum covering every anticipated failure mode, so that callers (an HTTP
//! layer, a CLI, tests) can map each kind of failure to an appropriate
//! response without string matching.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the library. Each variant corresponds to a specific type of
//!   failure and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! The variants cover:
//!
//! - Identifier allocation retries being exhausted.
//! - Loading an entry that does not exist.
//! - Paths that resolve outside an entry root or into git metadata.
//! - Adding a file at a path that is already occupied.
//! - Git subprocess failures (launch errors and non-zero exits).
//! - An unresolvable git executable at configuration time.
//! - I/O errors, wrapped from `std::io::Error`.
//!
//! Every failure is returned to the immediate caller as a typed value; none
//! are swallowed inside the library.

use thiserror::Error;

/// Main error type for entrykeep operations
#[derive(Error, Debug)]
pub enum Error {
    /// Creating a new entry failed on every allocation attempt.
    ///
    /// Each attempt draws a fresh identifier, so this either means the
    /// identifier source kept colliding with existing entries or git `init`
    /// kept failing. Individual attempt failures are logged at debug level.
    #[error("failed to allocate a new entry after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    /// The requested entry does not exist under the base directory.
    #[error("entry not found: {id}")]
    NotFound {
        id: String,
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied path escapes the entry root or touches the git
    /// control subtree.
    #[error("unsupported path: {path}")]
    UnsupportedPath { path: String },

    /// A file or directory already exists at the target path.
    ///
    /// Content files are written at most once per entry; there is no
    /// overwrite or merge.
    #[error("already exists: {path}")]
    AlreadyExists { path: String },

    /// A git subprocess could not be launched or exited with a non-zero
    /// status. `message` carries stderr when available, otherwise the
    /// launch error.
    #[error("git command failed: git {command} - {message}")]
    Git { command: String, message: String },

    /// The configured git executable could not be invoked.
    #[error("git executable not available: {executable} - {message}")]
    GitUnavailable { executable: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
