//! # Entrykeep
//!
//! This library provides the core functionality for a git-backed entry
//! service: isolated, version-controlled content directories ("entries"),
//! each identified by a random opaque id, with the system `git` command as
//! the durability and history layer. It is designed to sit under a thin
//! HTTP or CLI layer that maps user input onto the operations exposed here.
//!
//! ## Quick Example
//!
//! ```no_run
//! use entrykeep::config::Config;
//! use entrykeep::store::EntryStore;
//!
//! let store = EntryStore::new(Config::default(), false)?;
//!
//! // Allocate a fresh entry and give it some content.
//! let entry = store.make_entry()?;
//! entry.apply_desc("scratch notes")?;
//! entry.add("notes.txt", b"remember the milk")?;
//! entry.commit("", "")?;
//!
//! // The handle is stateless; reload it by id later.
//! let again = store.load_entry(entry.id())?;
//! assert_eq!(again.read_file("notes.txt")?, b"remember the milk");
//! # Ok::<(), entrykeep::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key pieces:
//!
//! - **Configuration (`config`)**: the immutable settings the store
//!   consumes - base directory, git executable, default commit identity -
//!   loaded from TOML with forgiving fallbacks.
//! - **Entry Store (`store`)**: allocates new entries with bounded retry
//!   over random identifiers, and loads existing ones by id.
//! - **Entry Handles (`store::Entry`)**: per-entry operations - description
//!   read/write, file add, commit, ordered traversal, and guarded reads.
//! - **Path Guards (`path`)**: the containment invariant that keeps every
//!   user-addressable path inside its entry root and keeps git metadata out
//!   of user-facing listings and reads.
//! - **Subprocess Runner (`git`)**: invokes the git binary with a working
//!   directory and typed environment overrides, optionally capturing output
//!   for diagnostics.
//!
//! All operations are synchronous and blocking, and handles carry no shared
//! mutable state: distinct entries can be driven concurrently by the
//! surrounding layer, while operations on one entry are the caller's to
//! serialize.

pub mod config;
pub mod error;
pub mod git;
pub mod id;
pub mod path;
pub mod store;

#[cfg(test)]
mod path_proptest;
