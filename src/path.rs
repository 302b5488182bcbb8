//! Path containment and git metadata guards
//!
//! Every entry operation that accepts a caller-influenced relative path runs
//! it through these predicates before touching the filesystem. [`contains`]
//! keeps traversal inside the entry root, and [`is_control_path`] keeps the
//! git control subtree out of user-facing reads and listings.
//!
//! Resolution is purely lexical (`.` and `..` components are folded without
//! consulting the filesystem), so the guards give the same answer whether or
//! not the candidate path exists yet.

use std::path::{Component, Path, PathBuf};

/// Name of the git metadata directory inside every entry root.
pub const GIT_DIR: &str = ".git";

/// Lexically normalize a path by folding `.` and `..` components.
///
/// A `..` that would climb above the start of an absolute path is dropped
/// (`/..` resolves to `/`, matching how the OS resolves it). For relative
/// paths, leading `..` components are preserved so that callers can detect
/// escapes.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut rooted = false;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                out.push(prefix.as_os_str());
                rooted = true;
            }
            Component::RootDir => {
                out.push(component.as_os_str());
                rooted = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !rooted {
                    out.push("..");
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }

    out
}

/// Returns true iff `candidate` lexically resolves to `root` or to a
/// descendant of `root`.
pub fn contains(root: &Path, candidate: &Path) -> bool {
    normalize(candidate).starts_with(normalize(root))
}

/// Returns true iff any component of `path` is the git metadata directory.
///
/// This is component-based on purpose: `notes.git.txt` is user content,
/// `.git/config` and `sub/.git/hooks` are not.
pub fn is_control_path(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == GIT_DIR))
}
