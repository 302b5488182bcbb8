//! Property-based tests for the path guards.
//!
//! These tests use proptest to generate random path shapes and verify that
//! the containment and control-subtree invariants hold for all inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{contains, is_control_path, normalize};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    /// A single well-formed path component: no separators, not "." or "..".
    fn component() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_.-]{1,12}".prop_filter("no dot components", |s| s != "." && s != "..")
    }

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(parts in prop::collection::vec(component(), 0..6)) {
            let path: PathBuf = parts.iter().collect();
            let once = normalize(&path);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: a path built only from plain components normalizes to itself
        #[test]
        fn normalize_preserves_plain_paths(parts in prop::collection::vec(component(), 1..6)) {
            let path: PathBuf = parts.iter().collect();
            prop_assert_eq!(normalize(&path), path);
        }

        /// Property: interspersed "." components never change the result
        #[test]
        fn normalize_drops_curdir(parts in prop::collection::vec(component(), 1..5)) {
            let plain: PathBuf = parts.iter().collect();
            let mut dotted = PathBuf::new();
            for part in &parts {
                dotted.push(".");
                dotted.push(part);
            }
            prop_assert_eq!(normalize(&dotted), normalize(&plain));
        }
    }

    // ============================================================================
    // contains property tests
    // ============================================================================

    proptest! {
        /// Property: any plain relative path joined under the root is contained
        #[test]
        fn contains_accepts_plain_joins(parts in prop::collection::vec(component(), 0..6)) {
            let root = Path::new("/base/entry");
            let rel: PathBuf = parts.iter().collect();
            prop_assert!(contains(root, &root.join(&rel)));
        }

        /// Property: a candidate with more ".." than preceding components escapes
        #[test]
        fn contains_rejects_escapes(
            parts in prop::collection::vec(component(), 0..4),
            extra_ups in 1usize..4,
        ) {
            let root = Path::new("/base/entry");
            let mut rel = PathBuf::new();
            for part in &parts {
                rel.push(part);
            }
            for _ in 0..parts.len() + extra_ups {
                rel.push("..");
            }
            // rel now resolves strictly above the root
            prop_assert!(!contains(root, &root.join(&rel)));
        }

        /// Property: contains is deterministic
        #[test]
        fn contains_is_deterministic(parts in prop::collection::vec(component(), 0..6)) {
            let root = Path::new("/base/entry");
            let candidate = root.join(parts.iter().collect::<PathBuf>());
            prop_assert_eq!(contains(root, &candidate), contains(root, &candidate));
        }
    }

    // ============================================================================
    // is_control_path property tests
    // ============================================================================

    proptest! {
        /// Property: paths without a ".git" component are never control paths
        #[test]
        fn control_path_requires_git_component(parts in prop::collection::vec(component(), 1..6)) {
            prop_assume!(parts.iter().all(|p| p != ".git"));
            let path: PathBuf = parts.iter().collect();
            prop_assert!(!is_control_path(&path));
        }

        /// Property: inserting a ".git" component anywhere makes a control path
        #[test]
        fn control_path_detects_git_anywhere(
            parts in prop::collection::vec(component(), 0..5),
            pos_seed in 0usize..5,
        ) {
            let mut parts = parts;
            let pos = pos_seed % (parts.len() + 1);
            parts.insert(pos, ".git".to_string());
            let path: PathBuf = parts.iter().collect();
            prop_assert!(is_control_path(&path));
        }
    }
}
