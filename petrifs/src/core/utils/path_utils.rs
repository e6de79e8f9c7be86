// SPDX-License-Identifier: MIT

//! Path utilities for canonical asset names.
//!
//! This module provides helpers to normalize, split, join and clean asset paths.
//! All functions are no_std + alloc safe.
//!
//! Paths are always converted to `/`-separated form internally, and canonical
//! names never carry a leading slash.

use alloc::{string::String, vec::Vec};

/// Normalize a full path to a relative logical path:
/// - strip a base prefix (ex: the `--prefix` given to the generator)
/// - unify separators to `/`
/// - remove leading slashes
pub fn normalize_relative_path(full_path: &str, base_prefix: &str) -> String {
    let unified = path_to_unified_str(full_path);
    let prefix = path_to_unified_str(base_prefix);
    let relative = unified.strip_prefix(prefix.as_str()).unwrap_or(&unified);

    relative.trim_start_matches('/').into()
}

/// Convert a path as &str into a unified path with `/` separators
pub fn path_to_unified_str(path_str: &str) -> String {
    path_str.replace('\\', "/")
}

/// Join two path components with `/`, ensuring no duplicate slash.
///
/// An empty side yields the other one untouched.
pub fn join_paths(base: &str, part: &str) -> String {
    let base = base.trim_end_matches('/');
    let part = part.trim_start_matches('/');
    if base.is_empty() {
        return part.into();
    }
    if part.is_empty() {
        return base.into();
    }
    let mut out = String::with_capacity(base.len() + part.len() + 1);
    out.push_str(base);
    out.push('/');
    out.push_str(part);
    out
}

/// Cleans a request path as if it were rooted at `/`:
/// - `\` becomes `/`
/// - empty and `.` components are dropped
/// - `..` removes the previous component and never climbs above the root
///
/// The result has no leading or trailing slash; the root is `""`.
///
/// Example: `/a/./b/../c/` → `a/c`, `../../etc` → `etc`.
pub fn clean_path(path: &str) -> String {
    let unified = path_to_unified_str(path);
    let mut parts: Vec<&str> = Vec::new();
    for part in unified.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Resolves `name` under a mount `prefix`.
///
/// `name` is cleaned on its own first, so `..` can't escape the prefix.
pub fn mount_path(prefix: &str, name: &str) -> String {
    join_paths(&clean_path(prefix), &clean_path(name))
}

/// Extracts the last component of the path (file or directory name).
///
/// Example: `path/to/file.txt` → `file.txt`.
pub fn extract_name_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}
