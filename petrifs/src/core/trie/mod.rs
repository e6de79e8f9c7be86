// SPDX-License-Identifier: MIT

//! Hierarchical namespace over a flat set of canonical asset names.
//!
//! ```text
//!   "data/foo.txt"          /
//!   "data/img/a.png"  ──►   └── data/
//!   "data/img/b.png"            ├── foo.txt
//!                               └── img/
//!                                   ├── a.png
//!                                   └── b.png
//! ```
//!
//! The trie is built once and never mutated afterwards, so shared references
//! can be queried from any number of threads without locking.

pub mod node;

pub use node::*;

use alloc::{
    collections::btree_map::Entry,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::core::accessor::AssetAccessor;
use crate::core::config::FsConfig;
use crate::core::errors::{TrieError, TrieResult};
use crate::core::info::FileInfo;
use crate::core::utils::path_utils::path_to_unified_str;
use crate::{bail, ensure};

/// Immutable asset namespace. The root is always a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTrie {
    root: TrieNode,
}

impl Default for AssetTrie {
    fn default() -> Self {
        Self {
            root: TrieNode::new_dir(),
        }
    }
}

impl AssetTrie {
    /// Builds the trie from every name in `names`.
    ///
    /// Each name gets an [`AssetRecord`] loaded through `accessor`. Fails on
    /// the first invalid, duplicate or conflicting name; nothing is returned
    /// in that case.
    pub fn build<A, I, S>(names: I, accessor: &A, config: &FsConfig) -> TrieResult<Self>
    where
        A: AssetAccessor + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::default();
        for name in names {
            let name = canonical_name(name.as_ref())?;
            trie.insert_with(&name, || AssetRecord::load(name.clone(), accessor, config))?;
        }
        Ok(trie)
    }

    /// Inserts a leaf, rejecting names that would overwrite or pass through
    /// an existing entry. `make` runs only once the slot is known to be free.
    fn insert_with<F>(&mut self, name: &str, make: F) -> TrieResult
    where
        F: FnOnce() -> TrieResult<AssetRecord>,
    {
        let segments: Vec<&str> = name.split('/').collect();
        let Some((last, dirs)) = segments.split_last() else {
            bail!(TrieError::InvalidName(name.to_string()));
        };

        let mut children = match &mut self.root {
            TrieNode::Dir(children) => children,
            TrieNode::Leaf(_) => return Err(TrieError::PathConflict(name.to_string())),
        };
        for seg in dirs {
            let node = children
                .entry(seg.to_string())
                .or_insert_with(TrieNode::new_dir);
            children = match node {
                TrieNode::Dir(c) => c,
                TrieNode::Leaf(_) => return Err(TrieError::PathConflict(name.to_string())),
            };
        }

        match children.entry(last.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(TrieNode::Leaf(make()?));
                Ok(())
            }
            Entry::Occupied(existing) => match existing.get() {
                TrieNode::Leaf(_) => Err(TrieError::DuplicateAsset(name.to_string())),
                TrieNode::Dir(_) => Err(TrieError::PathConflict(name.to_string())),
            },
        }
    }

    #[inline]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Resolves a canonical path to its node.
    ///
    /// `""` is the root. Every segment must match exactly; there is no
    /// partial-match fallback and a leaf has no children to descend into.
    pub fn lookup(&self, path: &str) -> TrieResult<&TrieNode> {
        let path = path_to_unified_str(path);
        let mut node = &self.root;
        if path.is_empty() {
            return Ok(node);
        }
        for seg in path.split('/') {
            node = match node {
                TrieNode::Dir(children) => children.get(seg).ok_or(TrieError::NotFound)?,
                TrieNode::Leaf(_) => return Err(TrieError::NotFound),
            };
        }
        Ok(node)
    }

    /// Resolves a canonical path to its asset record.
    ///
    /// A directory resolves but has no record: `IsADirectory`, not `NotFound`.
    pub fn record(&self, path: &str) -> TrieResult<&AssetRecord> {
        self.lookup(path)?.asset().ok_or(TrieError::IsADirectory)
    }

    /// Immediate children of the directory at `path`, sorted by name.
    ///
    /// Entries report `size = 0`; leaf sizes are not probed.
    pub fn list_children(&self, path: &str) -> TrieResult<Vec<FileInfo>> {
        let node = self.lookup(path)?;
        ensure!(node.is_dir(), TrieError::NotADirectory);
        Ok(node.entries())
    }

    /// Names of the immediate children of the directory at `path`, sorted.
    pub fn child_names(&self, path: &str) -> TrieResult<Vec<String>> {
        match self.lookup(path)? {
            TrieNode::Dir(children) => Ok(children.keys().cloned().collect()),
            TrieNode::Leaf(_) => Err(TrieError::NotADirectory),
        }
    }

    /// Every inserted canonical name, sorted.
    pub fn names(&self) -> Vec<String> {
        fn walk(node: &TrieNode, out: &mut Vec<String>) {
            match node {
                TrieNode::Leaf(record) => out.push(record.name().to_string()),
                TrieNode::Dir(children) => children.values().for_each(|c| walk(c, out)),
            }
        }
        let mut out = Vec::new();
        walk(&self.root, &mut out);
        out.sort_unstable();
        out
    }

    /// Number of assets (leaves).
    pub fn len(&self) -> usize {
        self.counts().files
    }

    pub fn is_empty(&self) -> bool {
        self.root.children().is_none_or(|c| c.is_empty())
    }

    /// Directory and file totals; the root counts as one directory.
    pub fn counts(&self) -> NodeCounts {
        self.root.counts()
    }

    pub fn display(&self, opts: TreeOpts) -> TreeDisplay<'_> {
        TreeDisplay::new(&self.root, opts)
    }
}

impl fmt::Display for AssetTrie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

/// Validates an asset name and returns its canonical form.
///
/// Backslashes become `/`. Rejected: empty names, a leading `/`, empty
/// segments (`a//b`, `a/`), and `.` or `..` segments.
pub fn canonical_name(name: &str) -> TrieResult<String> {
    let unified = path_to_unified_str(name);
    let valid = !unified.is_empty()
        && unified
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..");
    ensure!(valid, TrieError::InvalidName(name.to_string()));
    Ok(unified)
}
