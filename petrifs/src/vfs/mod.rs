// SPDX-License-Identifier: MIT

//! Virtual filesystem over an [`AssetTrie`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Open Flow                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  open(name)                                                 │
//! │     │                                                       │
//! │     ├─► clean(name), join under prefix, strip leading "/"   │
//! │     │                                                       │
//! │     └─► AssetTrie::lookup                                   │
//! │            ├─► Leaf ──► content (resident or accessor)      │
//! │            │            └─► Handle::File                    │
//! │            ├─► Dir  ──► listing snapshot                    │
//! │            │            └─► Handle::Dir                     │
//! │            └─► NotFound ──► VfsError::NotExist              │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Accessor failures are returned as [`VfsError::Access`], so a serving
//! layer can tell "missing" (404) from "broken" (500) by type.

pub mod handle;

pub use handle::*;

use alloc::{
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use time::OffsetDateTime;

use crate::core::accessor::{AssetAccessor, AssetCatalog};
use crate::core::config::FsConfig;
use crate::core::errors::{TrieResult, VfsResult};
use crate::core::info::FileInfo;
use crate::core::trie::{AssetTrie, TrieNode};
use crate::core::utils::path_utils::{clean_path, extract_name_from_path, mount_path};

/// Read-only filesystem over embedded assets.
///
/// Cloning is cheap: the trie and the accessor are shared. Every query takes
/// `&self`, so one instance can serve any number of threads.
#[derive(Debug)]
pub struct AssetFs<A> {
    trie: Arc<AssetTrie>,
    accessor: Arc<A>,
    prefix: String,
}

impl<A> Clone for AssetFs<A> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            accessor: self.accessor.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

impl<A: AssetAccessor> AssetFs<A> {
    /// Builds the namespace from `names` and mounts it under `config.prefix`.
    pub fn new<I, S>(names: I, accessor: A, config: &FsConfig) -> TrieResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trie = AssetTrie::build(names, &accessor, config)?;
        Ok(Self {
            trie: Arc::new(trie),
            accessor: Arc::new(accessor),
            prefix: clean_path(&config.prefix),
        })
    }

    pub fn builder(accessor: A) -> AssetFsBuilder<A> {
        AssetFsBuilder::new(accessor)
    }

    /// Same namespace, served under another prefix.
    pub fn remount(&self, prefix: &str) -> Self {
        Self {
            trie: self.trie.clone(),
            accessor: self.accessor.clone(),
            prefix: clean_path(prefix),
        }
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn trie(&self) -> &AssetTrie {
        &self.trie
    }

    #[inline]
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Canonical trie path a request name resolves to.
    pub fn resolve(&self, name: &str) -> String {
        mount_path(&self.prefix, name)
    }

    /// Opens `name` as a file or directory handle.
    pub fn open(&self, name: &str) -> VfsResult<Handle> {
        let path = self.resolve(name);
        match self.trie.lookup(&path)? {
            TrieNode::Leaf(record) => {
                let content = record.fetch(self.accessor.as_ref())?;
                let info = record.info(&content);
                Ok(Handle::File(AssetFile::new(info, content)))
            }
            node @ TrieNode::Dir(_) => {
                let info = FileInfo::new_dir(extract_name_from_path(&path));
                Ok(Handle::Dir(AssetDir::new(info, node.entries())))
            }
        }
    }

    /// Immediate children of directory `name`, sorted by name.
    pub fn read_dir(&self, name: &str) -> VfsResult<Vec<FileInfo>> {
        Ok(self.trie.list_children(&self.resolve(name))?)
    }

    /// Content of file `name`.
    pub fn read(&self, name: &str) -> VfsResult<Arc<[u8]>> {
        let record = self.trie.record(&self.resolve(name))?;
        Ok(record.fetch(self.accessor.as_ref())?)
    }

    /// Metadata of `name`, identical to `open(name)?.stat()`.
    ///
    /// File sizes are the length of the content served, never the accessor's
    /// reported size, so non-resident files are read.
    pub fn stat(&self, name: &str) -> VfsResult<FileInfo> {
        let path = self.resolve(name);
        match self.trie.lookup(&path)? {
            TrieNode::Leaf(record) => {
                let content = record.fetch(self.accessor.as_ref())?;
                Ok(record.info(&content))
            }
            TrieNode::Dir(_) => Ok(FileInfo::new_dir(extract_name_from_path(&path))),
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.trie.lookup(&self.resolve(name)).is_ok()
    }

    /// Every asset name visible under the current prefix, relative to it, sorted.
    pub fn names(&self) -> Vec<String> {
        if self.prefix.is_empty() {
            return self.trie.names();
        }
        let mut base = self.prefix.clone();
        base.push('/');
        self.trie
            .names()
            .into_iter()
            .filter_map(|name| name.strip_prefix(base.as_str()).map(|rel| rel.to_string()))
            .collect()
    }
}

impl<A: AssetCatalog> AssetFs<A> {
    /// Builds the namespace from every name the accessor serves.
    pub fn from_catalog(accessor: A, config: &FsConfig) -> TrieResult<Self> {
        let names = accessor.names();
        Self::new(names, accessor, config)
    }
}

/// Step-by-step construction of an [`AssetFs`].
///
/// # Example
///
/// ```
/// use petrifs::prelude::*;
///
/// let acc = MemAccessor::new().with("web/index.html", "<h1>hi</h1>");
/// let fs = AssetFs::builder(acc)
///     .name("web/index.html")
///     .prefix("web")
///     .build()
///     .unwrap();
///
/// assert!(fs.open("/index.html").is_ok());
/// assert!(fs.open("/missing").unwrap_err().is_not_exist());
/// ```
#[derive(Debug)]
pub struct AssetFsBuilder<A> {
    accessor: A,
    names: Vec<String>,
    config: FsConfig,
}

impl<A: AssetAccessor> AssetFsBuilder<A> {
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            names: Vec::new(),
            config: FsConfig::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn config(mut self, config: FsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    pub fn default_mod_time(mut self, mod_time: OffsetDateTime) -> Self {
        self.config.default_mod_time = mod_time;
        self
    }

    pub fn preload(mut self, preload: bool) -> Self {
        self.config.preload = preload;
        self
    }

    pub fn build(self) -> TrieResult<AssetFs<A>> {
        AssetFs::new(self.names, self.accessor, &self.config)
    }
}

impl<A: AssetCatalog> AssetFsBuilder<A> {
    /// Adds every name the accessor serves.
    pub fn catalog_names(mut self) -> Self {
        let names = self.accessor.names();
        self.names.extend(names);
        self
    }
}
