// SPDX-License-Identifier: MIT

//! Read-only virtual filesystem over embedded assets.
//!
//! A flat list of canonical names (`"data/img/a.png"`) is turned into an
//! [`AssetTrie`](crate::core::trie::AssetTrie) with synthesized parent directories,
//! then served through [`AssetFs`](vfs::AssetFs): `open`, `stat`,
//! paginated `readdir`. Content comes from an
//! [`AssetAccessor`](crate::core::accessor::AssetAccessor), typically the
//! [`StaticAccessor`](crate::core::embedded::StaticAccessor) over a table emitted by
//! the `petrify` generator.
//!
//! ```
//! use petrifs::prelude::*;
//!
//! let acc = MemAccessor::new()
//!     .with("data/foo.txt", "hi")
//!     .with("data/img/a.png", vec![1, 2, 3]);
//! let fs = AssetFs::from_catalog(acc, &FsConfig::new()).unwrap();
//!
//! let mut dir = fs.open("/data").unwrap();
//! let names: Vec<_> = dir.readdir(0).unwrap().iter().map(|e| e.name.clone()).collect();
//! assert_eq!(names, ["foo.txt", "img"]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

// Core Modules
pub mod core;
pub mod vfs;

// Reusable types and traits
pub use crate::core::traits::*;

/// Everything needed to build and query a namespace.
pub mod prelude {
    pub use crate::core::accessor::{AssetMeta, MemAccessor};
    pub use crate::core::config::FsConfig;
    pub use crate::core::embedded::{EmbeddedAsset, StaticAccessor};
    pub use crate::core::errors::*;
    pub use crate::core::info::{FileInfo, DEFAULT_MODE, DIR_MODE_FLAG};
    pub use crate::core::trie::{AssetRecord, AssetTrie, TreeOpts, TrieNode};
    pub use crate::core::traits::*;
    pub use crate::vfs::{AssetDir, AssetFile, AssetFs, AssetFsBuilder, Handle};
}
