// SPDX-License-Identifier: MIT

//! Content source for the asset trie.
//!
//! An [`AssetAccessor`] maps a canonical asset name to its bytes and,
//! optionally, its metadata. The trie never reads real disk; whatever the
//! accessor returns is the content served.
//!
//! Implementations:
//! - [`MemAccessor`]: owned in-memory map (tests, runtime-built namespaces)
//! - [`StaticAccessor`](crate::core::embedded::StaticAccessor): tables emitted by the `petrify` generator

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use time::OffsetDateTime;

use crate::core::errors::{AccessError, AccessResult};

/// Metadata an accessor may know about an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMeta {
    pub size: Option<u64>,
    pub modified: Option<OffsetDateTime>,
    pub mode: Option<u32>,
}

impl AssetMeta {
    pub fn new(size: u64, modified: OffsetDateTime) -> Self {
        Self {
            size: Some(size),
            modified: Some(modified),
            mode: None,
        }
    }

    pub fn set_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Abstraction for fetching asset content by canonical name.
///
/// Paths use `/` as separator and carry no leading slash.
pub trait AssetAccessor {
    /// Returns the full content of the asset.
    ///
    /// `AccessError::NotFound` when the name is unknown, `AccessError::Read`
    /// when it is known but its bytes can't be produced.
    fn read(&self, path: &str) -> AccessResult<Arc<[u8]>>;

    /// Returns the metadata of the asset, if the accessor tracks any.
    fn metadata(&self, path: &str) -> AccessResult<AssetMeta> {
        let _ = path;
        Err(AccessError::Unsupported)
    }
}

/// An accessor that can enumerate every name it serves.
pub trait AssetCatalog: AssetAccessor {
    fn names(&self) -> Vec<String>;
}

impl<A: AssetAccessor + ?Sized> AssetAccessor for &A {
    #[inline]
    fn read(&self, path: &str) -> AccessResult<Arc<[u8]>> {
        (**self).read(path)
    }

    #[inline]
    fn metadata(&self, path: &str) -> AccessResult<AssetMeta> {
        (**self).metadata(path)
    }
}

impl<A: AssetAccessor + ?Sized> AssetAccessor for Arc<A> {
    #[inline]
    fn read(&self, path: &str) -> AccessResult<Arc<[u8]>> {
        (**self).read(path)
    }

    #[inline]
    fn metadata(&self, path: &str) -> AccessResult<AssetMeta> {
        (**self).metadata(path)
    }
}

#[derive(Debug, Clone)]
struct MemAsset {
    content: Arc<[u8]>,
    meta: Option<AssetMeta>,
}

/// In-memory implementation of [`AssetAccessor`].
///
/// Useful for tests and for namespaces assembled at runtime.
#[derive(Debug, Clone, Default)]
pub struct MemAccessor {
    assets: BTreeMap<String, MemAsset>,
}

impl MemAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset without metadata. Replaces any previous content under `name`.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> &mut Self {
        self.assets.insert(
            name.into(),
            MemAsset {
                content: Arc::from(content.into()),
                meta: None,
            },
        );
        self
    }

    /// Adds an asset with metadata; `meta.size` is taken from the content.
    pub fn insert_with_meta(
        &mut self,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        meta: AssetMeta,
    ) -> &mut Self {
        let content: Arc<[u8]> = Arc::from(content.into());
        let meta = AssetMeta {
            size: Some(content.len() as u64),
            ..meta
        };
        self.assets.insert(
            name.into(),
            MemAsset {
                content,
                meta: Some(meta),
            },
        );
        self
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetAccessor for MemAccessor {
    fn read(&self, path: &str) -> AccessResult<Arc<[u8]>> {
        self.assets
            .get(path)
            .map(|asset| asset.content.clone())
            .ok_or(AccessError::NotFound)
    }

    fn metadata(&self, path: &str) -> AccessResult<AssetMeta> {
        let asset = self.assets.get(path).ok_or(AccessError::NotFound)?;
        asset.meta.clone().ok_or(AccessError::Unsupported)
    }
}

impl AssetCatalog for MemAccessor {
    fn names(&self) -> Vec<String> {
        self.assets.keys().map(|k| k.to_string()).collect()
    }
}
