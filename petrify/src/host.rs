// SPDX-License-Identifier: MIT

//! Files on the build host, served through the same accessor seam the
//! generated code uses at runtime.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use petrifs::core::accessor::{AssetAccessor, AssetCatalog, AssetMeta};
use petrifs::core::errors::{AccessError, AccessResult};
use petrifs::core::utils::time_utils::unix_to_offsetdatetime;

/// A file found on the host, with its canonical asset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAsset {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub mode: u32,
    /// Unix seconds, `0` if unknown.
    pub mod_time: i64,
}

/// [`AssetAccessor`] reading host files on demand.
///
/// Keyed by canonical name. The catalog keeps every collected name in
/// discovery order, duplicates included, so the trie build reports them.
#[derive(Debug, Default)]
pub struct HostAccessor {
    assets: BTreeMap<String, HostAsset>,
    order: Vec<String>,
}

impl HostAccessor {
    pub fn new(assets: Vec<HostAsset>) -> Self {
        let mut out = Self::default();
        for asset in assets {
            out.order.push(asset.name.clone());
            out.assets.insert(asset.name.clone(), asset);
        }
        out
    }

    /// Assets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &HostAsset> {
        self.assets.values()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Sum of host file sizes.
    pub fn total_bytes(&self) -> u64 {
        self.assets.values().map(|a| a.size).sum()
    }
}

impl AssetAccessor for HostAccessor {
    fn read(&self, path: &str) -> AccessResult<Arc<[u8]>> {
        let asset = self.assets.get(path).ok_or(AccessError::NotFound)?;
        match fs::read(&asset.path) {
            Ok(data) => Ok(Arc::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AccessError::NotFound),
            Err(e) => Err(AccessError::Read(format!("{}: {e}", asset.path.display()))),
        }
    }

    fn metadata(&self, path: &str) -> AccessResult<AssetMeta> {
        let asset = self.assets.get(path).ok_or(AccessError::NotFound)?;
        Ok(AssetMeta {
            size: Some(asset.size),
            modified: unix_to_offsetdatetime(asset.mod_time),
            mode: Some(asset.mode),
        })
    }
}

/// Every collected name, duplicates included, in discovery order.
impl AssetCatalog for HostAccessor {
    fn names(&self) -> Vec<String> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, path: PathBuf, size: u64) -> HostAsset {
        HostAsset {
            name: name.into(),
            path,
            size,
            mode: 0o640,
            mod_time: 1_700_000_000,
        }
    }

    #[test]
    fn test_read_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "abc").unwrap();

        let acc = HostAccessor::new(vec![asset("a.txt", file, 3)]);
        assert_eq!(&*acc.read("a.txt").unwrap(), b"abc");
        assert_eq!(acc.read("b.txt"), Err(AccessError::NotFound));

        let meta = acc.metadata("a.txt").unwrap();
        assert_eq!(meta.size, Some(3));
        assert_eq!(meta.mode, Some(0o640));
        assert_eq!(meta.modified.map(|t| t.unix_timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn test_vanished_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let acc = HostAccessor::new(vec![asset("gone", dir.path().join("gone"), 1)]);
        assert_eq!(acc.read("gone"), Err(AccessError::NotFound));
    }

    #[test]
    fn test_names_keep_duplicates() {
        let acc = HostAccessor::new(vec![
            asset("x", PathBuf::from("a/x"), 1),
            asset("x", PathBuf::from("b/x"), 2),
        ]);
        assert_eq!(acc.names(), ["x", "x"]);
        assert_eq!(acc.len(), 1);
    }
}
