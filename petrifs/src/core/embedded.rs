// SPDX-License-Identifier: MIT

//! Asset tables compiled into the program.
//!
//! The `petrify` generator emits a `&'static [EmbeddedAsset]` table; a
//! [`StaticAccessor`] serves it to the trie. Compressed rows are gzip streams
//! and are inflated on every read (requires the `gzip` feature).

use alloc::{collections::BTreeMap, string::String, sync::Arc, vec::Vec};

use crate::core::accessor::{AssetAccessor, AssetCatalog, AssetMeta};
use crate::core::errors::{AccessError, AccessResult};
use crate::core::utils::time_utils::unix_to_offsetdatetime;

/// One row of a generated asset table.
///
/// `size`, `mode` and `mod_time` are all zero when the generator ran with
/// `--nometadata`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedAsset {
    pub name: &'static str,
    pub data: &'static [u8],
    pub compressed: bool,
    /// Uncompressed length in bytes.
    pub size: u64,
    pub mode: u32,
    /// Unix seconds.
    pub mod_time: i64,
}

impl EmbeddedAsset {
    #[inline]
    pub fn has_metadata(&self) -> bool {
        self.size != 0 || self.mode != 0 || self.mod_time != 0
    }

    /// Returns the uncompressed content of this row.
    pub fn content(&self) -> AccessResult<Vec<u8>> {
        if !self.compressed {
            return Ok(self.data.to_vec());
        }
        gunzip(self.data)
    }
}

#[cfg(feature = "gzip")]
fn gunzip(data: &[u8]) -> AccessResult<Vec<u8>> {
    use alloc::string::ToString;
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| AccessError::Read(e.to_string()))?;
    Ok(out)
}

#[cfg(not(feature = "gzip"))]
fn gunzip(_data: &[u8]) -> AccessResult<Vec<u8>> {
    Err(AccessError::Read("gzip support disabled".into()))
}

/// [`AssetAccessor`] over a generated table.
#[derive(Debug, Clone)]
pub struct StaticAccessor {
    table: &'static [EmbeddedAsset],
    index: BTreeMap<&'static str, usize>,
}

impl StaticAccessor {
    /// Indexes `table` by name. A later row with the same name shadows an earlier one.
    pub fn new(table: &'static [EmbeddedAsset]) -> Self {
        let index = table
            .iter()
            .enumerate()
            .map(|(i, asset)| (asset.name, i))
            .collect();
        Self { table, index }
    }

    pub fn get(&self, name: &str) -> Option<&'static EmbeddedAsset> {
        let table = self.table;
        self.index.get(name).map(|&i| &table[i])
    }

    pub fn table(&self) -> &'static [EmbeddedAsset] {
        self.table
    }
}

impl AssetAccessor for StaticAccessor {
    fn read(&self, path: &str) -> AccessResult<Arc<[u8]>> {
        let asset = self.get(path).ok_or(AccessError::NotFound)?;
        Ok(Arc::from(asset.content()?))
    }

    fn metadata(&self, path: &str) -> AccessResult<AssetMeta> {
        let asset = self.get(path).ok_or(AccessError::NotFound)?;
        if !asset.has_metadata() {
            return Err(AccessError::Unsupported);
        }
        Ok(AssetMeta {
            size: Some(asset.size),
            modified: unix_to_offsetdatetime(asset.mod_time),
            mode: (asset.mode != 0).then_some(asset.mode),
        })
    }
}

impl AssetCatalog for StaticAccessor {
    fn names(&self) -> Vec<String> {
        self.table.iter().map(|asset| String::from(asset.name)).collect()
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    static PLAIN: &[EmbeddedAsset] = &[
        EmbeddedAsset {
            name: "data/foo.txt",
            data: b"hi",
            compressed: false,
            size: 2,
            mode: 0o600,
            mod_time: 1_700_000_000,
        },
        EmbeddedAsset {
            name: "data/bare.txt",
            data: b"bare",
            compressed: false,
            size: 0,
            mode: 0,
            mod_time: 0,
        },
        EmbeddedAsset {
            name: "data/broken.gz",
            data: b"definitely not gzip",
            compressed: true,
            size: 5,
            mode: 0o644,
            mod_time: 0,
        },
    ];

    #[test]
    fn test_static_read_plain() {
        let acc = StaticAccessor::new(PLAIN);
        assert_eq!(&*acc.read("data/foo.txt").unwrap(), b"hi");
        assert_eq!(acc.read("nope"), Err(AccessError::NotFound));
    }

    #[test]
    fn test_static_metadata() {
        let acc = StaticAccessor::new(PLAIN);
        let meta = acc.metadata("data/foo.txt").unwrap();
        assert_eq!(meta.size, Some(2));
        assert_eq!(meta.mode, Some(0o600));
        assert_eq!(
            meta.modified.map(|t| t.unix_timestamp()),
            Some(1_700_000_000)
        );

        assert_eq!(acc.metadata("data/bare.txt"), Err(AccessError::Unsupported));
        assert_eq!(acc.metadata("nope"), Err(AccessError::NotFound));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_static_corrupt_gzip_is_read_error() {
        let acc = StaticAccessor::new(PLAIN);
        assert!(matches!(acc.read("data/broken.gz"), Err(AccessError::Read(_))));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_static_gzip_roundtrip() {
        use flate2::{Compression, write::GzEncoder};
        use std::io::Write;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello, embedded world").unwrap();
        let packed: &'static [u8] = Box::leak(enc.finish().unwrap().into_boxed_slice());
        let table: &'static [EmbeddedAsset] = Box::leak(Box::new([EmbeddedAsset {
            name: "greeting.txt",
            data: packed,
            compressed: true,
            size: 21,
            mode: 0o644,
            mod_time: 0,
        }]));

        let acc = StaticAccessor::new(table);
        assert_eq!(&*acc.read("greeting.txt").unwrap(), b"hello, embedded world");
        assert_eq!(acc.names(), ["greeting.txt"]);
    }
}
