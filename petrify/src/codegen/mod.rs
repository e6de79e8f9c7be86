// SPDX-License-Identifier: MIT

//! Rust source emission.
//!
//! ```text
//! // Code generated by petrify. DO NOT EDIT.
//! static ASSET_0: &[u8] = &[
//!     0x1f, 0x8b, 0x08, ...
//! ];
//! pub static ASSETS: &[EmbeddedAsset] = &[ EmbeddedAsset { .. }, .. ];
//! pub fn asset_fs() -> TrieResult<AssetFs<StaticAccessor>> { .. }
//! ```
//!
//! All paths in the output are absolute (`::petrifs::..`) so the file can be
//! `include!`d anywhere.

pub mod bytewriter;

pub use bytewriter::*;

use anyhow::Context;
use indicatif::ProgressBar;
use std::io::{self, Write};

use petrifs::core::accessor::AssetAccessor;

use crate::compress::gzip_into;
use crate::config::GenConfig;
use crate::host::{HostAccessor, HostAsset};

const EMBEDDED: &str = "::petrifs::core::embedded::EmbeddedAsset";
const ACCESSOR: &str = "::petrifs::core::embedded::StaticAccessor";
const FS_CONFIG: &str = "::petrifs::core::config::FsConfig";
const TRIE_RESULT: &str = "::petrifs::core::errors::TrieResult";
const ASSET_FS: &str = "::petrifs::vfs::AssetFs";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub assets: usize,
    pub raw_bytes: u64,
    pub stored_bytes: u64,
}

#[derive(Debug)]
struct Row {
    name: String,
    ident: String,
    compressed: bool,
    size: u64,
    mode: u32,
    mod_time: i64,
}

/// Streams one generated source file.
///
/// Data arrays are written as assets arrive; the table and the constructor
/// functions are written by [`SourceWriter::finish`].
#[derive(Debug)]
pub struct SourceWriter<W: Write> {
    w: W,
    rows: Vec<Row>,
    compress: bool,
    metadata: bool,
    stats: EmitStats,
}

impl<W: Write> SourceWriter<W> {
    pub fn new(mut w: W, compress: bool, metadata: bool) -> io::Result<Self> {
        writeln!(
            w,
            "// Code generated by petrify {}. DO NOT EDIT.",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(w)?;
        Ok(Self {
            w,
            rows: Vec::new(),
            compress,
            metadata,
            stats: EmitStats::default(),
        })
    }

    /// Writes the data array for `asset` and returns the number of bytes stored.
    pub fn write_asset(&mut self, asset: &HostAsset, data: &[u8]) -> io::Result<u64> {
        let ident = format!("ASSET_{}", self.rows.len());
        writeln!(self.w, "// {}", asset.name)?;
        write!(self.w, "static {ident}: &[u8] = &[")?;

        let bytes = ByteWriter::new(&mut self.w);
        let stored = if self.compress {
            gzip_into(data, bytes)?.written()
        } else {
            let mut bytes = bytes;
            bytes.write_all(data)?;
            bytes.written()
        };
        writeln!(self.w, "\n];\n")?;

        let (size, mode, mod_time) = if self.metadata {
            (data.len() as u64, asset.mode, asset.mod_time)
        } else {
            (0, 0, 0)
        };
        self.rows.push(Row {
            name: asset.name.clone(),
            ident,
            compressed: self.compress,
            size,
            mode,
            mod_time,
        });

        self.stats.assets += 1;
        self.stats.raw_bytes += data.len() as u64;
        self.stats.stored_bytes += stored;
        Ok(stored)
    }

    /// Writes the table and constructors, returning the writer and totals.
    pub fn finish(mut self) -> io::Result<(W, EmitStats)> {
        let w = &mut self.w;

        writeln!(w, "/// Every embedded asset, sorted by name.")?;
        writeln!(w, "pub static ASSETS: &[{EMBEDDED}] = &[")?;
        for row in &self.rows {
            writeln!(w, "    {EMBEDDED} {{")?;
            writeln!(w, "        name: {:?},", row.name)?;
            writeln!(w, "        data: {},", row.ident)?;
            writeln!(w, "        compressed: {},", row.compressed)?;
            writeln!(w, "        size: {},", row.size)?;
            writeln!(w, "        mode: 0o{:o},", row.mode)?;
            writeln!(w, "        mod_time: {},", row.mod_time)?;
            writeln!(w, "    }},")?;
        }
        writeln!(w, "];")?;
        writeln!(w)?;

        writeln!(w, "/// Filesystem over [`ASSETS`], mounted at the root.")?;
        writeln!(
            w,
            "pub fn asset_fs() -> {TRIE_RESULT}<{ASSET_FS}<{ACCESSOR}>> {{"
        )?;
        writeln!(w, "    asset_fs_with(&{FS_CONFIG}::new())")?;
        writeln!(w, "}}")?;
        writeln!(w)?;
        writeln!(w, "/// Filesystem over [`ASSETS`] with explicit settings.")?;
        writeln!(
            w,
            "pub fn asset_fs_with(config: &{FS_CONFIG}) -> {TRIE_RESULT}<{ASSET_FS}<{ACCESSOR}>> {{"
        )?;
        writeln!(
            w,
            "    {ASSET_FS}::from_catalog({ACCESSOR}::new(ASSETS), config)"
        )?;
        writeln!(w, "}}")?;

        self.w.flush()?;
        Ok((self.w, self.stats))
    }
}

/// Emits every asset of `acc`, in name order, into `w`.
pub fn generate<W: Write>(
    w: W,
    acc: &HostAccessor,
    cfg: &GenConfig,
    pb: &ProgressBar,
) -> anyhow::Result<(W, EmitStats)> {
    let mut out = SourceWriter::new(w, cfg.compress, cfg.metadata)?;

    for asset in acc.iter() {
        pb.set_message(asset.name.clone());
        let data = acc
            .read(&asset.name)
            .with_context(|| format!("cannot read {}", asset.path.display()))?;
        let stored = out.write_asset(asset, &data)?;
        crate::log_verbose!("{} ({} -> {} bytes)", asset.name, data.len(), stored);
        pb.inc(asset.size);
    }

    Ok(out.finish()?)
}
