// SPDX-License-Identifier: MIT

//! Open sessions over the trie.
//!
//! A handle is a short-lived value owned by one caller: it carries its own
//! read position or listing cursor and shares only immutable content with
//! the namespace. Closing is dropping.

use alloc::{sync::Arc, vec::Vec};

use crate::core::errors::{VfsError, VfsResult};
use crate::core::info::FileInfo;

/// Operations shared by file and directory handles.
pub trait VfsHandle {
    /// Metadata of the opened entry.
    fn stat(&self) -> FileInfo;

    /// Releases the handle. Nothing else is held, so this never fails.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

/// Read session over one asset's content.
///
/// Reads are bounded by `[0, size)`; the content buffer is shared with the
/// namespace and never copied.
#[derive(Debug, Clone)]
pub struct AssetFile {
    info: FileInfo,
    content: Arc<[u8]>,
    pos: u64,
}

impl AssetFile {
    pub fn new(info: FileInfo, content: Arc<[u8]>) -> Self {
        Self {
            info,
            content,
            pos: 0,
        }
    }

    #[inline]
    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Reads from `offset` into `buf` without touching the read position.
    ///
    /// Returns the number of bytes copied, `0` at or past the end.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> usize {
        let size = self.size();
        if offset >= size {
            return 0;
        }
        let start = offset as usize;
        let n = buf.len().min(self.content.len() - start);
        buf[..n].copy_from_slice(&self.content[start..start + n]);
        n
    }

    /// Reads from the current position and advances it.
    pub fn read_next(&mut self, buf: &mut [u8]) -> usize {
        let n = self.read_at(self.pos, buf);
        self.pos += n as u64;
        n
    }
}

impl VfsHandle for AssetFile {
    fn stat(&self) -> FileInfo {
        self.info.clone()
    }
}

#[cfg(feature = "std")]
impl std::io::Read for AssetFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.read_next(buf))
    }
}

#[cfg(feature = "std")]
impl std::io::Seek for AssetFile {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        use std::io::{Error, ErrorKind, SeekFrom};

        let (base, delta) = match pos {
            SeekFrom::Start(n) => {
                self.pos = n;
                return Ok(n);
            }
            SeekFrom::End(delta) => (self.size(), delta),
            SeekFrom::Current(delta) => (self.pos, delta),
        };
        let target = base
            .checked_add_signed(delta)
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "seek to a negative position"))?;
        self.pos = target;
        Ok(target)
    }
}

/// Enumeration session over one directory's immediate children.
///
/// The listing is captured at open time.
#[derive(Debug, Clone)]
pub struct AssetDir {
    info: FileInfo,
    children: Vec<FileInfo>,
    cursor: usize,
}

impl AssetDir {
    pub fn new(info: FileInfo, children: Vec<FileInfo>) -> Self {
        Self {
            info,
            children,
            cursor: 0,
        }
    }

    /// Lists entries.
    ///
    /// - `count <= 0`: the whole listing, whatever the cursor; the cursor is untouched.
    /// - `count > 0`: up to `count` unread entries, advancing the cursor. Once
    ///   everything was returned the result is empty.
    pub fn readdir(&mut self, count: isize) -> &[FileInfo] {
        if count <= 0 {
            return &self.children;
        }
        let start = self.cursor;
        let end = start.saturating_add(count as usize).min(self.children.len());
        self.cursor = end;
        &self.children[start..end]
    }

    /// Full listing, independent of the cursor.
    #[inline]
    pub fn entries(&self) -> &[FileInfo] {
        &self.children
    }

    /// Number of entries not yet returned by incremental reads.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.children.len() - self.cursor
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl VfsHandle for AssetDir {
    fn stat(&self) -> FileInfo {
        self.info.clone()
    }
}

/// Walks the unread entries; `None` marks the end of the directory.
impl Iterator for AssetDir {
    type Item = FileInfo;

    fn next(&mut self) -> Option<FileInfo> {
        let entry = self.children.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// Result of [`AssetFs::open`](crate::vfs::AssetFs::open).
#[derive(Debug, Clone)]
pub enum Handle {
    File(AssetFile),
    Dir(AssetDir),
}

impl Handle {
    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self, Handle::Dir(_))
    }

    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Handle::File(f) => &f.info.name,
            Handle::Dir(d) => &d.info.name,
        }
    }

    /// Directory listing; a file handle fails with [`VfsError::NotADirectory`].
    pub fn readdir(&mut self, count: isize) -> VfsResult<&[FileInfo]> {
        match self {
            Handle::Dir(d) => Ok(d.readdir(count)),
            Handle::File(_) => Err(VfsError::NotADirectory),
        }
    }

    pub fn into_file(self) -> Option<AssetFile> {
        match self {
            Handle::File(f) => Some(f),
            Handle::Dir(_) => None,
        }
    }

    pub fn into_dir(self) -> Option<AssetDir> {
        match self {
            Handle::Dir(d) => Some(d),
            Handle::File(_) => None,
        }
    }
}

impl VfsHandle for Handle {
    fn stat(&self) -> FileInfo {
        match self {
            Handle::File(f) => f.stat(),
            Handle::Dir(d) => d.stat(),
        }
    }
}

/// Directories have an empty body.
#[cfg(feature = "std")]
impl std::io::Read for Handle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Handle::File(f) => std::io::Read::read(f, buf),
            Handle::Dir(_) => Ok(0),
        }
    }
}

#[cfg(feature = "std")]
impl std::io::Seek for Handle {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        match self {
            Handle::File(f) => std::io::Seek::seek(f, pos),
            Handle::Dir(_) => Ok(0),
        }
    }
}
