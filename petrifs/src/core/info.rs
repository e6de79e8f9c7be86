// SPDX-License-Identifier: MIT

use alloc::string::String;
use time::OffsetDateTime;

/// Permission bits reported for every embedded entry.
pub const DEFAULT_MODE: u32 = 0o644;

/// Bit set in [`FileInfo::mode`] for directories (Unix `S_IFDIR`).
pub const DIR_MODE_FLAG: u32 = 0o040000;

/// Metadata of a virtual entry, as returned by `stat` and directory listings.
///
/// Fields:
/// - `name`: final path segment only (`""` for the root).
/// - `dir`: true if this entry is a directory.
/// - `size`: content length; always `0` for directories and listing entries.
/// - `modified`: last modification timestamp, if known.
/// - `mode`: Unix-like permission bits, with [`DIR_MODE_FLAG`] for directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub dir: bool,
    pub size: u64,
    pub modified: Option<OffsetDateTime>,
    pub mode: u32,
}

impl FileInfo {
    /// Creates directory metadata (`dir = true`, size 0, no timestamp).
    pub fn new_dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: true,
            size: 0,
            modified: None,
            mode: DEFAULT_MODE | DIR_MODE_FLAG,
        }
    }

    /// Creates file metadata.
    pub fn new_file(name: impl Into<String>, size: u64, modified: OffsetDateTime) -> Self {
        Self {
            name: name.into(),
            dir: false,
            size,
            modified: Some(modified),
            mode: DEFAULT_MODE,
        }
    }

    /// Creates a directory-listing entry. Listings never probe leaf size.
    pub fn new_entry(name: impl Into<String>, dir: bool) -> Self {
        if dir {
            return Self::new_dir(name);
        }
        Self {
            name: name.into(),
            dir: false,
            size: 0,
            modified: None,
            mode: DEFAULT_MODE,
        }
    }

    /// Sets the permission bits, keeping the directory flag consistent.
    pub fn set_mode(mut self, mode: u32) -> Self {
        self.mode = if self.dir {
            mode | DIR_MODE_FLAG
        } else {
            mode & !DIR_MODE_FLAG
        };
        self
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.dir
    }

    /// Permission bits without the type flag.
    #[inline]
    pub fn perm(&self) -> u32 {
        self.mode & 0o7777
    }
}
