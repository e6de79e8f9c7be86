// SPDX-License-Identifier: MIT

use alloc::string::String;
use core::fmt;

/// Failure reported by an [`AssetAccessor`](crate::core::accessor::AssetAccessor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    NotFound,
    /// Content exists but could not be produced (e.g. corrupt compressed data).
    Read(String),
    Unsupported,
}

impl AccessError {
    pub fn msg(&self) -> &'static str {
        match self {
            AccessError::NotFound => "Asset not found",
            AccessError::Read(_) => "Asset can't be read",
            AccessError::Unsupported => "Unsupported operation",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            AccessError::Read(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<AssetError> {
        None
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self.msg(), self.detail(), self.source())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieError {
    NotFound,
    NotADirectory,
    IsADirectory,
    DuplicateAsset(String),
    PathConflict(String),
    InvalidName(String),
    Access(AccessError),
}

impl TrieError {
    pub fn msg(&self) -> &'static str {
        match self {
            TrieError::NotFound => "Path not found",
            TrieError::NotADirectory => "Not a directory",
            TrieError::IsADirectory => "Is a directory",
            TrieError::DuplicateAsset(_) => "Duplicate asset",
            TrieError::PathConflict(_) => "Asset path conflicts with an existing entry",
            TrieError::InvalidName(_) => "Invalid asset name",
            TrieError::Access(_) => "Access error",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            TrieError::DuplicateAsset(name)
            | TrieError::PathConflict(name)
            | TrieError::InvalidName(name) => Some(name),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<AssetError> {
        match self {
            TrieError::Access(e) => Some(AssetError::Access(e.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for TrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self.msg(), self.detail(), self.source())
    }
}

/// Errors surfaced by [`AssetFs`](crate::vfs::AssetFs).
///
/// `NotExist` is the only "missing" signal; a serving layer maps it to 404
/// and everything else to 500 (see [`VfsError::is_not_exist`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    NotExist,
    NotADirectory,
    IsADirectory,
    Access(AccessError),
    Trie(TrieError),
}

impl VfsError {
    pub fn msg(&self) -> &'static str {
        match self {
            VfsError::NotExist => "File does not exist",
            VfsError::NotADirectory => "Not a directory",
            VfsError::IsADirectory => "Is a directory",
            VfsError::Access(_) => "Access error",
            VfsError::Trie(_) => "Trie error",
        }
    }

    pub fn source(&self) -> Option<AssetError> {
        match self {
            VfsError::Access(e) => Some(AssetError::Access(e.clone())),
            VfsError::Trie(e) => Some(AssetError::Trie(e.clone())),
            _ => None,
        }
    }

    #[inline]
    pub fn is_not_exist(&self) -> bool {
        matches!(self, VfsError::NotExist)
    }
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self.msg(), None, self.source())
    }
}

// Lookup misses become NotExist here and nowhere else.
impl From<TrieError> for VfsError {
    fn from(e: TrieError) -> Self {
        match e {
            TrieError::NotFound => VfsError::NotExist,
            TrieError::NotADirectory => VfsError::NotADirectory,
            TrieError::IsADirectory => VfsError::IsADirectory,
            TrieError::Access(e) => VfsError::Access(e),
            other => VfsError::Trie(other),
        }
    }
}

/// Top-level error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    Access(AccessError),
    Trie(TrieError),
    Vfs(VfsError),
    Other(&'static str),
}

impl AssetError {
    pub fn msg(&self) -> &'static str {
        match self {
            AssetError::Access(e) => e.msg(),
            AssetError::Trie(e) => e.msg(),
            AssetError::Vfs(e) => e.msg(),
            AssetError::Other(msg) => msg,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            AssetError::Access(e) => e.detail(),
            AssetError::Trie(e) => e.detail(),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<AssetError> {
        match self {
            AssetError::Access(e) => e.source(),
            AssetError::Trie(e) => e.source(),
            AssetError::Vfs(e) => e.source(),
            AssetError::Other(_) => None,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self.msg(), self.detail(), self.source())
    }
}

fn write_chain(
    f: &mut fmt::Formatter<'_>,
    msg: &str,
    detail: Option<&str>,
    source: Option<AssetError>,
) -> fmt::Result {
    write!(f, "{msg}")?;
    if let Some(detail) = detail {
        write!(f, ": {detail}")?;
    }
    let mut current = source;
    while let Some(src) = current {
        write!(f, "\n  caused by: {}", src.msg())?;
        if let Some(detail) = src.detail() {
            write!(f, ": {detail}")?;
        }
        current = src.source();
    }
    Ok(())
}

#[cfg(feature = "std")]
impl std::error::Error for AccessError {}
#[cfg(feature = "std")]
impl std::error::Error for TrieError {}
#[cfg(feature = "std")]
impl std::error::Error for VfsError {}
#[cfg(feature = "std")]
impl std::error::Error for AssetError {}

// === type *Result ===

pub type AccessResult<T = ()> = Result<T, AccessError>;
pub type TrieResult<T = ()> = Result<T, TrieError>;
pub type VfsResult<T = ()> = Result<T, VfsError>;

crate::petrifs_error_wiring! {
    top => AssetError {
        AccessError : Access,
        TrieError   : Trie,
        VfsError    : Vfs,
    },
    sub => {
        AccessError => [ TrieError::Access, VfsError::Access ],
    },
}
