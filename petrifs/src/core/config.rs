// SPDX-License-Identifier: MIT

use alloc::string::String;
use time::OffsetDateTime;

use crate::core::utils::time_utils::now_utc;

/// Construction and mount settings for an asset namespace.
///
/// - `prefix`: path prepended to every lookup made through [`AssetFs`](crate::vfs::AssetFs).
/// - `default_mod_time`: timestamp for assets whose accessor reports none.
/// - `preload`: read every asset's content while building the trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsConfig {
    pub prefix: String,
    pub default_mod_time: OffsetDateTime,
    pub preload: bool,
}

impl FsConfig {
    /// Empty prefix, no preload, default timestamp taken from the clock now.
    pub fn new() -> Self {
        Self::with_mod_time(now_utc())
    }

    /// Same as [`Self::new`] with a fixed default timestamp, for reproducible builds.
    pub fn with_mod_time(default_mod_time: OffsetDateTime) -> Self {
        Self {
            prefix: String::new(),
            default_mod_time,
            preload: false,
        }
    }

    pub fn set_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn set_preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }
}

impl Default for FsConfig {
    fn default() -> Self {
        Self::new()
    }
}
