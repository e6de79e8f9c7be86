// SPDX-License-Identifier: MIT

// === Sub-modules ===
#[macro_use]
pub mod macros;

pub mod accessor;
pub mod config;
pub mod embedded;
pub mod errors;
pub mod info;
pub mod trie;
pub mod utils;

// === Core Traits ===
pub mod traits {
    pub use super::accessor::{AssetAccessor, AssetCatalog};
    pub use crate::vfs::VfsHandle;
}

// === Error types ===
pub use errors::*;

// === Utilities ===
pub use utils::{path_utils::*, time_utils::*};
