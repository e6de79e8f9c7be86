// SPDX-License-Identifier: MIT

use alloc::{
    collections::BTreeMap,
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::fmt;
use time::OffsetDateTime;

use crate::core::accessor::AssetAccessor;
use crate::core::config::FsConfig;
use crate::core::errors::{AccessResult, TrieResult};
use crate::core::info::{DEFAULT_MODE, FileInfo};
use crate::core::utils::path_utils::extract_name_from_path;

/// One embedded blob, bound to exactly one leaf of the trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    name: String,
    content: Option<Arc<[u8]>>,
    size: Option<u64>,
    mod_time: OffsetDateTime,
    mode: u32,
}

impl AssetRecord {
    /// Builds the record for `name`, pulling metadata (and content when
    /// `config.preload` is set) from the accessor.
    ///
    /// Missing metadata is not an error: the configured default timestamp
    /// and [`DEFAULT_MODE`] apply.
    pub fn load<A: AssetAccessor + ?Sized>(
        name: String,
        accessor: &A,
        config: &FsConfig,
    ) -> TrieResult<Self> {
        let meta = accessor.metadata(&name).ok().unwrap_or_default();
        let content = if config.preload {
            Some(accessor.read(&name)?)
        } else {
            None
        };
        let size = content
            .as_ref()
            .map(|c| c.len() as u64)
            .or(meta.size);

        Ok(Self {
            name,
            content,
            size,
            mod_time: meta.modified.unwrap_or(config.default_mod_time),
            mode: meta.mode.unwrap_or(DEFAULT_MODE),
        })
    }

    /// Canonical name (full path).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Final path segment.
    #[inline]
    pub fn file_name(&self) -> &str {
        extract_name_from_path(&self.name)
    }

    /// Known size, if content is resident or the accessor reported one.
    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn mod_time(&self) -> OffsetDateTime {
        self.mod_time
    }

    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn is_resident(&self) -> bool {
        self.content.is_some()
    }

    /// Returns the content, from memory if resident, else through `accessor`.
    pub fn fetch<A: AssetAccessor + ?Sized>(&self, accessor: &A) -> AccessResult<Arc<[u8]>> {
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => accessor.read(&self.name),
        }
    }

    /// Stat result for a handle over `content`.
    pub fn info(&self, content: &[u8]) -> FileInfo {
        FileInfo::new_file(self.file_name(), content.len() as u64, self.mod_time).set_mode(self.mode)
    }
}

/// Node of the asset trie.
///
/// Variants:
/// - `Dir`  : synthesized directory, implied by deeper names; children sorted by name
/// - `Leaf` : exactly one asset, never any children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode {
    Dir(BTreeMap<String, TrieNode>),
    Leaf(AssetRecord),
}

impl TrieNode {
    #[inline]
    pub fn new_dir() -> Self {
        TrieNode::Dir(BTreeMap::new())
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self, TrieNode::Dir(_))
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TrieNode::Leaf(_))
    }

    #[inline]
    pub fn asset(&self) -> Option<&AssetRecord> {
        match self {
            TrieNode::Leaf(record) => Some(record),
            TrieNode::Dir(_) => None,
        }
    }

    #[inline]
    pub fn children(&self) -> Option<&BTreeMap<String, TrieNode>> {
        match self {
            TrieNode::Dir(children) => Some(children),
            TrieNode::Leaf(_) => None,
        }
    }

    /// Listing entries for the immediate children, in name order.
    ///
    /// Empty for a leaf.
    pub fn entries(&self) -> Vec<FileInfo> {
        self.children()
            .map(|children| {
                children
                    .iter()
                    .map(|(name, child)| FileInfo::new_entry(name.as_str(), child.is_dir()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn counts(&self) -> NodeCounts {
        fn walk(n: &TrieNode, acc: &mut NodeCounts) {
            match n {
                TrieNode::Leaf(record) => {
                    acc.files += 1;
                    acc.bytes = acc.bytes.saturating_add(record.size().unwrap_or(0));
                }
                TrieNode::Dir(children) => {
                    acc.dirs += 1;
                    for c in children.values() {
                        walk(c, acc);
                    }
                }
            }
        }
        let mut out = NodeCounts::default();
        walk(self, &mut out);
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeCounts {
    pub dirs: usize,
    pub files: usize,
    /// Sum of known sizes only.
    pub bytes: u64,
}

impl fmt::Display for NodeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.dirs;
        let fi = self.files;
        let d_lbl = if d == 1 { "Dir" } else { "Dirs" };
        let f_lbl = if fi == 1 { "File" } else { "Files" };
        write!(f, "{d} {d_lbl} • {fi} {f_lbl} • {}", pretty_bytes(self.bytes))
    }
}

/// Tree display options
#[derive(Clone, Copy, Debug)]
pub struct TreeOpts {
    pub max_depth: usize,  // 0 = unlimited
    pub max_lines: usize,  // 0 = unlimited
    pub name_width: usize, // name truncation
    pub show_sizes: bool,
    pub human_size: bool,
}

impl Default for TreeOpts {
    fn default() -> Self {
        Self {
            max_depth: 0,
            max_lines: 0,
            name_width: 40,
            show_sizes: true,
            human_size: true,
        }
    }
}

/// Renders a trie node as an ASCII tree.
pub struct TreeDisplay<'a> {
    root: &'a TrieNode,
    opts: TreeOpts,
}

impl<'a> TreeDisplay<'a> {
    pub fn new(root: &'a TrieNode, opts: TreeOpts) -> Self {
        Self { root, opts }
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/")?;

        // name, node, prefix, last, depth
        let mut stack: Vec<(&str, &TrieNode, String, bool, usize)> = Vec::new();
        push_children(&mut stack, self.root, "", 1);

        let mut printed = 0usize;

        while let Some((name, node, prefix, last, depth)) = stack.pop() {
            if self.opts.max_lines != 0 && printed >= self.opts.max_lines {
                writeln!(f, "{prefix}    … (+more)")?;
                break;
            }
            if self.opts.max_depth != 0 && depth > self.opts.max_depth {
                continue;
            }

            write!(f, "{}{}", prefix, if last { "└── " } else { "├── " })?;
            write!(f, "{}", truncate(name, self.opts.name_width))?;

            match node {
                TrieNode::Leaf(record) => {
                    if let (true, Some(size)) = (self.opts.show_sizes, record.size()) {
                        if self.opts.human_size {
                            write!(f, " ({})", pretty_bytes(size))?;
                        } else {
                            write!(f, " ({size} bytes)")?;
                        }
                    }
                    writeln!(f)?;
                }
                TrieNode::Dir(_) => {
                    writeln!(f, "/")?;
                    let mut new_prefix = String::with_capacity(prefix.len() + 4);
                    new_prefix.push_str(&prefix);
                    new_prefix.push_str(if last { "    " } else { "│   " });
                    push_children(&mut stack, node, &new_prefix, depth + 1);
                }
            }
            printed += 1;
        }
        Ok(())
    }
}

fn push_children<'a>(
    stack: &mut Vec<(&'a str, &'a TrieNode, String, bool, usize)>,
    node: &'a TrieNode,
    prefix: &str,
    depth: usize,
) {
    let Some(children) = node.children() else {
        return;
    };
    let len = children.len();
    // Reverse so the first child is popped first
    for (i, (name, child)) in children.iter().enumerate().rev() {
        stack.push((name.as_str(), child, prefix.to_string(), i == len - 1, depth));
    }
}

/// Human-readable byte count (`512 B`, `2.0 KiB`).
pub fn pretty_bytes(n: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    let mut val = n as f64;
    let mut idx = 0usize;
    while val >= 1024.0 && idx + 1 < UNITS.len() {
        val /= 1024.0;
        idx += 1;
    }
    if idx == 0 {
        format!("{} {}", n, UNITS[idx])
    } else {
        format!("{:.1} {}", val, UNITS[idx])
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl fmt::Display for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&TreeDisplay::new(self, TreeOpts::default()), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_bytes() {
        assert_eq!(pretty_bytes(512), "512 B");
        assert_eq!(pretty_bytes(2048), "2.0 KiB");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        assert_eq!(truncate("café.txt", 4), "caf");
        assert_eq!(truncate("short", 40), "short");
    }
}
