// SPDX-License-Identifier: MIT

//! Host-side discovery of the files to embed.

use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use petrifs::core::trie::canonical_name;
use petrifs::core::utils::path_utils::{normalize_relative_path, path_to_unified_str};
use petrifs::core::utils::time_utils::systemtime_to_offsetdatetime;

use crate::config::GenConfig;
use crate::host::HostAsset;

/// Suffix marking a recursive input (`static/...`).
pub const RECURSIVE_SUFFIX: &str = "/...";

/// One `<INPUT>` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    pub path: PathBuf,
    pub recursive: bool,
}

impl InputConfig {
    /// `path/...` walks the whole tree below `path`; plain `path` only its
    /// immediate files.
    pub fn parse(arg: &str) -> Self {
        let unified = path_to_unified_str(arg);
        let (raw, recursive) = match unified.strip_suffix(RECURSIVE_SUFFIX) {
            Some(base) => (base, true),
            None if unified == "..." => (".", true),
            None => (unified.as_str(), false),
        };
        Self {
            path: clean_host_path(Path::new(raw)),
            recursive,
        }
    }
}

/// Drops `.` components and redundant separators, so `./static//css` becomes `static/css`.
fn clean_host_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Walks every input and returns the assets found, in discovery order.
///
/// Directory entries are visited sorted by name. Each directory is visited at
/// most once, so symlink cycles terminate.
pub fn collect_assets(cfg: &GenConfig) -> anyhow::Result<Vec<HostAsset>> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();

    for input in &cfg.inputs {
        let meta = fs::metadata(&input.path)
            .with_context(|| format!("cannot stat input {}", input.path.display()))?;
        if meta.is_dir() {
            walk_dir(cfg, &input.path, input.recursive, &mut visited, &mut out)?;
        } else {
            let host = host_str(&input.path);
            if cfg.is_ignored(&host) {
                crate::log_verbose!("Ignoring {host}");
                continue;
            }
            out.push(host_asset(cfg, &input.path, &meta)?);
        }
    }
    Ok(out)
}

fn walk_dir(
    cfg: &GenConfig,
    dir: &Path,
    recursive: bool,
    visited: &mut HashSet<PathBuf>,
    out: &mut Vec<HostAsset>,
) -> anyhow::Result<()> {
    let real = fs::canonicalize(dir)
        .with_context(|| format!("cannot resolve {}", dir.display()))?;
    if !visited.insert(real) {
        crate::log_verbose!("Skipping {} (already visited)", dir.display());
        return Ok(());
    }

    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let host = host_str(&path);
        if cfg.is_ignored(&host) {
            crate::log_verbose!("Ignoring {host}");
            continue;
        }

        // Follows symlinks.
        let meta = fs::metadata(&path).with_context(|| format!("cannot stat {host}"))?;
        if meta.is_dir() {
            if recursive {
                walk_dir(cfg, &path, recursive, visited, out)?;
            }
        } else if meta.is_file() {
            out.push(host_asset(cfg, &path, &meta)?);
        }
    }
    Ok(())
}

fn host_str(path: &Path) -> String {
    path_to_unified_str(&path.to_string_lossy())
}

/// Fails when the name left after prefix stripping is not a valid asset name,
/// e.g. `../site/index.html` for an input outside the working directory.
fn host_asset(cfg: &GenConfig, path: &Path, meta: &fs::Metadata) -> anyhow::Result<HostAsset> {
    let host = host_str(path);
    let name = normalize_relative_path(&host, &cfg.prefix);
    if canonical_name(&name).is_err() {
        anyhow::bail!(
            "{host}: asset name {name:?} is not a clean relative path (use --prefix to strip the leading part)"
        );
    }
    let mod_time = meta
        .modified()
        .ok()
        .map(|t| systemtime_to_offsetdatetime(t).unix_timestamp())
        .unwrap_or(0);

    Ok(HostAsset {
        name,
        path: path.to_path_buf(),
        size: meta.len(),
        mode: cfg.mode.unwrap_or_else(|| host_mode(meta)),
        mod_time: cfg.mod_time.unwrap_or(mod_time),
    })
}

fn host_mode(meta: &fs::Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o7777
    }
    #[cfg(not(unix))]
    {
        if meta.permissions().readonly() {
            0o444
        } else {
            petrifs::core::info::DEFAULT_MODE
        }
    }
}
