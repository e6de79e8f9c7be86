// SPDX-License-Identifier: MIT

use anyhow::{Context, bail};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

use crate::input::InputConfig;

pub const DEFAULT_OUTPUT: &str = "assets.rs";
pub const DEFAULT_CONFIG: &str = "petrify.toml";

/// Generator settings as written in `petrify.toml`, or as given on the command line.
///
/// ```toml
/// inputs = ["static/...", "templates"]
/// prefix = "static"
/// output = "src/assets.rs"
/// nocompress = false
/// nometadata = false
/// mode = 0o644
/// modtime = 1700000000
/// ignore = ['\.DS_Store$', '~$']
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub inputs: Vec<String>,
    pub prefix: Option<String>,
    pub output: Option<PathBuf>,
    pub nocompress: bool,
    pub nometadata: bool,
    pub mode: Option<u32>,
    pub modtime: Option<i64>,
    pub ignore: Vec<String>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `over` on top of `self`.
    ///
    /// Set values in `over` win. Inputs replace the file's list when any are
    /// given; ignore patterns accumulate.
    pub fn overlay(mut self, over: FileConfig) -> Self {
        if !over.inputs.is_empty() {
            self.inputs = over.inputs;
        }
        self.prefix = over.prefix.or(self.prefix);
        self.output = over.output.or(self.output);
        self.nocompress |= over.nocompress;
        self.nometadata |= over.nometadata;
        self.mode = over.mode.or(self.mode);
        self.modtime = over.modtime.or(self.modtime);
        self.ignore.extend(over.ignore);
        self
    }
}

/// Resolved generator configuration.
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub inputs: Vec<InputConfig>,
    pub prefix: String,
    pub output: PathBuf,
    pub compress: bool,
    pub metadata: bool,
    pub mode: Option<u32>,
    pub mod_time: Option<i64>,
    pub ignore: Vec<Regex>,
}

impl GenConfig {
    pub fn resolve(cfg: FileConfig) -> anyhow::Result<Self> {
        if cfg.inputs.is_empty() {
            bail!("missing <INPUT>: nothing to embed");
        }
        if let Some(mode) = cfg.mode.filter(|m| *m > 0o7777) {
            bail!("mode {mode:o} is not a permission mask");
        }
        if let Some(secs) = cfg.modtime {
            OffsetDateTime::from_unix_timestamp(secs)
                .with_context(|| format!("modtime {secs} is out of range"))?;
        }

        let ignore = cfg
            .ignore
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid --ignore pattern '{p}'")))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            inputs: cfg.inputs.iter().map(|s| InputConfig::parse(s)).collect(),
            prefix: cfg.prefix.unwrap_or_default(),
            output: cfg.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            compress: !cfg.nocompress,
            metadata: !cfg.nometadata,
            mode: cfg.mode,
            mod_time: cfg.modtime,
            ignore,
        })
    }

    /// True if `path` matches any ignore pattern.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(path))
    }
}

/// Parses an octal permission mask (`644`, `0644`, `0o644`).
pub fn parse_octal(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8).map_err(|e| format!("'{s}' is not an octal mode: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let cfg = FileConfig::from_toml(
            r#"
            inputs = ["static/..."]
            prefix = "static"
            mode = 0o600
            ignore = ['\.map$']
            "#,
        )
        .unwrap();
        assert_eq!(cfg.inputs, ["static/..."]);
        assert_eq!(cfg.prefix.as_deref(), Some("static"));
        assert_eq!(cfg.mode, Some(0o600));
        assert!(!cfg.nocompress);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::from_toml("pkg = \"main\"").is_err());
    }

    #[test]
    fn test_overlay_cli_wins() {
        let file = FileConfig {
            inputs: vec!["a".into()],
            prefix: Some("a".into()),
            ignore: vec!["x".into()],
            ..Default::default()
        };
        let cli = FileConfig {
            prefix: Some("b".into()),
            nocompress: true,
            ignore: vec!["y".into()],
            ..Default::default()
        };
        let merged = file.overlay(cli);
        assert_eq!(merged.inputs, ["a"]);
        assert_eq!(merged.prefix.as_deref(), Some("b"));
        assert!(merged.nocompress);
        assert_eq!(merged.ignore, ["x", "y"]);
    }

    #[test]
    fn test_resolve_defaults() {
        let cfg = GenConfig::resolve(FileConfig {
            inputs: vec!["web/...".into()],
            ignore: vec![r"\.tmp$".into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(cfg.compress && cfg.metadata);
        assert!(cfg.inputs[0].recursive);
        assert!(cfg.is_ignored("web/a.tmp"));
        assert!(!cfg.is_ignored("web/a.txt"));
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        assert!(GenConfig::resolve(FileConfig::default()).is_err());

        let bad_re = FileConfig {
            inputs: vec!["x".into()],
            ignore: vec!["(".into()],
            ..Default::default()
        };
        assert!(GenConfig::resolve(bad_re).is_err());

        let bad_mode = FileConfig {
            inputs: vec!["x".into()],
            mode: Some(0o17777),
            ..Default::default()
        };
        assert!(GenConfig::resolve(bad_mode).is_err());

        let bad_time = FileConfig {
            inputs: vec!["x".into()],
            modtime: Some(i64::MAX),
            ..Default::default()
        };
        assert!(GenConfig::resolve(bad_time).is_err());
    }

    #[test]
    fn test_parse_octal() {
        assert_eq!(parse_octal("644"), Ok(0o644));
        assert_eq!(parse_octal("0755"), Ok(0o755));
        assert_eq!(parse_octal("0o600"), Ok(0o600));
        assert!(parse_octal("9").is_err());
    }
}
