// SPDX-License-Identifier: MIT

mod codegen;
mod compress;
mod config;
mod host;
mod input;
mod utils;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use petrifs::core::accessor::AssetCatalog;
use petrifs::core::config::FsConfig;
use petrifs::core::trie::{AssetTrie, TreeOpts, pretty_bytes};

use crate::config::{DEFAULT_CONFIG, FileConfig, GenConfig, parse_octal};
use crate::host::HostAccessor;
use crate::utils::{LogLevel, set_log_level};

#[derive(Parser, Debug)]
#[command(
    name = "petrify",
    version,
    about = "Embed directories of static files into Rust source",
    long_about = None
)]
struct Cli {
    /// Files or directories to embed; `dir/...` recurses into subdirectories
    inputs: Vec<String>,

    /// Path prefix stripped from asset names
    #[arg(long)]
    prefix: Option<String>,

    /// Generated source file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Store raw bytes instead of gzip streams
    #[arg(long)]
    nocompress: bool,

    /// Drop size, mode and modification time
    #[arg(long)]
    nometadata: bool,

    /// File mode override for every asset (octal)
    #[arg(long, value_parser = parse_octal)]
    mode: Option<u32>,

    /// Modification time override for every asset (unix seconds)
    #[arg(long)]
    modtime: Option<i64>,

    /// Regex of host paths to skip (repeatable)
    #[arg(long)]
    ignore: Vec<String>,

    /// Config file (defaults to ./petrify.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print the asset tree, don't write anything
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> FileConfig {
        FileConfig {
            inputs: self.inputs.clone(),
            prefix: self.prefix.clone(),
            output: self.output.clone(),
            nocompress: self.nocompress,
            nometadata: self.nometadata,
            mode: self.mode,
            modtime: self.modtime,
            ignore: self.ignore.clone(),
        }
    }
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("petrify: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    set_log_level(LogLevel::from_flags(cli.quiet, cli.verbose));

    let file_cfg = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            log_verbose!("Using {DEFAULT_CONFIG}");
            FileConfig::from_file(Path::new(DEFAULT_CONFIG))?
        }
        None => FileConfig::default(),
    };
    let cfg = GenConfig::resolve(file_cfg.overlay(cli.overrides()))?;

    let accessor = HostAccessor::new(input::collect_assets(&cfg)?);
    anyhow::ensure!(!accessor.is_empty(), "no assets found in the given inputs");

    // Same rules the generated table is built with at runtime.
    let trie = AssetTrie::build(accessor.names(), &accessor, &FsConfig::new())
        .context("invalid asset set")?;
    if cli.dry_run {
        log_normal!("Dry run mode: nothing will be written.");
        println!("{trie}");
        log_normal!("{}", trie.counts());
        return Ok(());
    }
    log_verbose!("\n{}", trie.display(TreeOpts::default()));

    log_info!("Writing {} assets to {}", accessor.len(), cfg.output.display());
    if let Some(parent) = cfg.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let file = File::create(&cfg.output)
        .with_context(|| format!("cannot create {}", cfg.output.display()))?;

    let pb = utils::embed_progress(accessor.total_bytes(), "embedding")?;
    let (_, stats) = codegen::generate(BufWriter::new(file), &accessor, &cfg, &pb)?;
    pb.finish_and_clear();

    log_info!(
        "{} {} ({} -> {}) {} {}",
        "✔".green().bold(),
        trie.counts(),
        pretty_bytes(stats.raw_bytes),
        pretty_bytes(stats.stored_bytes),
        "→".dimmed(),
        cfg.output.display().to_string().bold()
    );
    Ok(())
}
