//! embedfs-gen binary.
//!
//! Usage:
//!   # Embed ./site/static as module `assets`
//!   embedfs-gen --prefix site --path site/static -o src/assets.rs --module assets
//!
//!   # Reproducible output, settings from a file
//!   embedfs-gen --config embedfs.toml --no-mtime
//!
//! Logs go to stderr; set RUST_LOG=debug to see every captured path.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use embedfs_gen::GenConfig;

/// Embed a directory tree as Rust source.
#[derive(Parser, Debug)]
#[command(name = "embedfs-gen")]
#[command(about = "Capture a directory tree into a Rust module backed by embedfs::ManifestFs")]
struct Args {
    /// Name of the generated module (default: the output file's directory name)
    #[arg(long)]
    module: Option<String>,

    /// File to write the generated source to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory that maps to the virtual root (default: current directory)
    #[arg(long)]
    prefix: Option<PathBuf>,

    /// Regex of host paths to leave out (repeatable)
    #[arg(long)]
    ignore: Vec<String>,

    /// Directory or file to include, at or below the prefix (repeatable)
    #[arg(long = "path")]
    paths: Vec<PathBuf>,

    /// Record the epoch instead of real modification times
    #[arg(long)]
    no_mtime: bool,

    /// TOML file supplying any of the above
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<GenConfig> {
        let base = match &self.config {
            Some(path) => GenConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GenConfig::default(),
        };
        Ok(base.merge_args(GenConfig {
            module: self.module,
            output: self.output,
            prefix: self.prefix,
            ignore: self.ignore,
            paths: self.paths,
            include_mtime: self.no_mtime.then_some(false),
        }))
    }
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.into_config()?.validate()?;
    embedfs_gen::run(&config)
        .with_context(|| format!("generating {}", config.output.display()))?;
    Ok(())
}
