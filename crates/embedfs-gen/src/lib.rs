//! # embedfs-gen
//!
//! Walks a scoped [`LocalFs`] and writes Rust source that rebuilds the same
//! tree as an [`embedfs::ManifestFs`], with every file gzip-compressed into
//! a static byte string.
//!
//! [`run`] is the whole pipeline: scope the disk, capture, render, write.
//! The output file is only touched once capture and render have both
//! succeeded.

pub mod capture;
pub mod config;
pub mod error;
pub mod render;

use std::io::Write;
use std::path::PathBuf;

use embedfs::{LocalFs, Vfs};
use tracing::info;

pub use capture::{CaptureOptions, CapturedEntry, Manifest, capture};
pub use config::{GenConfig, ResolvedConfig};
pub use error::{GenError, GenResult};
pub use render::{RenderOptions, render};

/// Capture `fs` and write the rendered module to `out`.
pub fn generate<W: Write>(
    fs: &dyn Vfs,
    out: &mut W,
    capture_opts: &CaptureOptions,
    render_opts: &RenderOptions,
) -> GenResult<Manifest> {
    let manifest = capture(fs, capture_opts)?;
    let source = render(&manifest, render_opts);
    out.write_all(source.as_bytes())?;
    Ok(manifest)
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output: PathBuf,
    pub module: String,
    pub entries: usize,
    pub bytes: usize,
}

/// Generate the module described by `config` and write it to disk.
///
/// Parent directories of the output are created. Nothing is written if
/// scoping, capture, or rendering fails.
pub fn run(config: &ResolvedConfig) -> GenResult<RunReport> {
    let fs = LocalFs::new(Some(config.prefix.as_path()), &config.paths, &config.ignore)?;

    let capture_opts = CaptureOptions {
        include_mtime: config.include_mtime,
    };
    let render_opts = RenderOptions {
        module: config.module.clone(),
    };

    let mut source = Vec::new();
    let manifest = generate(&fs, &mut source, &capture_opts, &render_opts)?;

    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&config.output, &source)?;

    info!(
        output = %config.output.display(),
        module = %config.module,
        entries = manifest.entries.len(),
        bytes = source.len(),
        "wrote embedded filesystem"
    );

    Ok(RunReport {
        output: config.output.clone(),
        module: config.module.clone(),
        entries: manifest.entries.len(),
        bytes: source.len(),
    })
}
