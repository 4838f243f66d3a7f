//! # embedfs
//!
//! A read-only virtual filesystem with two interchangeable backends:
//!
//! - [`LocalFs`] exposes part of the real disk, scoped to a set of allowed
//!   roots under an optional prefix, with regex ignore patterns.
//! - [`ManifestFs`] serves a flat, immutable table of entries whose file
//!   contents are gzip-compressed and decompressed lazily on `open`.
//!
//! The `embedfs-gen` tool walks a [`LocalFs`] and renders Rust source that
//! rebuilds the same tree as a [`ManifestFs`]. Consumers only ever see the
//! [`Vfs`] trait, [`walk`], and [`read_file`].

pub mod vfs;

pub use vfs::{
    ContentProducer, FileAttr, FileType, IgnorePatterns, Vfs, VfsError, VfsFile, VfsResult,
    backends::{LocalFs, ManifestFs},
    path, read_file, walk,
};
