//! Virtual Filesystem abstraction.
//!
//! Key components:
//!
//! - [`Vfs`] / [`VfsFile`] - The read-only capability set both backends implement
//! - [`LocalFs`] - Real disk, restricted to configured roots (with ignore patterns)
//! - [`ManifestFs`] - Flat in-memory table with lazily decompressed content
//! - [`walk`] - Backend-agnostic depth-first traversal
//!
//! ## Design Decisions
//!
//! - **Slash paths everywhere**: every lookup key is a normalized,
//!   `/`-rooted string. Host separators only appear inside [`LocalFs`].
//! - **No tree in memory**: [`ManifestFs`] derives directory listings by
//!   scanning its flat table for entries with a matching parent.
//! - **Uniform NotFound**: out-of-scope and ignored paths on disk are
//!   reported exactly like missing ones.
//!
//! [`LocalFs`]: backends::LocalFs
//! [`ManifestFs`]: backends::ManifestFs

pub mod backends;
mod content;
mod error;
mod ignore;
mod ops;
pub mod path;
mod types;
mod walk;

pub use content::ContentProducer;
pub use error::{VfsError, VfsResult};
pub use ignore::IgnorePatterns;
pub use ops::{Vfs, VfsFile, read_file};
pub use types::{FileAttr, FileType};
pub use walk::walk;
