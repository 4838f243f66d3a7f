//! VFS backends.
//!
//! Backends implement [`Vfs`](super::Vfs) for different storage types.

mod local;
mod manifest;

pub use local::LocalFs;
pub use manifest::ManifestFs;
