//! Core VFS types.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// File type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (only reported by the local backend, which never follows it).
    Symlink,
}

impl FileType {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }

    /// Returns true if this is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        matches!(self, FileType::Symlink)
    }
}

/// File attributes (metadata).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttr {
    /// Base name (`/` for the root).
    pub name: String,
    /// Size in bytes (uncompressed).
    pub size: u64,
    /// File type.
    pub kind: FileType,
    /// Unix mode bits, including the file type bits when the host reports them.
    pub mode: u32,
    /// Last modification time.
    pub mtime: SystemTime,
}

impl FileAttr {
    /// Attributes for a regular file.
    pub fn file(name: impl Into<String>, size: u64, mode: u32, mtime: SystemTime) -> Self {
        Self {
            name: name.into(),
            size,
            kind: FileType::File,
            mode,
            mtime,
        }
    }

    /// Attributes for a directory.
    pub fn directory(name: impl Into<String>, size: u64, mode: u32, mtime: SystemTime) -> Self {
        Self {
            name: name.into(),
            size,
            kind: FileType::Directory,
            mode,
            mtime,
        }
    }

    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Returns true if this is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.kind.is_symlink()
    }

    /// Permission bits only (`mode & 0o7777`).
    pub fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }
}
