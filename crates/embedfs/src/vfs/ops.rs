//! VFS capability traits.
//!
//! Both backends implement [`Vfs`]; opened paths are [`VfsFile`] handles.
//! Everything is read-only and synchronous.

use std::io::Read;

use super::types::FileAttr;
use super::{VfsError, VfsResult};

/// An opened file or directory.
///
/// Files stream their content through [`Read`]. Directories have no stream
/// and read as immediately at EOF. Each handle owns its own cursor, so two
/// handles to the same path never interfere.
pub trait VfsFile: Read + Send {
    /// Attributes of the opened path.
    fn stat(&self) -> VfsResult<FileAttr>;

    /// Directory children, sorted by name.
    ///
    /// Returns an empty list for non-directories. A `limit` of `0` returns
    /// every child; otherwise at most `limit` of them, in the same order.
    fn read_dir(&self, limit: usize) -> VfsResult<Vec<FileAttr>>;

    /// Names of directory children, sorted. Same `limit` rules as [`read_dir`](Self::read_dir).
    fn read_dir_names(&self, limit: usize) -> VfsResult<Vec<String>> {
        Ok(self
            .read_dir(limit)?
            .into_iter()
            .map(|attr| attr.name)
            .collect())
    }

    /// Release the underlying stream.
    ///
    /// Calling it again is a no-op. Dropping the handle releases it too.
    fn close(&mut self) -> VfsResult<()>;
}

/// Read-only filesystem operations.
///
/// Paths are virtual and `/`-rooted; relative paths are treated as if they
/// had a leading `/`.
pub trait Vfs: Send + Sync {
    /// Get attributes for a path.
    fn stat(&self, path: &str) -> VfsResult<FileAttr>;

    /// Open a path for reading or listing.
    fn open(&self, path: &str) -> VfsResult<Box<dyn VfsFile + '_>>;

    /// Check if a path exists.
    fn exists(&self, path: &str) -> bool {
        self.stat(path).is_ok()
    }
}

/// Read a whole file.
///
/// The handle is closed on every path out of this function, including a
/// failed read.
pub fn read_file(fs: &dyn Vfs, path: &str) -> VfsResult<Vec<u8>> {
    let mut file = fs.open(path)?;
    let mut data = Vec::new();
    let read = file.read_to_end(&mut data);
    let closed = file.close();
    read.map_err(VfsError::Io)?;
    closed?;
    Ok(data)
}
