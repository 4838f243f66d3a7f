//! Manifest (embedded) filesystem backend.
//!
//! A flat table of path → entry, usually populated once by generated code
//! and then only read. There is no tree: a directory's children are the
//! entries whose stored parent equals the directory's path, found by a scan
//! on every listing.

use std::collections::HashMap;
use std::io::{self, Read};
use std::time::SystemTime;

use crate::vfs::content::ContentProducer;
use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::ops::{Vfs, VfsFile};
use crate::vfs::path;
use crate::vfs::types::FileAttr;

/// Entry in the manifest.
#[derive(Debug, Clone)]
struct ManifestEntry {
    /// Parent directory path, derived at insertion. `None` for the root.
    parent: Option<String>,
    attr: FileAttr,
    /// Only files carry content.
    content: Option<ContentProducer>,
}

/// In-memory, immutable-after-population filesystem.
///
/// Listings only show entries whose parent directory was itself added:
/// adding `/x/y` without `/x` leaves `/x/y` reachable through `stat` and
/// `open`, but nothing lists it. Generated manifests always add every
/// ancestor directory first.
#[derive(Debug, Default)]
pub struct ManifestFs {
    entries: HashMap<String, ManifestEntry>,
}

impl ManifestFs {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) an entry.
    ///
    /// `content` is ignored for directories. A file added without content
    /// fails with [`VfsError::Content`] when opened.
    pub fn add(
        &mut self,
        path: &str,
        size: u64,
        mode: u32,
        mtime: SystemTime,
        is_dir: bool,
        content: Option<ContentProducer>,
    ) {
        let path = path::normalize(path);
        let (parent, name) = path::split_parent_and_name(&path);
        let attr = if is_dir {
            FileAttr::directory(name, size, mode, mtime)
        } else {
            FileAttr::file(name, size, mode, mtime)
        };
        let entry = ManifestEntry {
            parent: parent.map(str::to_string),
            attr,
            content: if is_dir { None } else { content },
        };
        self.entries.insert(path, entry);
    }

    /// Children of `dir` sorted by name, truncated to `limit` when non-zero.
    ///
    /// Empty unless `dir` is itself a registered directory.
    pub fn list_dir(&self, dir: &str, limit: usize) -> Vec<FileAttr> {
        let dir = path::normalize(dir);
        if !self.entries.get(&dir).is_some_and(|e| e.attr.is_dir()) {
            return Vec::new();
        }
        let mut items: Vec<FileAttr> = self
            .entries
            .values()
            .filter(|e| e.parent.as_deref() == Some(dir.as_str()))
            .map(|e| e.attr.clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        if limit > 0 {
            items.truncate(limit);
        }
        items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, path: &str) -> VfsResult<&ManifestEntry> {
        self.entries
            .get(path)
            .ok_or_else(|| VfsError::not_found(path))
    }
}

impl Vfs for ManifestFs {
    fn stat(&self, path: &str) -> VfsResult<FileAttr> {
        let path = path::normalize(path);
        self.entry(&path).map(|e| e.attr.clone())
    }

    fn open(&self, path: &str) -> VfsResult<Box<dyn VfsFile + '_>> {
        let path = path::normalize(path);
        let entry = self.entry(&path)?;

        let stream = if entry.attr.is_dir() {
            None
        } else {
            let producer = entry.content.as_ref().ok_or_else(|| {
                VfsError::content(
                    &path,
                    io::Error::new(io::ErrorKind::NotFound, "no content producer"),
                )
            })?;
            let stream = producer
                .produce()
                .map_err(|e| VfsError::content(&path, e))?;
            Some(stream)
        };

        Ok(Box::new(ManifestFile {
            fs: self,
            attr: entry.attr.clone(),
            path,
            stream,
        }))
    }
}

/// Handle to a manifest entry.
struct ManifestFile<'a> {
    fs: &'a ManifestFs,
    path: String,
    attr: FileAttr,
    stream: Option<Box<dyn Read + Send>>,
}

impl Read for ManifestFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.stream.as_mut() {
            Some(stream) => stream.read(buf),
            None => Ok(0),
        }
    }
}

impl VfsFile for ManifestFile<'_> {
    fn stat(&self) -> VfsResult<FileAttr> {
        Ok(self.attr.clone())
    }

    fn read_dir(&self, limit: usize) -> VfsResult<Vec<FileAttr>> {
        if !self.attr.is_dir() {
            return Ok(Vec::new());
        }
        Ok(self.fs.list_dir(&self.path, limit))
    }

    fn close(&mut self) -> VfsResult<()> {
        self.stream = None;
        Ok(())
    }
}
