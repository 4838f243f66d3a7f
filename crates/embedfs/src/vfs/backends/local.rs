//! Local filesystem backend.
//!
//! Exposes part of the real disk. Virtual paths are joined onto an optional
//! prefix and must land on (or lead to) one of the configured roots, and
//! must not match an ignore pattern. Anything else is reported as missing.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::vfs::error::{VfsError, VfsResult};
use crate::vfs::ignore::IgnorePatterns;
use crate::vfs::ops::{Vfs, VfsFile};
use crate::vfs::path;
use crate::vfs::types::{FileAttr, FileType};

/// Local filesystem backend.
///
/// With prefix `/srv` and root `/srv/data`, the virtual path `/data/x`
/// reads `/srv/data/x`, while `/secret` (→ `/srv/secret`) does not exist as
/// far as callers can tell.
///
/// Paths are cleaned lexically and `..` never climbs above the prefix.
/// Symlinks are not resolved by the backend: `stat` reports the link
/// itself and `open` lets the host follow it.
#[derive(Debug, Clone)]
pub struct LocalFs {
    prefix: Option<PathBuf>,
    roots: Vec<PathBuf>,
    ignores: IgnorePatterns,
}

impl LocalFs {
    /// Create a scoped view of the local disk.
    ///
    /// `prefix` and every root are made absolute (against the current
    /// directory) and cleaned. When a prefix is given, each root must be the
    /// prefix itself or lie under it. Ignore patterns are regular
    /// expressions matched against resolved host paths.
    pub fn new<R, I>(prefix: Option<&Path>, roots: R, ignores: I) -> VfsResult<Self>
    where
        R: IntoIterator,
        R::Item: AsRef<Path>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let prefix = prefix
            .map(|p| {
                path::absolute_host(p).map_err(|e| {
                    VfsError::config(format!(
                        "cannot make prefix {} absolute: {e}",
                        p.display()
                    ))
                })
            })
            .transpose()?;

        let mut abs_roots = Vec::new();
        for root in roots {
            let root = root.as_ref();
            let abs = path::absolute_host(root).map_err(|e| {
                VfsError::config(format!("cannot make {} absolute: {e}", root.display()))
            })?;
            if let Some(prefix) = &prefix {
                if !abs.starts_with(prefix) {
                    return Err(VfsError::config(format!(
                        "path {} is not under prefix {}",
                        abs.display(),
                        prefix.display()
                    )));
                }
            }
            abs_roots.push(abs);
        }

        let ignores = IgnorePatterns::new(ignores)?;

        debug!(
            prefix = ?prefix,
            roots = ?abs_roots,
            ignores = ignores.len(),
            "local fs configured"
        );

        Ok(Self {
            prefix,
            roots: abs_roots,
            ignores,
        })
    }

    /// Map a virtual path to the host path it reads.
    ///
    /// Succeeds only when the host path equals a root, lies under one, or is
    /// an ancestor of one, and no ignore pattern matches it. The ancestor
    /// case is intentional: it lets callers list the intermediate
    /// directories that lead down to a root (e.g. `/` when the only root is
    /// `/srv/data`). Those listings still hide every sibling that is not on
    /// the way to a root.
    pub fn resolve(&self, virtual_path: &str) -> VfsResult<PathBuf> {
        let virtual_path = path::clean(virtual_path);
        let base = self
            .prefix
            .as_deref()
            .unwrap_or_else(|| Path::new(MAIN_SEPARATOR_STR));
        let real = path::clean_host(&base.join(path::to_host_relative(&virtual_path)));

        if !self
            .roots
            .iter()
            .any(|root| path::is_within_or_ancestor(&real, root))
        {
            debug!(path = %virtual_path, real = %real.display(), "outside configured roots");
            return Err(VfsError::not_found(virtual_path));
        }
        if self.ignores.matches(&real.to_string_lossy()) {
            debug!(path = %virtual_path, real = %real.display(), "matched ignore pattern");
            return Err(VfsError::not_found(virtual_path));
        }
        Ok(real)
    }

    /// Convert std::fs::Metadata to FileAttr.
    fn metadata_to_attr(name: &str, meta: &fs::Metadata) -> FileAttr {
        let size = meta.len();
        let mode = Self::mode_bits(meta);
        let mtime = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        let file_type = meta.file_type();
        if file_type.is_dir() {
            FileAttr::directory(name, size, mode, mtime)
        } else if file_type.is_symlink() {
            FileAttr {
                kind: FileType::Symlink,
                ..FileAttr::file(name, size, mode, mtime)
            }
        } else {
            FileAttr::file(name, size, mode, mtime)
        }
    }

    #[cfg(unix)]
    fn mode_bits(meta: &fs::Metadata) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode()
    }

    #[cfg(not(unix))]
    fn mode_bits(meta: &fs::Metadata) -> u32 {
        let perm = if meta.permissions().readonly() { 0o444 } else { 0o644 };
        if meta.is_dir() { 0o40000 | perm | 0o111 } else { 0o100000 | perm }
    }
}

impl Vfs for LocalFs {
    fn stat(&self, path: &str) -> VfsResult<FileAttr> {
        let path = path::clean(path);
        let real = self.resolve(&path)?;
        let meta = fs::symlink_metadata(&real).map_err(|e| VfsError::from_host(&path, e))?;
        let (_, name) = path::split_parent_and_name(&path);
        Ok(Self::metadata_to_attr(name, &meta))
    }

    fn open(&self, path: &str) -> VfsResult<Box<dyn VfsFile + '_>> {
        let path = path::clean(path);
        let real = self.resolve(&path)?;
        // A handle sees through a symlink to its target; `stat` does not
        let meta = fs::metadata(&real).map_err(|e| VfsError::from_host(&path, e))?;
        let (_, name) = path::split_parent_and_name(&path);
        let attr = Self::metadata_to_attr(name, &meta);

        let file = if attr.is_dir() {
            None
        } else {
            Some(File::open(&real).map_err(|e| VfsError::from_host(&path, e))?)
        };

        Ok(Box::new(LocalFile {
            fs: self,
            path,
            real,
            attr,
            file,
        }))
    }
}

/// Handle to a local file or directory.
struct LocalFile<'a> {
    fs: &'a LocalFs,
    /// Cleaned virtual path.
    path: String,
    real: PathBuf,
    attr: FileAttr,
    /// Host handle; `None` for directories and after close.
    file: Option<File>,
}

impl LocalFile<'_> {
    /// Host directory entries whose virtual paths resolve, sorted by name.
    fn visible_children(&self) -> VfsResult<Vec<(String, fs::DirEntry)>> {
        let dir = fs::read_dir(&self.real).map_err(|e| VfsError::from_host(&self.path, e))?;

        let mut children = Vec::new();
        for entry in dir {
            let entry = entry.map_err(VfsError::Io)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let child = path::join(&self.path, &name);
            if self.fs.resolve(&child).is_err() {
                continue;
            }
            children.push((name, entry));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(children)
    }
}

impl Read for LocalFile<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Ok(0),
        }
    }
}

impl VfsFile for LocalFile<'_> {
    fn stat(&self) -> VfsResult<FileAttr> {
        Ok(self.attr.clone())
    }

    fn read_dir(&self, limit: usize) -> VfsResult<Vec<FileAttr>> {
        if !self.attr.is_dir() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for (name, entry) in self.visible_children()? {
            if limit > 0 && items.len() >= limit {
                break;
            }
            let meta = match entry.metadata() {
                Ok(meta) => meta,
                // Removed between listing and stat
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(dir = %self.path, name = %name, "child vanished during listing");
                    continue;
                }
                Err(e) => return Err(VfsError::Io(e)),
            };
            items.push(LocalFs::metadata_to_attr(&name, &meta));
        }
        Ok(items)
    }

    fn read_dir_names(&self, limit: usize) -> VfsResult<Vec<String>> {
        if !self.attr.is_dir() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = self
            .visible_children()?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        if limit > 0 {
            names.truncate(limit);
        }
        Ok(names)
    }

    fn close(&mut self) -> VfsResult<()> {
        self.file = None;
        Ok(())
    }
}
