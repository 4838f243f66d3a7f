//! Capture a [`Vfs`] tree into an in-memory manifest.

use std::io;
use std::time::UNIX_EPOCH;

use embedfs::{FileAttr, Vfs, VfsError, VfsResult, walk};
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::{debug, info};

/// One captured path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEntry {
    /// Normalized virtual path.
    pub path: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    pub mode: u32,
    /// Modification time in whole seconds since the Unix epoch.
    pub mtime_secs: u64,
    pub is_dir: bool,
    /// Gzip-compressed content; `None` for directories.
    pub content: Option<Vec<u8>>,
}

/// Entries in walk order: parents before children, siblings by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<CapturedEntry>,
}

impl Manifest {
    pub fn files(&self) -> impl Iterator<Item = &CapturedEntry> {
        self.entries.iter().filter(|e| !e.is_dir)
    }
}

/// Capture settings.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Record modification times. When off, every entry gets the epoch, so
    /// captures of an unchanged tree are identical.
    pub include_mtime: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            include_mtime: true,
        }
    }
}

/// Walk `fs` from `/`, compressing every file.
///
/// Fails on the first unreadable path; no partial manifest is returned.
pub fn capture(fs: &dyn Vfs, opts: &CaptureOptions) -> VfsResult<Manifest> {
    let mut manifest = Manifest::default();

    walk(fs, "/", |path, attr| {
        let attr = attr?;
        let entry = if attr.is_dir() {
            CapturedEntry {
                path: path.to_string(),
                size: attr.size,
                mode: attr.mode,
                mtime_secs: mtime_secs(attr, opts),
                is_dir: true,
                content: None,
            }
        } else {
            let (size, mode, compressed) = compress(fs, path)?;
            debug!(path, size, compressed = compressed.len(), "captured file");
            CapturedEntry {
                path: path.to_string(),
                size,
                mode,
                mtime_secs: mtime_secs(attr, opts),
                is_dir: false,
                content: Some(compressed),
            }
        };
        manifest.entries.push(entry);
        Ok(())
    })?;

    info!(
        entries = manifest.entries.len(),
        files = manifest.files().count(),
        "capture complete"
    );
    Ok(manifest)
}

/// Read a whole file through the VFS into a gzip buffer.
///
/// Returns the uncompressed length and the mode of what was read alongside
/// the compressed bytes. For a symlink both describe its target. A symlink
/// to a directory is an error: it has no content to embed and its subtree
/// is not walked.
fn compress(fs: &dyn Vfs, path: &str) -> VfsResult<(u64, u32, Vec<u8>)> {
    let mut file = fs.open(path)?;
    let target = file.stat()?;
    if target.is_dir() {
        return Err(VfsError::Io(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{path} links to a directory and cannot be embedded"),
        )));
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    let copied = io::copy(&mut file, &mut encoder);
    let closed = file.close();
    let size = copied?;
    closed?;
    Ok((size, target.mode, encoder.finish()?))
}

fn mtime_secs(attr: &FileAttr, opts: &CaptureOptions) -> u64 {
    if !opts.include_mtime {
        return 0;
    }
    attr.mtime
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedfs::LocalFs;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    fn setup() -> (TempDir, LocalFs) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site");
        std::fs::create_dir_all(root.join("assets")).unwrap();
        std::fs::write(root.join("assets/index.html"), "<h1>hi</h1>\n").unwrap();
        std::fs::write(root.join("assets/app.js"), "console.log(1);\n").unwrap();
        std::fs::write(root.join("assets/app.js.tmp"), "junk").unwrap();
        std::fs::write(root.join("README"), "embedded\n").unwrap();
        let fs = LocalFs::new(Some(root.as_path()), [&root], [r"\.tmp$"]).unwrap();
        (dir, fs)
    }

    #[test]
    fn test_walk_order_and_content() {
        let (_dir, fs) = setup();
        let manifest = capture(&fs, &CaptureOptions::default()).unwrap();

        let paths: Vec<_> = manifest.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/", "/README", "/assets", "/assets/app.js", "/assets/index.html"]
        );

        let index = &manifest.entries[4];
        assert!(!index.is_dir);
        assert_eq!(index.size, 12);
        assert_eq!(gunzip(index.content.as_ref().unwrap()), b"<h1>hi</h1>\n");

        let assets = &manifest.entries[2];
        assert!(assets.is_dir);
        assert!(assets.content.is_none());
        assert_eq!(manifest.files().count(), 3);
    }

    #[test]
    fn test_without_mtime() {
        let (_dir, fs) = setup();
        let manifest = capture(
            &fs,
            &CaptureOptions {
                include_mtime: false,
            },
        )
        .unwrap();
        assert!(manifest.entries.iter().all(|e| e.mtime_secs == 0));

        let again = capture(
            &fs,
            &CaptureOptions {
                include_mtime: false,
            },
        )
        .unwrap();
        assert_eq!(manifest, again);
    }

    #[test]
    fn test_with_mtime() {
        let (_dir, fs) = setup();
        let manifest = capture(&fs, &CaptureOptions::default()).unwrap();
        assert!(manifest.entries.iter().all(|e| e.mtime_secs > 0));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_records_target() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, fs) = setup();
        let assets = dir.path().join("site/assets");
        std::fs::set_permissions(assets.join("app.js"), std::fs::Permissions::from_mode(0o600))
            .unwrap();
        std::os::unix::fs::symlink(assets.join("app.js"), assets.join("alias.js")).unwrap();

        let manifest = capture(&fs, &CaptureOptions::default()).unwrap();
        let alias = manifest
            .entries
            .iter()
            .find(|e| e.path == "/assets/alias.js")
            .unwrap();
        assert!(!alias.is_dir);
        assert_eq!(alias.size, 16);
        assert_eq!(alias.mode, 0o100600);
        assert_eq!(gunzip(alias.content.as_ref().unwrap()), b"console.log(1);\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_aborts() {
        let (dir, fs) = setup();
        let root = dir.path().join("site");
        std::os::unix::fs::symlink(root.join("assets"), root.join("linkdir")).unwrap();

        match capture(&fs, &CaptureOptions::default()) {
            Err(VfsError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::IsADirectory),
            other => panic!("expected a directory error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_aborts() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, fs) = setup();
        let secret = dir.path().join("site/assets/index.html");
        std::fs::set_permissions(&secret, std::fs::Permissions::from_mode(0o000)).unwrap();
        // Root can read anything; nothing to test then
        if std::fs::File::open(&secret).is_ok() {
            return;
        }

        let result = capture(&fs, &CaptureOptions::default());
        assert!(result.is_err());
    }
}
