//! Depth-first traversal over any [`Vfs`].

use super::error::VfsResult;
use super::ops::Vfs;
use super::path;
use super::types::FileAttr;

/// Walk `start` and everything below it, parents before children.
///
/// Children are visited in name order, as returned by
/// [`VfsFile::read_dir`](super::VfsFile::read_dir). When stat'ing `start` or
/// listing a directory fails, the error is handed to `visit` instead of an
/// attribute: returning `Err` aborts the walk with that error, returning
/// `Ok` skips the unreadable subtree. The first `Err` from `visit` always
/// stops the traversal.
///
/// ```ignore
/// walk(&fs, "/", |path, attr| {
///     let attr = attr?;
///     println!("{path} {}", attr.size);
///     Ok(())
/// })?;
/// ```
pub fn walk<F>(fs: &dyn Vfs, start: &str, mut visit: F) -> VfsResult<()>
where
    F: FnMut(&str, VfsResult<&FileAttr>) -> VfsResult<()>,
{
    let start = path::normalize(start);
    match fs.stat(&start) {
        Ok(attr) => walk_entry(fs, &start, &attr, &mut visit),
        Err(e) => visit(&start, Err(e)),
    }
}

fn walk_entry<F>(fs: &dyn Vfs, path: &str, attr: &FileAttr, visit: &mut F) -> VfsResult<()>
where
    F: FnMut(&str, VfsResult<&FileAttr>) -> VfsResult<()>,
{
    visit(path, Ok(attr))?;
    if !attr.is_dir() {
        return Ok(());
    }

    let children = match fs.open(path).and_then(|dir| dir.read_dir(0)) {
        Ok(children) => children,
        Err(e) => return visit(path, Err(e)),
    };

    for child in &children {
        let child_path = path::join(path, &child.name);
        walk_entry(fs, &child_path, child, visit)?;
    }
    Ok(())
}
