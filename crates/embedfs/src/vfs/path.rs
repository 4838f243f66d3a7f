//! Path helpers shared by both backends.
//!
//! Virtual paths are `/`-rooted strings. Host paths (`std::path`) only show
//! up on the disk side, where they are cleaned lexically so that `..` can
//! never climb past the configured prefix.

use std::io;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Normalize a virtual path: host separators become `/`, and a leading `/`
/// is enforced.
pub fn normalize(path: &str) -> String {
    let path = if MAIN_SEPARATOR != '/' {
        path.replace(MAIN_SEPARATOR, "/")
    } else {
        path.to_string()
    };
    if path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

/// Normalize, then fold `.`, `..` and repeated slashes against the virtual
/// root. `..` at the root stays at the root.
pub fn clean(path: &str) -> String {
    let normalized = normalize(path);
    let mut parts: Vec<&str> = Vec::new();
    for part in normalized.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Join a directory and a child name without producing `//name` under root.
pub fn join(dir: &str, name: &str) -> String {
    match dir {
        "" => name.to_string(),
        "/" => format!("/{name}"),
        _ => format!("{dir}/{name}"),
    }
}

/// Split on the last `/` into `(parent, name)`.
///
/// The root `/` has no parent and is its own name. Children of the root
/// report `/` as their parent.
pub fn split_parent_and_name(path: &str) -> (Option<&str>, &str) {
    if path == "/" {
        return (None, path);
    }
    match path.rfind('/') {
        Some(0) => (Some("/"), &path[1..]),
        Some(idx) => (Some(&path[..idx]), &path[idx + 1..]),
        None => (None, path),
    }
}

/// Lexically clean a host path: drop `.`, fold `..` into its parent.
///
/// Never touches the disk and never climbs above the root of an absolute
/// path. An empty relative result becomes `.`.
pub fn clean_host(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(s) => out.push(s),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Make a host path absolute against the current directory, then clean it.
pub fn absolute_host(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(clean_host(path))
    } else {
        Ok(clean_host(&std::env::current_dir()?.join(path)))
    }
}

/// Convert a normalized virtual path into relative host components.
pub fn to_host_relative(path: &str) -> PathBuf {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// True if `candidate` is `root`, lies under it, or is an ancestor of it.
///
/// Comparison is component-wise, so `/srv/database` is not under `/srv/data`.
pub fn is_within_or_ancestor(candidate: &Path, root: &Path) -> bool {
    candidate.starts_with(root) || root.starts_with(candidate)
}
