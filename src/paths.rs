//! Path helpers backing the `basename` and `linkable_path` template filters.

use std::path::{Component, Path, PathBuf};

/// How paths are written into links of the rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMode {
    /// Absolute filesystem paths
    Absolute,
    /// Paths relative to the given report working directory
    RelativeTo(PathBuf),
}

impl PathMode {
    pub fn new(absolute_paths: bool, workdir: &Path) -> Self {
        if absolute_paths {
            PathMode::Absolute
        } else {
            PathMode::RelativeTo(workdir.to_path_buf())
        }
    }

    /// Convert a path into the form used for links
    pub fn linkable(&self, path: &Path) -> PathBuf {
        match self {
            PathMode::Absolute => absolute(path),
            PathMode::RelativeTo(workdir) => relative(path, workdir),
        }
    }
}

/// Final component of a path string, the part after the last separator
pub fn basename(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(path)
}

/// Absolute, lexically normalized form of `path`
///
/// Relative paths are resolved against the current directory. Symlinks are
/// not followed and the path does not need to exist.
pub fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        // An unreadable cwd leaves the path relative; normalization still applies
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(path)),
            Err(_) => normalize(path),
        }
    }
}

/// Express `path` relative to the directory `start`
///
/// Both sides are made absolute first. Paths without a common root (different
/// drives on Windows) are returned in absolute form.
pub fn relative(path: &Path, start: &Path) -> PathBuf {
    let path = absolute(path);
    let start = absolute(start);

    let mut path_components = path.components().peekable();
    let mut start_components = start.components().peekable();

    match (path_components.peek(), start_components.peek()) {
        (Some(Component::Prefix(a)), Some(Component::Prefix(b))) if a != b => return path.clone(),
        _ => {}
    }

    while let (Some(a), Some(b)) = (path_components.peek(), start_components.peek()) {
        if a != b {
            break;
        }
        path_components.next();
        start_components.next();
    }

    let mut result = PathBuf::new();
    for _ in start_components {
        result.push("..");
    }
    for component in path_components {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root
                if !matches!(
                    result.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    result.pop();
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}
