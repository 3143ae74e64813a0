use std::path::{Path, PathBuf};
use std::time::SystemTime;

const INDEX_FILE: &str = "index.html";

/// A regular file under the document root that can be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub modified: SystemTime,
    pub size: u64,
}

impl ResolvedFile {
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }
}

/// Why a target could not be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFound {
    #[error("no such file")]
    Missing,
    #[error("directory without trailing slash or index")]
    Directory,
    #[error("path escapes the document root")]
    OutsideRoot,
}

/// Maps a request target onto a file below `doc_root`.
///
/// `.` and `..` segments are collapsed first; a target that climbs above
/// the root is rejected. A directory is served through its `index.html`
/// only when the target ends with `/`. The query string is ignored.
pub async fn resolve(doc_root: &Path, target: &str) -> Result<ResolvedFile, NotFound> {
    let target = target.split(['?', '#']).next().unwrap_or_default();
    let relative = normalize(target).ok_or(NotFound::OutsideRoot)?;

    let mut path = doc_root.join(relative);
    let mut meta = tokio::fs::metadata(&path)
        .await
        .map_err(|_| NotFound::Missing)?;

    if meta.is_dir() {
        if !target.ends_with('/') {
            return Err(NotFound::Directory);
        }
        path.push(INDEX_FILE);
        meta = tokio::fs::metadata(&path)
            .await
            .map_err(|_| NotFound::Missing)?;
    }

    if !meta.is_file() {
        return Err(NotFound::Missing);
    }

    if !path.starts_with(doc_root) {
        return Err(NotFound::OutsideRoot);
    }

    Ok(ResolvedFile {
        path,
        modified: meta
            .modified()
            .ok()
            .filter(|t| *t >= SystemTime::UNIX_EPOCH)
            .unwrap_or(SystemTime::UNIX_EPOCH),
        size: meta.len(),
    })
}

/// Collapses `.` and `..` segments of an absolute target into a relative
/// path. Returns `None` if a `..` would climb above the root.
fn normalize(target: &str) -> Option<PathBuf> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s => segments.push(s),
        }
    }
    Some(segments.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize("/a/./b/../c"), Some(PathBuf::from("a/c")));
        assert_eq!(normalize("/"), Some(PathBuf::new()));
        assert_eq!(normalize("//a//"), Some(PathBuf::from("a")));
    }

    #[test]
    fn normalize_rejects_escape() {
        assert_eq!(normalize("/.."), None);
        assert_eq!(normalize("/a/../../etc/passwd"), None);
    }
}
