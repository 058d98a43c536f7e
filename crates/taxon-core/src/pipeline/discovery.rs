//! File discovery for finding images in directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::EncodeConfig;
use crate::error::{PipelineError, PipelineResult};

/// Discovers image files under a root directory.
///
/// Each call to [`walk`](Self::walk) starts a fresh traversal, so the same
/// discovery can be iterated any number of times.
pub struct FileDiscovery {
    root: PathBuf,
    suffixes: Vec<String>,
}

impl FileDiscovery {
    /// Create a discovery rooted at `root`.
    ///
    /// A relative root is resolved against the current working directory so
    /// every yielded path is absolute.
    pub fn new(root: impl Into<PathBuf>, config: &EncodeConfig) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            suffixes: config
                .supported_formats
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect(),
        }
    }

    /// The absolute root this discovery walks.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily walk the tree, yielding supported image paths in traversal order.
    ///
    /// Traversal failures (missing root, unreadable directory) are yielded as
    /// [`PipelineError::Discovery`]; callers treat them as fatal.
    pub fn walk(&self) -> impl Iterator<Item = PipelineResult<PathBuf>> + '_ {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    (path.is_file() && self.is_supported(path)).then(|| Ok(entry.into_path()))
                }
                Err(e) => Some(Err(PipelineError::Discovery {
                    path: e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone()),
                    message: e.to_string(),
                })),
            })
    }

    /// Collect the whole walk, failing on the first traversal error.
    pub fn discover(&self) -> PipelineResult<Vec<PathBuf>> {
        self.walk().collect()
    }

    /// Check if a file name ends with a supported extension (case-sensitive).
    fn is_supported(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| {
                let name = name.as_encoded_bytes();
                self.suffixes
                    .iter()
                    .any(|suffix| name.ends_with(suffix.as_bytes()))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn discovery(root: &Path) -> FileDiscovery {
        FileDiscovery::new(root, &EncodeConfig::default())
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = discovery(Path::new("/tmp"));

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.JPG")));
        assert!(!discovery.is_supported(Path::new("test.Png")));
        assert!(!discovery.is_supported(Path::new("test.gif")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("test.png.json")));
    }

    #[test]
    fn test_walk_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.jpg"));
        touch(&root.join("b.jpeg"));
        touch(&root.join("nested/deeper/c.png"));
        touch(&root.join("nested/d.gif"));
        touch(&root.join("notes.txt"));
        touch(&root.join("upper.JPG"));
        touch(&root.join("a.jpg.json"));
        std::fs::create_dir_all(root.join("folder.png")).unwrap();

        let found: BTreeSet<PathBuf> = discovery(root).discover().unwrap().into_iter().collect();
        let expected: BTreeSet<PathBuf> = [
            root.join("a.jpg"),
            root.join("b.jpeg"),
            root.join("nested/deeper/c.png"),
        ]
        .into_iter()
        .collect();

        assert_eq!(found, expected);
        assert!(found.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_walk_is_restartable() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("one.png"));
        touch(&dir.path().join("sub/two.jpg"));

        let discovery = discovery(dir.path());
        let first: BTreeSet<PathBuf> = discovery.walk().map(Result::unwrap).collect();
        let second: BTreeSet<PathBuf> = discovery.walk().map(Result::unwrap).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_walk_is_lazy() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            touch(&dir.path().join(format!("{i}.png")));
        }

        let discovery = discovery(dir.path());
        let first = discovery.walk().next();
        assert!(matches!(first, Some(Ok(_))));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = discovery(&missing).discover().unwrap_err();
        assert!(matches!(err, PipelineError::Discovery { .. }));
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let discovery = discovery(Path::new("source"));
        assert!(discovery.root().is_absolute());
        assert!(discovery.root().ends_with("source"));
    }
}
