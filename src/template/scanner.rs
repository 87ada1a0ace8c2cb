//! Discovers layout and content sources under an application root.
//!
//! The scanner only walks and classifies; it never decides whether two
//! sources conflict. That happens in [`super::collision`].

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, warn};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ext::PathExt;

/// A template file discovered on disk, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Identifier as spelled on disk, e.g. `admin/UserList`
    pub name: String,
    /// Literal file extension, e.g. `html`
    pub format: String,
    /// Where the file lives
    pub path: PathBuf,
}

/// Options shared by every scan of one build.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    ignore: GlobSet,
}

impl ScanOptions {
    /// Builds options from glob patterns matched against root-relative paths.
    pub fn new<S: AsRef<str>>(ignore_patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in ignore_patterns {
            debug!("Adding ignore pattern: {} to globset", pattern.as_ref());
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(Self { ignore: builder.build()? })
    }

    fn is_ignored(&self, relative: &Path) -> bool {
        self.ignore.is_match(relative)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self { ignore: GlobSet::empty() }
    }
}

/// Collects every layout source under `layout_dir`.
///
/// A root without a layout directory simply contributes no layouts.
pub fn collect_layouts(layout_dir: &Path, options: &ScanOptions) -> Result<Vec<SourceFile>> {
    if !layout_dir.is_dir() {
        warn!("No layout directory at '{}', skipping layouts", layout_dir.display());
        return Ok(Vec::new());
    }
    scan(layout_dir, None, options)
}

/// Collects every content source under `root`, skipping the `exclude_dir` subtree.
pub fn collect_content(
    root: &Path,
    exclude_dir: &Path,
    options: &ScanOptions,
) -> Result<Vec<SourceFile>> {
    scan(root, Some(exclude_dir), options)
}

fn scan(root: &Path, exclude_dir: Option<&Path>, options: &ScanOptions) -> Result<Vec<SourceFile>> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let path = entry.path();
            if path.is_hidden() || exclude_dir.is_some_and(|dir| path == dir) {
                return false;
            }
            path.strip_prefix(root).map(|rel| !options.is_ignored(rel)).unwrap_or(true)
        });

    let mut sources = Vec::new();
    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let (name, format) = relative.split_ext();
        debug!("Discovered '{}' as {name}.{format}", entry.path().display());
        sources.push(SourceFile { name, format, path: entry.path().to_path_buf() });
    }
    Ok(sources)
}

fn walk_error(err: walkdir::Error) -> Error {
    let unreadable = match (err.path(), err.io_error()) {
        (Some(path), Some(io_err)) => {
            Some((path.to_path_buf(), io::Error::new(io_err.kind(), io_err.to_string())))
        }
        _ => None,
    };
    match unreadable {
        Some((path, source)) => Error::UnreadableFile { path, source },
        None => Error::Walk(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn keys(sources: &[SourceFile]) -> Vec<(String, String)> {
        sources.iter().map(|s| (s.name.clone(), s.format.clone())).collect()
    }

    #[test]
    fn test_content_skips_layouts_and_hidden() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "index.html");
        touch(root, "root/show.txt");
        touch(root, "layouts/app.html");
        touch(root, ".hidden.html");
        touch(root, ".git/config.html");

        let found =
            collect_content(root, &root.join("layouts"), &ScanOptions::default()).unwrap();
        assert_eq!(
            keys(&found),
            vec![
                ("index".to_string(), "html".to_string()),
                ("root/show".to_string(), "txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_layouts_relative_to_layout_dir() {
        let tmp = TempDir::new().unwrap();
        let layouts = tmp.path().join("layouts");
        touch(&layouts, "app.html");
        touch(&layouts, "admin/app.html");

        let found = collect_layouts(&layouts, &ScanOptions::default()).unwrap();
        assert_eq!(
            keys(&found),
            vec![
                ("admin/app".to_string(), "html".to_string()),
                ("app".to_string(), "html".to_string()),
            ]
        );
        assert_eq!(found[1].path, layouts.join("app.html"));
    }

    #[test]
    fn test_missing_layout_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let found =
            collect_layouts(&tmp.path().join("layouts"), &ScanOptions::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_root_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("nope");
        let err =
            collect_content(&root, &root.join("layouts"), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnreadableFile { .. }), "got {err:?}");
    }

    #[test]
    fn test_ignore_patterns() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "index.html");
        touch(root, "index.html.bak");
        touch(root, "drafts/post.html");

        let options = ScanOptions::new(&["*.bak", "drafts"]).unwrap();
        let found = collect_content(root, &root.join("layouts"), &options).unwrap();
        assert_eq!(keys(&found), vec![("index".to_string(), "html".to_string())]);
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        assert!(matches!(ScanOptions::new(&["a[b"]), Err(Error::GlobSetParse(_))));
    }
}
