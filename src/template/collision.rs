//! Rejects sources of one tier that resolve to the same lookup key.

use indexmap::IndexMap;

use super::normalize::normalize;
use super::scanner::SourceFile;
use crate::error::{Error, Result, Tier};

/// Sources of one tier keyed by `format → normalized name`.
pub type SourceIndex = IndexMap<String, IndexMap<String, SourceFile>>;

/// Indexes `sources`, failing on the first pair sharing `(format, normalized name)`.
///
/// `sources` should hold every file of the tier across all roots of one
/// application, in discovery order.
pub fn index_sources(tier: Tier, sources: Vec<SourceFile>) -> Result<SourceIndex> {
    let mut index = SourceIndex::new();
    for source in sources {
        let key = normalize(&source.name);
        let by_name = index.entry(source.format.clone()).or_default();
        if let Some(existing) = by_name.get(&key) {
            return Err(Error::DuplicateTemplate {
                tier,
                first: existing.path.clone(),
                second: source.path,
            });
        }
        by_name.insert(key, source);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn source(name: &str, format: &str, path: &str) -> SourceFile {
        SourceFile {
            name: name.to_string(),
            format: format.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_same_name_different_format_is_fine() {
        let index = index_sources(
            Tier::Content,
            vec![source("index", "html", "/a/index.html"), source("index", "txt", "/a/index.txt")],
        )
        .unwrap();
        assert_eq!(index["html"]["index"].path, PathBuf::from("/a/index.html"));
        assert_eq!(index["txt"]["index"].path, PathBuf::from("/a/index.txt"));
    }

    #[test]
    fn test_duplicate_across_roots() {
        let err = index_sources(
            Tier::Layout,
            vec![source("app", "html", "/a/layouts/app.html"), source("app", "html", "/b/layouts/app.html")],
        )
        .unwrap_err();
        match err {
            Error::DuplicateTemplate { tier, first, second } => {
                assert_eq!(tier, Tier::Layout);
                assert_eq!(first, PathBuf::from("/a/layouts/app.html"));
                assert_eq!(second, PathBuf::from("/b/layouts/app.html"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let err = index_sources(
            Tier::Content,
            vec![
                source("UserProfile", "html", "/a/UserProfile.html"),
                source("user_profile", "html", "/a/user_profile.html"),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateTemplate { tier: Tier::Content, .. }));
    }

    #[test]
    fn test_keys_are_normalized() {
        let index =
            index_sources(Tier::Content, vec![source("Admin/ListUsers", "html", "/a/x.html")])
                .unwrap();
        assert!(index["html"].contains_key("admin/list_users"));
    }
}
