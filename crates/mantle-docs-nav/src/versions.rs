//! Versioned navigation trees and edit links.
//!
//! Each published documentation version carries its own sidebar. Exactly one
//! version is current; lookups of unknown versions fall back to it.

use std::collections::BTreeMap;

use crate::{NavError, NavTree};

/// Navigation trees keyed by version label.
#[derive(Clone, Debug)]
pub struct VersionedNavTree {
    trees: BTreeMap<String, NavTree>,
    current: String,
}

impl VersionedNavTree {
    /// Create with the current version's tree.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::DuplicateReference`] if the tree repeats a page.
    pub fn new(current: impl Into<String>, tree: NavTree) -> Result<Self, NavError> {
        tree.ensure_unique()?;
        let current = current.into();
        let mut trees = BTreeMap::new();
        trees.insert(current.clone(), tree);
        Ok(Self { trees, current })
    }

    /// Add or replace the tree for `label`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::DuplicateReference`] if the tree repeats a page.
    pub fn insert(&mut self, label: impl Into<String>, tree: NavTree) -> Result<(), NavError> {
        tree.ensure_unique()?;
        self.trees.insert(label.into(), tree);
        Ok(())
    }

    /// Label of the current version.
    #[must_use]
    pub fn current_label(&self) -> &str {
        &self.current
    }

    /// Tree of the current version.
    #[must_use]
    pub fn current(&self) -> &NavTree {
        // The current label is inserted on construction and never removed.
        &self.trees[&self.current]
    }

    /// All version labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Number of versions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Always false; a versioned tree holds at least the current version.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Tree for `label`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::UnknownVersion`] if no such version exists.
    pub fn get(&self, label: &str) -> Result<&NavTree, NavError> {
        self.trees
            .get(label)
            .ok_or_else(|| NavError::UnknownVersion(label.to_owned()))
    }

    /// Tree for `label`, falling back to the current version.
    ///
    /// Returns the label actually served alongside its tree.
    #[must_use]
    pub fn resolve<'a>(&'a self, label: &'a str) -> (&'a str, &'a NavTree) {
        match self.get(label) {
            Ok(tree) => (label, tree),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    fallback = %self.current,
                    "Falling back to current documentation version"
                );
                (self.current.as_str(), self.current())
            }
        }
    }
}

/// Builds "edit this page" URLs pointing at the docs repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditLinks {
    /// Repository web URL, e.g. `https://github.com/alleyinteractive/mantle-docs`.
    pub repository_url: String,
    /// Branch the edit links target.
    pub branch: String,
    /// Directory holding the current version's sources.
    pub docs_dir: String,
    /// Directory holding archived versions (`version-{label}` subdirectories).
    pub versioned_docs_dir: String,
}

impl EditLinks {
    /// Edit URL for the source file `doc_path` (relative to its docs root).
    #[must_use]
    pub fn edit_url(&self, doc_path: &str, version: &str, current: &str) -> String {
        let repo = self.repository_url.trim_end_matches('/');
        let doc_path = doc_path.trim_start_matches('/');
        if version == current {
            format!("{repo}/edit/{}/{}/{doc_path}", self.branch, self.docs_dir)
        } else {
            format!(
                "{repo}/edit/{}/{}/version-{version}/{doc_path}",
                self.branch, self.versioned_docs_dir
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CategoryDeclaration, PathStyle, compose_tree};

    fn tree(slugs: &[&str]) -> NavTree {
        compose_tree(
            &[CategoryDeclaration::new("Models").slugs(slugs.iter().copied())],
            &PathStyle::Implicit,
        )
        .unwrap()
    }

    fn edit_links() -> EditLinks {
        EditLinks {
            repository_url: "https://github.com/alleyinteractive/mantle-docs/".to_owned(),
            branch: "main".to_owned(),
            docs_dir: "docs".to_owned(),
            versioned_docs_dir: "versioned_docs".to_owned(),
        }
    }

    #[test]
    fn test_get_current() {
        let versions = VersionedNavTree::new("current", tree(&["models"])).unwrap();

        assert_eq!(versions.current_label(), "current");
        assert_eq!(versions.get("current").unwrap(), &tree(&["models"]));
        assert_eq!(versions.len(), 1);
        assert!(!versions.is_empty());
    }

    #[test]
    fn test_get_unknown_version() {
        let versions = VersionedNavTree::new("current", tree(&["models"])).unwrap();

        assert_eq!(
            versions.get("2.x"),
            Err(NavError::UnknownVersion("2.x".to_owned()))
        );
    }

    #[test]
    fn test_resolve_falls_back_to_current() {
        let versions = VersionedNavTree::new("current", tree(&["models"])).unwrap();

        let (label, resolved) = versions.resolve("2.x");

        assert_eq!(label, "current");
        assert_eq!(resolved, versions.current());
    }

    #[test]
    fn test_resolve_known_version() {
        let mut versions = VersionedNavTree::new("current", tree(&["models"])).unwrap();
        versions.insert("0.x", tree(&["querying-models"])).unwrap();

        let (label, resolved) = versions.resolve("0.x");

        assert_eq!(label, "0.x");
        assert_eq!(resolved, &tree(&["querying-models"]));
        assert_eq!(versions.labels().collect::<Vec<_>>(), vec!["0.x", "current"]);
    }

    #[test]
    fn test_duplicate_pages_rejected() {
        let err = VersionedNavTree::new("current", tree(&["models", "models"])).unwrap_err();
        assert!(matches!(err, NavError::DuplicateReference(_)));

        let mut versions = VersionedNavTree::new("current", tree(&["models"])).unwrap();
        assert!(versions.insert("0.x", tree(&["seeding", "seeding"])).is_err());
        assert_eq!(versions.len(), 1);
    }

    #[test]
    fn test_edit_url_current_version() {
        assert_eq!(
            edit_links().edit_url("models/models.md", "current", "current"),
            "https://github.com/alleyinteractive/mantle-docs/edit/main/docs/models/models.md"
        );
    }

    #[test]
    fn test_edit_url_archived_version() {
        assert_eq!(
            edit_links().edit_url("/models/models.md", "0.x", "current"),
            "https://github.com/alleyinteractive/mantle-docs/edit/main/versioned_docs/version-0.x/models/models.md"
        );
    }
}
