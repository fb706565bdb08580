//! Navigation tree data model.
//!
//! A [`NavTree`] is one sidebar: an ordered list of [`NavNode`]s, each either a
//! leaf page or a [`Category`] grouping further nodes. Trees are built once by
//! [`compose_tree`](crate::compose_tree) and never mutated afterwards.
//!
//! Trees serialize to the sidebar schema the site generator consumes:
//!
//! ```json
//! [
//!   {
//!     "type": "category",
//!     "label": "Models",
//!     "collapsed": false,
//!     "link": { "type": "doc", "id": "/models/models" },
//!     "items": ["/models/models", "/models/seeding"]
//!   }
//! ]
//! ```
//!
//! Ids are document references verbatim, leading `/` included, which is the
//! form VuePress sidebars use. Docusaurus ids are site-relative
//! (`models/models`); see [`DocumentReference::doc_id`].

use std::collections::HashSet;

use serde::Serialize;

use crate::{DocumentReference, NavError, PathStyle};

/// Node in a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavNode {
    /// Single page.
    Leaf(DocumentReference),
    /// Labeled group of pages and nested categories.
    Category(Category),
}

/// Grouping node with its own label and optional landing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "category")]
pub struct Category {
    /// Display label.
    pub label: String,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Landing target when the category label is clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    /// Ordered child nodes.
    #[serde(rename = "items")]
    pub children: Vec<NavNode>,
}

/// Landing target of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    /// Links to an existing page.
    Doc {
        /// Linked page.
        id: DocumentReference,
    },
    /// Generator synthesizes an index page listing the children.
    GeneratedIndex,
}

/// Pager links around a page in sidebar order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbors<'a> {
    /// Page before, if any.
    pub previous: Option<&'a DocumentReference>,
    /// Page after, if any.
    pub next: Option<&'a DocumentReference>,
}

/// One sidebar: the ordered top-level nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavTree {
    nodes: Vec<NavNode>,
}

impl NavTree {
    /// Create a tree from already-resolved nodes.
    #[must_use]
    pub fn new(nodes: Vec<NavNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All leaf references in depth-first sidebar order.
    ///
    /// Category landing links are not included.
    #[must_use]
    pub fn leaves(&self) -> Vec<&DocumentReference> {
        fn walk<'a>(nodes: &'a [NavNode], out: &mut Vec<&'a DocumentReference>) {
            for node in nodes {
                match node {
                    NavNode::Leaf(reference) => out.push(reference),
                    NavNode::Category(category) => walk(&category.children, out),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }

    /// True if `reference` is one of the tree's leaves.
    #[must_use]
    pub fn contains(&self, reference: &DocumentReference) -> bool {
        self.leaves().contains(&reference)
    }

    /// Previous and next pages around `reference` in sidebar order.
    ///
    /// Returns `None` if the page is not a leaf of this tree.
    #[must_use]
    pub fn neighbors(&self, reference: &DocumentReference) -> Option<Neighbors<'_>> {
        let leaves = self.leaves();
        let idx = leaves.iter().position(|leaf| *leaf == reference)?;
        Some(Neighbors {
            previous: idx.checked_sub(1).map(|i| leaves[i]),
            next: leaves.get(idx + 1).copied(),
        })
    }

    /// Labels of the categories enclosing `reference`, outermost first.
    ///
    /// Empty if the page is top-level or not in the tree.
    #[must_use]
    pub fn breadcrumbs(&self, reference: &DocumentReference) -> Vec<&str> {
        fn find<'a>(
            nodes: &'a [NavNode],
            reference: &DocumentReference,
            trail: &mut Vec<&'a str>,
        ) -> bool {
            for node in nodes {
                match node {
                    NavNode::Leaf(leaf) if leaf == reference => return true,
                    NavNode::Leaf(_) => {}
                    NavNode::Category(category) => {
                        trail.push(&category.label);
                        if find(&category.children, reference, trail) {
                            return true;
                        }
                        trail.pop();
                    }
                }
            }
            false
        }

        let mut trail = Vec::new();
        if find(&self.nodes, reference, &mut trail) {
            trail
        } else {
            Vec::new()
        }
    }

    /// Deepest category nesting (0 for a tree of bare leaves).
    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[NavNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    NavNode::Leaf(_) => 0,
                    NavNode::Category(category) => 1 + depth_of(&category.children),
                })
                .max()
                .unwrap_or(0)
        }

        depth_of(&self.nodes)
    }

    /// Check that no document appears twice among the leaves.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::DuplicateReference`] for the first repeated leaf.
    pub fn ensure_unique(&self) -> Result<(), NavError> {
        let mut seen = HashSet::new();
        for leaf in self.leaves() {
            if !seen.insert(leaf) {
                return Err(NavError::DuplicateReference(leaf.clone()));
            }
        }
        Ok(())
    }

    /// Leaves split back into `(section_prefix, slug)` pairs.
    ///
    /// Returns `None` if any leaf was not built with `style`.
    #[must_use]
    pub fn to_slug_pairs(&self, style: &PathStyle) -> Option<Vec<(&str, &str)>> {
        self.leaves()
            .into_iter()
            .map(|leaf| leaf.split(style))
            .collect()
    }
}
