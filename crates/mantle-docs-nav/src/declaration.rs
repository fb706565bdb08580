//! Author-maintained sidebar declarations and tree composition.
//!
//! Declarations are the compact form documentation maintainers edit: category
//! labels plus short page slugs. [`compose_tree`] resolves every slug against
//! its category's section into a full [`DocumentReference`].
//!
//! # Sections
//!
//! Each category resolves its slugs against a section prefix:
//! - an explicit `section` is used as-is
//! - otherwise a top-level category uses its kebab-cased label
//!   (`Getting Started` → `getting-started`)
//! - and a nested category appends its kebab-cased label to the parent
//!   section (`Support` under `features` → `features/support`)
//!
//! Nested categories start collapsed unless declared otherwise; top-level
//! categories start expanded.
//!
//! # YAML Format
//!
//! ```yaml
//! docs:
//!   - label: Models
//!     link: { type: doc, slug: models }
//!     items: [models, query-builder, seeding]
//!   - label: Features
//!     link: { type: generated-index }
//!     items:
//!       - cache
//!       - label: Support
//!         items: [collections, pipeline]
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::{
    Category, CategoryLink, DocumentReference, NavError, NavNode, NavTree, PathStyle, build_path,
};

/// Declaration of one category.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDeclaration {
    /// Display label.
    pub label: String,
    /// Section prefix for this category's slugs (see module docs for defaults).
    #[serde(default)]
    pub section: Option<String>,
    /// Initial collapse state.
    #[serde(default)]
    pub collapsed: Option<bool>,
    /// Landing target.
    #[serde(default)]
    pub link: Option<LinkDeclaration>,
    /// Ordered slugs and nested categories.
    #[serde(default)]
    pub items: Vec<ItemDeclaration>,
}

/// Entry within a category declaration.
///
/// Scalars are slugs, so `404` and `true` read as the slugs `"404"` and
/// `"true"`. Mappings are nested categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemDeclaration {
    /// Page slug within the enclosing section.
    Slug(String),
    /// Nested category.
    Category(CategoryDeclaration),
}

impl<'de> Deserialize<'de> for ItemDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemVisitor)
    }
}

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = ItemDeclaration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a page slug or a nested category")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ItemDeclaration::Slug(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(ItemDeclaration::Slug(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ItemDeclaration::Slug(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ItemDeclaration::Slug(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ItemDeclaration::Slug(v.to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        CategoryDeclaration::deserialize(MapAccessDeserializer::new(map))
            .map(ItemDeclaration::Category)
    }
}

/// Declared landing target of a category.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum LinkDeclaration {
    /// Page slug within the category's section.
    Doc {
        /// Landing page slug.
        slug: String,
    },
    /// Generated index page.
    GeneratedIndex,
}

impl CategoryDeclaration {
    /// Start a declaration with the given label and no items.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            section: None,
            collapsed: None,
            link: None,
            items: Vec::new(),
        }
    }

    /// Set an explicit section prefix.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the initial collapse state.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Link the category to one of its section's pages.
    #[must_use]
    pub fn link_doc(mut self, slug: impl Into<String>) -> Self {
        self.link = Some(LinkDeclaration::Doc { slug: slug.into() });
        self
    }

    /// Link the category to a generated index page.
    #[must_use]
    pub fn link_generated_index(mut self) -> Self {
        self.link = Some(LinkDeclaration::GeneratedIndex);
        self
    }

    /// Append page slugs.
    #[must_use]
    pub fn slugs<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items
            .extend(slugs.into_iter().map(|s| ItemDeclaration::Slug(s.into())));
        self
    }

    /// Append a nested category.
    #[must_use]
    pub fn category(mut self, category: CategoryDeclaration) -> Self {
        self.items.push(ItemDeclaration::Category(category));
        self
    }

    /// Section prefix this category resolves slugs against.
    fn resolve_section(&self, parent_section: Option<&str>) -> String {
        if let Some(section) = &self.section {
            return section.clone();
        }
        let own = kebab_case(&self.label);
        match parent_section {
            Some(parent) => format!("{parent}/{own}"),
            None => own,
        }
    }
}

/// Sidebar declarations keyed by sidebar id (e.g. `docs`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SidebarsDeclaration {
    sidebars: BTreeMap<String, Vec<CategoryDeclaration>>,
}

impl SidebarsDeclaration {
    /// Parse declarations from YAML content.
    ///
    /// Empty content yields no sidebars.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Declaration`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, NavError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| NavError::Declaration(format!("Invalid YAML: {e}")))
    }

    /// Sidebar ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Category declarations for sidebar `id`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Declaration`] if no such sidebar is declared.
    pub fn sidebar(&self, id: &str) -> Result<&[CategoryDeclaration], NavError> {
        self.sidebars
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| NavError::Declaration(format!("sidebar `{id}` is not declared")))
    }
}

/// Resolve category declarations into a navigation tree.
///
/// The tree mirrors the declarations exactly: same top-level count, nesting,
/// and child order, with one leaf per declared slug. Construction is
/// all-or-nothing.
///
/// # Errors
///
/// Returns the first [`NavError::InvalidInput`] raised while resolving a slug
/// or landing link.
pub fn compose_tree(
    declarations: &[CategoryDeclaration],
    style: &PathStyle,
) -> Result<NavTree, NavError> {
    let nodes = declarations
        .iter()
        .map(|declaration| compose_category(declaration, None, style).map(NavNode::Category))
        .collect::<Result<Vec<_>, _>>()?;

    let tree = NavTree::new(nodes);
    tracing::debug!(
        categories = tree.len(),
        leaves = tree.leaves().len(),
        "Composed navigation tree"
    );
    Ok(tree)
}

fn compose_category(
    declaration: &CategoryDeclaration,
    parent_section: Option<&str>,
    style: &PathStyle,
) -> Result<Category, NavError> {
    let section = declaration.resolve_section(parent_section);

    let link = declaration
        .link
        .as_ref()
        .map(|link| compose_link(link, &section, style))
        .transpose()?;

    let children = declaration
        .items
        .iter()
        .map(|item| match item {
            ItemDeclaration::Slug(slug) => build_path(&section, slug, style).map(NavNode::Leaf),
            ItemDeclaration::Category(nested) => {
                compose_category(nested, Some(&section), style).map(NavNode::Category)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Category {
        label: declaration.label.clone(),
        collapsed: declaration.collapsed.unwrap_or(parent_section.is_some()),
        link,
        children,
    })
}

fn compose_link(
    link: &LinkDeclaration,
    section: &str,
    style: &PathStyle,
) -> Result<CategoryLink, NavError> {
    match link {
        LinkDeclaration::Doc { slug } => {
            let id: DocumentReference = build_path(section, slug, style)?;
            Ok(CategoryLink::Doc { id })
        }
        LinkDeclaration::GeneratedIndex => Ok(CategoryLink::GeneratedIndex),
    }
}

/// Lowercase `label`, joining alphanumeric runs with `-`.
fn kebab_case(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn implicit() -> PathStyle {
        PathStyle::Implicit
    }

    fn doc(section: &str, slug: &str) -> DocumentReference {
        build_path(section, slug, &implicit()).unwrap()
    }

    fn as_category(node: &NavNode) -> &Category {
        match node {
            NavNode::Category(category) => category,
            NavNode::Leaf(reference) => panic!("expected category, got leaf {reference}"),
        }
    }

    fn leaf_paths(category: &Category) -> Vec<&str> {
        category
            .children
            .iter()
            .filter_map(|node| match node {
                NavNode::Leaf(reference) => Some(reference.as_str()),
                NavNode::Category(_) => None,
            })
            .collect()
    }

    const MANTLE_SIDEBARS: &str = r"
docs:
  - label: Getting Started
    link: { type: doc, slug: installation }
    items:
      - installation
      - directory-structure
      - tutorial
  - label: Architecture Concepts
    section: architecture
    link: { type: doc, slug: architecture }
    items: [architecture, bootloader, service-provider, configuration]
  - label: Basics
    link: { type: generated-index }
    items: [requests, templating, helpers, commands]
  - label: Features
    link: { type: generated-index }
    items:
      - assets
      - cache
      - label: Support
        link: { type: doc, slug: support }
        items: [collections, conditionable, pipeline]
      - queue
  - label: Testing
    collapsed: true
    items: [testing, testkit, pest]
";

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("Getting Started"), "getting-started");
        assert_eq!(kebab_case("Models"), "models");
        assert_eq!(kebab_case("  HTTP & Client "), "http-client");
        assert_eq!(kebab_case("!!!"), "");
    }

    #[test]
    fn test_compose_models_category() {
        let declarations = vec![CategoryDeclaration::new("Models").slugs(["models", "querying-models"])];

        let tree = compose_tree(&declarations, &implicit()).unwrap();

        assert_eq!(tree.len(), 1);
        let models = as_category(&tree.nodes()[0]);
        assert_eq!(models.label, "Models");
        assert!(!models.collapsed);
        assert_eq!(models.link, None);
        assert_eq!(
            leaf_paths(models),
            vec!["/models/models", "/models/querying-models"]
        );
    }

    #[test]
    fn test_compose_explicit_extension() {
        let declarations =
            vec![CategoryDeclaration::new("Getting Started").slugs(["installation", "tutorial"])];

        let tree = compose_tree(&declarations, &PathStyle::explicit("md")).unwrap();

        assert_eq!(
            leaf_paths(as_category(&tree.nodes()[0])),
            vec![
                "/getting-started/installation.md",
                "/getting-started/tutorial.md"
            ]
        );
    }

    #[test]
    fn test_compose_from_yaml_preserves_shape() {
        let sidebars = SidebarsDeclaration::from_yaml(MANTLE_SIDEBARS).unwrap();
        let tree = compose_tree(sidebars.sidebar("docs").unwrap(), &implicit()).unwrap();

        let labels: Vec<_> = tree
            .nodes()
            .iter()
            .map(|node| as_category(node).label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Getting Started",
                "Architecture Concepts",
                "Basics",
                "Features",
                "Testing"
            ]
        );
        assert_eq!(tree.depth(), 2);

        let features = as_category(&tree.nodes()[3]);
        assert_eq!(features.children.len(), 4);
        assert_eq!(features.children[0], NavNode::Leaf(doc("features", "assets")));
        assert_eq!(features.children[3], NavNode::Leaf(doc("features", "queue")));

        let support = as_category(&features.children[2]);
        assert_eq!(support.label, "Support");
        assert!(support.collapsed);
        assert_eq!(
            support.link,
            Some(CategoryLink::Doc {
                id: doc("features/support", "support")
            })
        );
        assert_eq!(
            leaf_paths(support),
            vec![
                "/features/support/collections",
                "/features/support/conditionable",
                "/features/support/pipeline",
            ]
        );
    }

    #[test]
    fn test_compose_resolves_links_and_sections() {
        let sidebars = SidebarsDeclaration::from_yaml(MANTLE_SIDEBARS).unwrap();
        let tree = compose_tree(sidebars.sidebar("docs").unwrap(), &implicit()).unwrap();

        let getting_started = as_category(&tree.nodes()[0]);
        assert_eq!(
            getting_started.link,
            Some(CategoryLink::Doc {
                id: doc("getting-started", "installation")
            })
        );

        let architecture = as_category(&tree.nodes()[1]);
        assert_eq!(leaf_paths(architecture)[0], "/architecture/architecture");

        let basics = as_category(&tree.nodes()[2]);
        assert_eq!(basics.link, Some(CategoryLink::GeneratedIndex));

        let testing = as_category(&tree.nodes()[4]);
        assert!(testing.collapsed);
        assert!(tree.ensure_unique().is_ok());
    }

    #[test]
    fn test_round_trip_recovers_slugs() {
        let style = PathStyle::explicit("md");
        let slugs = ["test-framework", "testkit", "continuous-integration", "cron"];
        let declarations = vec![CategoryDeclaration::new("Testing").slugs(slugs)];

        let tree = compose_tree(&declarations, &style).unwrap();
        let pairs = tree.to_slug_pairs(&style).unwrap();

        let expected: Vec<_> = slugs.iter().map(|slug| ("testing", *slug)).collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_compose_invalid_slug_fails_whole_tree() {
        let declarations = vec![
            CategoryDeclaration::new("Basics").slugs(["requests"]),
            CategoryDeclaration::new("Broken").slugs(["ok", ".."]),
        ];

        let err = compose_tree(&declarations, &implicit()).unwrap_err();
        assert!(matches!(err, NavError::InvalidInput { .. }));
    }

    #[test]
    fn test_compose_invalid_link_fails() {
        let declarations = vec![CategoryDeclaration::new("Models").link_doc("")];
        assert!(compose_tree(&declarations, &implicit()).is_err());
    }

    #[test]
    fn test_compose_label_without_section_fails_on_slug() {
        let declarations = vec![CategoryDeclaration::new("???").slugs(["page"])];
        let err = compose_tree(&declarations, &implicit()).unwrap_err();
        assert_eq!(err, NavError::invalid("", "section prefix is empty"));
    }

    #[test]
    fn test_compose_empty_declarations() {
        let tree = compose_tree(&[], &implicit()).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_compose_does_not_deduplicate() {
        let declarations = vec![CategoryDeclaration::new("Testing").slugs(["hooks", "hooks"])];

        let tree = compose_tree(&declarations, &implicit()).unwrap();

        assert_eq!(tree.leaves().len(), 2);
        assert!(matches!(
            tree.ensure_unique(),
            Err(NavError::DuplicateReference(_))
        ));
    }

    #[test]
    fn test_explicit_nested_section_is_absolute() {
        let declarations = vec![
            CategoryDeclaration::new("Features")
                .category(CategoryDeclaration::new("Helpers").section("support").slugs(["str"]))
                .collapsed(false),
        ];

        let tree = compose_tree(&declarations, &implicit()).unwrap();
        let helpers = as_category(&as_category(&tree.nodes()[0]).children[0]);
        assert_eq!(leaf_paths(helpers), vec!["/support/str"]);
    }

    #[test]
    fn test_from_yaml_empty_content() {
        let sidebars = SidebarsDeclaration::from_yaml("  \n").unwrap();
        assert_eq!(sidebars.ids().count(), 0);
    }

    #[test]
    fn test_from_yaml_unknown_field_rejected() {
        let yaml = "docs:\n  - label: Models\n    slugz: [models]\n";
        let err = SidebarsDeclaration::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, NavError::Declaration(_)));
    }

    #[test]
    fn test_from_yaml_numeric_slugs() {
        let yaml = "docs:\n  - label: Errors\n    items: [404, not-found, 500]\n";
        let sidebars = SidebarsDeclaration::from_yaml(yaml).unwrap();

        let tree = compose_tree(sidebars.sidebar("docs").unwrap(), &PathStyle::Implicit).unwrap();

        let leaves: Vec<&str> = tree
            .leaves()
            .into_iter()
            .map(DocumentReference::as_str)
            .collect();
        assert_eq!(leaves, vec!["/errors/404", "/errors/not-found", "/errors/500"]);
    }

    #[test]
    fn test_from_yaml_nested_typo_names_field() {
        let yaml = r"
docs:
  - label: Features
    items:
      - cache
      - label: Support
        colapsed: true
        items: [collections]
";
        let err = SidebarsDeclaration::from_yaml(yaml).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("colapsed"), "unexpected error: {msg}");
        assert!(!msg.contains("untagged"), "unexpected error: {msg}");
    }

    #[test]
    fn test_from_yaml_sequence_item_rejected() {
        let yaml = "docs:\n  - label: Models\n    items: [[models]]\n";
        let err = SidebarsDeclaration::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("a page slug or a nested category"));
    }

    #[test]
    fn test_sidebar_missing_id() {
        let sidebars = SidebarsDeclaration::from_yaml(MANTLE_SIDEBARS).unwrap();
        let err = sidebars.sidebar("api").unwrap_err();
        assert!(err.to_string().contains("api"));
    }
}
