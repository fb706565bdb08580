//! Sidebar navigation for the Mantle documentation site.
//!
//! This crate provides:
//! - [`build_path`] and [`expand_section`]: section/slug to [`DocumentReference`]
//! - [`compose_tree`]: category declarations to a [`NavTree`]
//! - [`VersionedNavTree`]: one tree per documentation version
//! - [`EditLinks`]: "edit this page" URLs per version
//!
//! # Quick Start
//!
//! ```
//! use mantle_docs_nav::{CategoryDeclaration, PathStyle, compose_tree};
//!
//! let declarations = vec![
//!     CategoryDeclaration::new("Models").slugs(["models", "querying-models"]),
//! ];
//! let tree = compose_tree(&declarations, &PathStyle::Implicit)?;
//!
//! let leaves: Vec<_> = tree.leaves().into_iter().map(|r| r.as_str()).collect();
//! assert_eq!(leaves, ["/models/models", "/models/querying-models"]);
//! # Ok::<(), mantle_docs_nav::NavError>(())
//! ```

mod declaration;
mod error;
mod reference;
mod tree;
mod versions;

pub use declaration::{
    CategoryDeclaration, ItemDeclaration, LinkDeclaration, SidebarsDeclaration, compose_tree,
};
pub use error::NavError;
pub use reference::{DocumentReference, PathStyle, build_path, expand_section};
pub use tree::{Category, CategoryLink, NavNode, NavTree, Neighbors};
pub use versions::{EditLinks, VersionedNavTree};
