//! Loading sidebar declarations for every configured version.

use std::collections::BTreeMap;
use std::path::Path;

use mantle_docs_config::Config;
use mantle_docs_nav::{
    EditLinks, NavTree, PathStyle, SidebarsDeclaration, VersionedNavTree, compose_tree,
};

use crate::error::CliError;

/// Compose the configured sidebar of every version, each with its own path
/// style.
///
/// Fails on the first unreadable file, invalid declaration, or sidebar that
/// lists a page twice.
pub(crate) fn load_versions(config: &Config) -> Result<VersionedNavTree, CliError> {
    let docs = &config.docs_resolved;
    let current_label = &config.versions_resolved.current;

    let current = compose_file(&docs.sidebars, &docs.sidebar_id, &docs.path_style)?;
    let mut versions = VersionedNavTree::new(current_label.clone(), current).map_err(|e| {
        CliError::Version {
            label: current_label.clone(),
            source: e,
        }
    })?;

    for (label, archived) in &config.versions_resolved.archived {
        let tree = compose_file(&archived.sidebars, &docs.sidebar_id, &archived.path_style)?;
        versions
            .insert(label.clone(), tree)
            .map_err(|e| CliError::Version {
                label: label.clone(),
                source: e,
            })?;
    }

    Ok(versions)
}

fn compose_file(path: &Path, sidebar_id: &str, style: &PathStyle) -> Result<NavTree, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tree = SidebarsDeclaration::from_yaml(&content)
        .and_then(|sidebars| compose_tree(sidebars.sidebar(sidebar_id)?, style))
        .map_err(|e| CliError::Sidebar {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(
        path = %path.display(),
        sidebar = sidebar_id,
        leaves = tree.leaves().len(),
        "Loaded sidebar"
    );
    Ok(tree)
}

/// Edit URL for every leaf of `tree`, keyed by document reference.
///
/// Implicit references address `.md` sources.
pub(crate) fn edit_urls(
    tree: &NavTree,
    links: &EditLinks,
    style: &PathStyle,
    version: &str,
    current: &str,
) -> BTreeMap<String, String> {
    tree.leaves()
        .into_iter()
        .map(|leaf| {
            let doc_path = match style {
                PathStyle::Implicit => format!("{leaf}.md"),
                PathStyle::Explicit { .. } => leaf.to_string(),
            };
            (
                leaf.to_string(),
                links.edit_url(&doc_path, version, current),
            )
        })
        .collect()
}
