//! `mantle-docs build` command implementation.
//!
//! Writes, under the output directory:
//! - `sidebars/{version}.json`: `{ "<sidebar id>": <tree> }` per version
//! - `edit-links/{version}.json`: document reference to edit URL (when `[edit]` is set)
//! - `versions.json`: version labels and the current one

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Args;
use mantle_docs_config::{CliSettings, Config};
use mantle_docs_nav::VersionedNavTree;
use serde::Serialize;

use super::SidebarArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sidebars::{edit_urls, load_versions};

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover mantle-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sidebar: SidebarArgs,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

/// Contents of `versions.json`.
#[derive(Serialize)]
struct VersionsManifest<'a> {
    current: &'a str,
    versions: Vec<&'a str>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, any sidebar is invalid, or
    /// output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir,
            ..self.sidebar.into_cli_settings()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let versions = load_versions(&config)?;

        let written = write_outputs(&config, &versions)?;

        output.info(&format!("Output directory: {}", config.output_dir.display()));
        output.success(&format!("Wrote {written} file(s)"));
        Ok(())
    }
}

/// Write every output file, returning how many were written.
fn write_outputs(config: &Config, versions: &VersionedNavTree) -> Result<usize, CliError> {
    let out = &config.output_dir;
    let sidebar_id = config.docs_resolved.sidebar_id.as_str();
    let mut written = 0;

    for label in versions.labels() {
        let tree = versions.get(label)?;
        let document = BTreeMap::from([(sidebar_id, tree)]);
        write_json(&out.join("sidebars").join(format!("{label}.json")), &document)?;
        written += 1;

        if let Some(links) = &config.edit_links {
            let urls = edit_urls(
                tree,
                links,
                config.path_style(label),
                label,
                versions.current_label(),
            );
            write_json(&out.join("edit-links").join(format!("{label}.json")), &urls)?;
            written += 1;
        }
    }

    let manifest = VersionsManifest {
        current: versions.current_label(),
        versions: versions.labels().collect(),
    };
    write_json(&out.join("versions.json"), &manifest)?;
    written += 1;

    tracing::info!(count = written, dir = %out.display(), "Wrote sidebar outputs");
    Ok(written)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}
