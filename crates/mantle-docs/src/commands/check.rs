//! `mantle-docs check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mantle_docs_config::Config;

use super::SidebarArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sidebars::load_versions;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover mantle-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sidebar: SidebarArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any sidebar is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.sidebar.into_cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let versions = load_versions(&config)?;

        for label in versions.labels() {
            let tree = versions.get(label)?;
            let marker = if label == versions.current_label() {
                " (current)"
            } else {
                ""
            };
            output.info(&format!(
                "{label}{marker}: {} categories, {} pages, depth {}",
                tree.len(),
                tree.leaves().len(),
                tree.depth()
            ));
        }

        output.success(&format!("{} sidebar version(s) OK", versions.len()));
        Ok(())
    }
}
