//! `mantle-docs show` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use mantle_docs_config::Config;

use super::SidebarArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::sidebars::load_versions;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Path to configuration file (default: auto-discover mantle-docs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sidebar: SidebarArgs,

    /// Documentation version to show (default: current).
    #[arg(long = "version", value_name = "LABEL")]
    docs_version: Option<String>,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// Unknown versions fall back to the current version with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any sidebar is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.sidebar.into_cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let versions = load_versions(&config)?;

        let requested = self
            .docs_version
            .as_deref()
            .unwrap_or(versions.current_label());
        let (label, tree) = versions.resolve(requested);
        if label != requested {
            output.warning(&format!(
                "Version `{requested}` not found, showing `{label}`"
            ));
        }

        let json = serde_json::to_string_pretty(tree)?;
        Term::stdout().write_line(&json)?;
        Ok(())
    }
}
