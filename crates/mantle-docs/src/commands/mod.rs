//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod show;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use mantle_docs_config::CliSettings;
use mantle_docs_nav::PathStyle;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use show::ShowArgs;

/// Sidebar overrides shared by every command.
#[derive(Args, Debug, Default)]
pub(crate) struct SidebarArgs {
    /// Sidebar declaration file for the current version (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Sidebar id to publish from each declaration file (overrides config).
    #[arg(long, value_name = "ID")]
    sidebar: Option<String>,

    /// Path style of the current version (overrides config).
    #[arg(long, value_enum)]
    path_style: Option<PathStyleArg>,

    /// Source extension for `--path-style explicit` (default: md).
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PathStyleArg {
    Implicit,
    Explicit,
}

impl SidebarArgs {
    /// Config overrides for these arguments.
    pub(crate) fn into_cli_settings(self) -> CliSettings {
        let path_style = self.path_style.map(|style| match style {
            PathStyleArg::Implicit => PathStyle::Implicit,
            PathStyleArg::Explicit => {
                PathStyle::explicit(self.extension.unwrap_or_else(|| "md".to_owned()))
            }
        });
        CliSettings {
            sidebars: self.sidebars,
            sidebar_id: self.sidebar,
            path_style,
            output_dir: None,
        }
    }
}
