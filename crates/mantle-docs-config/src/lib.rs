//! Configuration management for the Mantle documentation site.
//!
//! Parses `mantle-docs.toml` with serde and provides auto-discovery of the
//! config file in parent directories. CLI settings can be applied during load
//! via [`CliSettings`].
//!
//! ```toml
//! [site]
//! title = "Mantle by Alley"
//! url = "https://mantle.alley.com"
//!
//! [docs]
//! sidebars = "sidebars.yaml"
//! path_style = "explicit"
//! extension = "md"
//!
//! [versions]
//! current = "current"
//!
//! [versions.archived."0.x"]
//! sidebars = "versioned_sidebars/version-0.x.yaml"
//! path_style = "explicit"
//!
//! [edit]
//! repository_url = "https://github.com/alleyinteractive/mantle-docs"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `site.url` and `edit.repository_url` support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mantle_docs_nav::{EditLinks, PathStyle};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config. Sidebar file and path
/// style overrides apply to the current version only.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override current version's sidebar declaration file.
    pub sidebars: Option<PathBuf>,
    /// Override the sidebar id published from each declaration file.
    pub sidebar_id: Option<String>,
    /// Override current version's path style.
    pub path_style: Option<PathStyle>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mantle-docs.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Version configuration (paths are relative strings from TOML).
    versions: VersionsConfigRaw,
    /// Edit link configuration (optional section).
    edit: Option<EditConfigRaw>,
    /// Output configuration.
    output: OutputConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved versions (set after loading).
    #[serde(skip)]
    pub versions_resolved: VersionsConfig,
    /// Resolved edit links (set after loading).
    #[serde(skip)]
    pub edit_links: Option<EditLinks>,
    /// Directory generated sidebars are written to.
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Public site URL.
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Mantle by Alley".to_owned(),
            url: "https://mantle.alley.com".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    sidebars: Option<String>,
    sidebar_id: Option<String>,
    path_style: Option<String>,
    extension: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Sidebar declaration file of the current version.
    pub sidebars: PathBuf,
    /// Sidebar id to publish from each declaration file.
    pub sidebar_id: String,
    /// How document references are addressed.
    pub path_style: PathStyle,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct VersionsConfigRaw {
    current: Option<String>,
    archived: BTreeMap<String, ArchivedVersionRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArchivedVersionRaw {
    sidebars: String,
    path_style: Option<String>,
    extension: Option<String>,
}

/// Resolved version configuration.
#[derive(Debug, Default)]
pub struct VersionsConfig {
    /// Label of the current version.
    pub current: String,
    /// Archived versions by label.
    pub archived: BTreeMap<String, ArchivedVersion>,
}

/// One archived documentation version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchivedVersion {
    /// Sidebar declaration file.
    pub sidebars: PathBuf,
    /// How this version's generator addresses documents. Defaults to the
    /// current version's style.
    pub path_style: PathStyle,
}

#[derive(Debug, Deserialize)]
struct EditConfigRaw {
    repository_url: String,
    branch: Option<String>,
    docs_dir: Option<String>,
    versioned_docs_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_valid_style(style: &PathStyle, field: &str) -> Result<(), ConfigError> {
    style
        .validate()
        .map_err(|e| ConfigError::Validation(format!("{field}: {e}")))
}

/// Parse a `path_style` / `extension` pair. `None` when no style is given.
fn parse_path_style(
    style: Option<&str>,
    extension: Option<&str>,
    field: &str,
) -> Result<Option<PathStyle>, ConfigError> {
    match style {
        None => Ok(None),
        Some("implicit") => Ok(Some(PathStyle::Implicit)),
        Some("explicit") => Ok(Some(PathStyle::explicit(extension.unwrap_or("md")))),
        Some(other) => Err(ConfigError::Validation(format!(
            "{field} must be `implicit` or `explicit`, got `{other}`"
        ))),
    }
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `mantle-docs.toml` in the current directory and its parents, and
    /// falls back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or parsing,
    /// expansion, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;

        Ok(config)
    }

    /// Path style of version `label`; the current version's style for any
    /// label that is not archived.
    #[must_use]
    pub fn path_style(&self, label: &str) -> &PathStyle {
        self.versions_resolved
            .archived
            .get(label)
            .map_or(&self.docs_resolved.path_style, |archived| {
                &archived.path_style
            })
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(sidebars) = &settings.sidebars {
            self.docs_resolved.sidebars.clone_from(sidebars);
        }
        if let Some(sidebar_id) = &settings.sidebar_id {
            self.docs_resolved.sidebar_id.clone_from(sidebar_id);
        }
        if let Some(path_style) = &settings.path_style {
            self.docs_resolved.path_style.clone_from(path_style);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            versions: VersionsConfigRaw::default(),
            edit: None,
            output: OutputConfigRaw::default(),
            docs_resolved: DocsConfig {
                sidebars: base.join("sidebars.yaml"),
                sidebar_id: "docs".to_owned(),
                path_style: PathStyle::Implicit,
            },
            versions_resolved: VersionsConfig {
                current: "current".to_owned(),
                archived: BTreeMap::new(),
            },
            edit_links: None,
            output_dir: base.join("build"),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after CLI settings apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_http_url(&self.site.url, "site.url")?;
        require_non_empty(&self.docs_resolved.sidebar_id, "docs.sidebar_id")?;

        require_valid_style(&self.docs_resolved.path_style, "docs.extension")?;

        self.validate_versions()?;

        if let Some(edit) = &self.edit_links {
            require_http_url(&edit.repository_url, "edit.repository_url")?;
            require_non_empty(&edit.branch, "edit.branch")?;
        }

        Ok(())
    }

    fn validate_versions(&self) -> Result<(), ConfigError> {
        let current = &self.versions_resolved.current;
        require_non_empty(current, "versions.current")?;
        if self.versions_resolved.archived.contains_key(current) {
            return Err(ConfigError::Validation(format!(
                "versions.archived cannot contain the current version `{current}`"
            )));
        }
        for (label, archived) in &self.versions_resolved.archived {
            if label.is_empty() {
                return Err(ConfigError::Validation(
                    "versions.archived labels cannot be empty".to_owned(),
                ));
            }
            require_valid_style(
                &archived.path_style,
                &format!("versions.archived.\"{label}\".extension"),
            )?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.expand_env_vars_with(|var| std::env::var(var).ok())
    }

    fn expand_env_vars_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String> + Copy,
    ) -> Result<(), ConfigError> {
        self.site.url = expand::expand_with(&self.site.url, "site.url", lookup)?;

        if let Some(ref mut edit) = self.edit {
            edit.repository_url =
                expand::expand_with(&edit.repository_url, "edit.repository_url", lookup)?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and apply defaults.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let path_style = parse_path_style(
            self.docs.path_style.as_deref(),
            self.docs.extension.as_deref(),
            "docs.path_style",
        )?
        .unwrap_or_default();

        let mut archived = BTreeMap::new();
        for (label, version) in &self.versions.archived {
            let style = parse_path_style(
                version.path_style.as_deref(),
                version.extension.as_deref(),
                &format!("versions.archived.\"{label}\".path_style"),
            )?
            .unwrap_or_else(|| path_style.clone());
            archived.insert(
                label.clone(),
                ArchivedVersion {
                    sidebars: config_dir.join(&version.sidebars),
                    path_style: style,
                },
            );
        }

        self.docs_resolved = DocsConfig {
            sidebars: resolve(self.docs.sidebars.as_deref(), "sidebars.yaml"),
            sidebar_id: self
                .docs
                .sidebar_id
                .clone()
                .unwrap_or_else(|| "docs".to_owned()),
            path_style,
        };

        self.versions_resolved = VersionsConfig {
            current: self
                .versions
                .current
                .clone()
                .unwrap_or_else(|| "current".to_owned()),
            archived,
        };

        self.edit_links = self.edit.as_ref().map(|edit| EditLinks {
            repository_url: edit.repository_url.clone(),
            branch: edit.branch.clone().unwrap_or_else(|| "main".to_owned()),
            docs_dir: edit.docs_dir.clone().unwrap_or_else(|| "docs".to_owned()),
            versioned_docs_dir: edit
                .versioned_docs_dir
                .clone()
                .unwrap_or_else(|| "versioned_docs".to_owned()),
        });

        self.output_dir = resolve(self.output.dir.as_deref(), "build");

        Ok(())
    }
}
