//! Document references and path construction.
//!
//! A [`DocumentReference`] is the fully-qualified path the site generator uses
//! to address one page, e.g. `/getting-started/installation`. References are
//! built from a section prefix and a page slug with [`build_path`]; a whole
//! section is expanded at once with [`expand_section`].

use std::fmt;

use serde::Serialize;

use crate::NavError;

/// Fully-qualified identifier of one documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentReference(String);

impl DocumentReference {
    /// Path string, always starting with `/`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Site-relative id without the leading `/`, as Docusaurus addresses docs.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        self.0.strip_prefix('/').unwrap_or(&self.0)
    }

    /// Split back into `(section_prefix, slug)`, undoing [`build_path`].
    ///
    /// Returns `None` if the reference does not carry the suffix `style`
    /// would have produced.
    #[must_use]
    pub fn split(&self, style: &PathStyle) -> Option<(&str, &str)> {
        let path = self.0.strip_prefix('/')?;
        let path = match style {
            PathStyle::Implicit => path,
            PathStyle::Explicit { extension } => path
                .strip_suffix(extension.as_str())
                .and_then(|p| p.strip_suffix('.'))?,
        };
        path.rsplit_once('/')
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How the site generator addresses document files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PathStyle {
    /// Generator resolves extensions itself: `/{section}/{slug}`.
    #[default]
    Implicit,
    /// Generator needs the source extension: `/{section}/{slug}.{extension}`.
    Explicit {
        /// File extension without the leading dot (e.g. `md`).
        extension: String,
    },
}

impl PathStyle {
    /// Explicit style with the given extension.
    #[must_use]
    pub fn explicit(extension: impl Into<String>) -> Self {
        Self::Explicit {
            extension: extension.into(),
        }
    }

    /// Check that references built with this style stay well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidInput`] if an explicit extension is empty,
    /// starts with a dot, or is not a single safe path segment.
    pub fn validate(&self) -> Result<(), NavError> {
        let Self::Explicit { extension } = self else {
            return Ok(());
        };
        if extension.is_empty() {
            return Err(NavError::invalid(extension, "extension is empty"));
        }
        if extension.starts_with('.') {
            return Err(NavError::invalid(extension, "extension starts with a dot"));
        }
        if extension.contains('/') {
            return Err(NavError::invalid(
                extension,
                "extension must be a single path segment",
            ));
        }
        validate_segment(extension, extension)
    }
}

/// Build the reference for page `slug` within section `section_prefix`.
///
/// `section_prefix` may span several segments (`features/support`), `slug`
/// must be exactly one.
///
/// # Errors
///
/// Returns [`NavError::InvalidInput`] if either argument is empty, contains an
/// empty, `.` or `..` segment, or contains a backslash, or if `style` carries
/// a malformed extension (see [`PathStyle::validate`]).
pub fn build_path(
    section_prefix: &str,
    slug: &str,
    style: &PathStyle,
) -> Result<DocumentReference, NavError> {
    validate_section(section_prefix)?;
    validate_slug(slug)?;
    style.validate()?;

    let path = match style {
        PathStyle::Implicit => format!("/{section_prefix}/{slug}"),
        PathStyle::Explicit { extension } => format!("/{section_prefix}/{slug}.{extension}"),
    };
    Ok(DocumentReference(path))
}

/// Build references for every slug in `slugs`, preserving order.
///
/// Duplicate slugs yield duplicate references.
///
/// # Errors
///
/// Returns the first [`NavError::InvalidInput`] produced by [`build_path`].
pub fn expand_section<S: AsRef<str>>(
    section_prefix: &str,
    slugs: &[S],
    style: &PathStyle,
) -> Result<Vec<DocumentReference>, NavError> {
    slugs
        .iter()
        .map(|slug| build_path(section_prefix, slug.as_ref(), style))
        .collect()
}

fn validate_section(section_prefix: &str) -> Result<(), NavError> {
    if section_prefix.is_empty() {
        return Err(NavError::invalid(section_prefix, "section prefix is empty"));
    }
    section_prefix
        .split('/')
        .try_for_each(|segment| validate_segment(section_prefix, segment))
}

fn validate_slug(slug: &str) -> Result<(), NavError> {
    if slug.is_empty() {
        return Err(NavError::invalid(slug, "slug is empty"));
    }
    if slug.contains('/') {
        return Err(NavError::invalid(slug, "slug must be a single path segment"));
    }
    validate_segment(slug, slug)
}

fn validate_segment(value: &str, segment: &str) -> Result<(), NavError> {
    if segment.is_empty() {
        return Err(NavError::invalid(value, "empty path segment"));
    }
    if segment == "." || segment == ".." {
        return Err(NavError::invalid(value, "path traversal segment"));
    }
    if segment.contains('\\') {
        return Err(NavError::invalid(value, "backslash in path"));
    }
    if segment.trim().is_empty() {
        return Err(NavError::invalid(value, "whitespace-only path segment"));
    }
    Ok(())
}
