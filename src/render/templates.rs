//! Category-to-template resolution.
//!
//! Background templates live in one flat directory as `blog-{name}.png`
//! files, with `blog-default.png` as the fallback. The library is loaded
//! once at startup and is immutable afterward.
//!
//! Resolution order for a category:
//!
//! 1. Normalize (lowercase, fold accents, spaces → hyphens) and look for an
//!    exact name match.
//! 2. Partial match: the first known name that contains the input, or that
//!    the input contains. Entries are sorted by name at load time so the
//!    "first" match is deterministic, not directory-order dependent.
//! 3. The default template.
//!
//! The category set is open-ended, so matching is an ordered list of
//! `(name, path)` pairs plus a default rather than a closed enum.

use crate::slug::normalize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Filename prefix for category template assets.
const TEMPLATE_PREFIX: &str = "blog-";
/// Template asset extension.
const TEMPLATE_EXT: &str = "png";
/// Filename of the fallback template.
const DEFAULT_TEMPLATE: &str = "blog-default.png";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("IO error while scanning templates: {0}")]
    Io(#[from] std::io::Error),
    #[error("default template missing: {0}")]
    DefaultMissing(PathBuf),
}

/// One category template: normalized name plus asset path.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TemplateEntry {
    name: String,
    path: PathBuf,
}

/// The set of category templates found in the templates directory.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    entries: Vec<TemplateEntry>,
    default_path: PathBuf,
}

impl TemplateLibrary {
    /// Scan `dir` for `blog-{name}.png` assets.
    ///
    /// Fails when the default template is absent — that is the one
    /// unrecoverable condition for resolution, and catching it at startup
    /// beats discovering it on the first render.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let default_path = dir.join(DEFAULT_TEMPLATE);
        if !default_path.exists() {
            return Err(TemplateError::DefaultMissing(default_path));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                TemplateError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("walkdir error without io cause")
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = template_name(entry.file_name().to_str().unwrap_or("")) else {
                continue;
            };
            if name == "default" {
                continue;
            }
            entries.push(TemplateEntry {
                name,
                path: entry.path().to_path_buf(),
            });
        }
        // Sorted so partial matching is deterministic across filesystems.
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            entries,
            default_path,
        })
    }

    /// Resolve a category to a template asset path.
    ///
    /// Never fails: an unknown category falls back to the default template,
    /// whose presence was checked at load time.
    pub fn resolve(&self, category: &str) -> &Path {
        let wanted = normalize_category(category);
        if wanted.is_empty() {
            return &self.default_path;
        }

        if let Some(entry) = self.entries.iter().find(|e| e.name == wanted) {
            return &entry.path;
        }
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.name.contains(&wanted) || wanted.contains(&e.name))
        {
            return &entry.path;
        }
        &self.default_path
    }

    /// Number of category templates (excluding the default).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known category names, sorted.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// Extract the category name from a template filename.
/// `"blog-marketing-digital.png"` → `Some("marketing-digital")`.
fn template_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(&format!(".{TEMPLATE_EXT}"))?;
    let name = stem.strip_prefix(TEMPLATE_PREFIX)?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Normalize a category label the way template names are normalized:
/// lowercase, accents folded, whitespace runs become single hyphens.
fn normalize_category(category: &str) -> String {
    normalize(category)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
