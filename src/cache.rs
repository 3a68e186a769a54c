//! Content-addressed cover cache.
//!
//! Rendering a cover is the expensive step of the pipeline, and articles
//! are re-published far more often than their titles change. This module
//! keys rendered covers by their input content so repeated requests for
//! the same `(title, category)` are a file-existence check, not a render.
//!
//! # Design
//!
//! The cache is **content-addressed**: the key is derived from the title's
//! slug plus a SHA-256 fragment over `(title, category)`, never from
//! timestamps. There is no index file and no database — the existence of
//! `{key}.webp` in the cache directory is the only source of truth for
//! "already rendered".
//!
//! ## Cache keys
//!
//! - Normal case: `{slug}-{h8}` where `h8` is the first 8 hex digits of
//!   SHA-256 over `title \0 category`. Two distinct titles that reduce to
//!   the same slug therefore get distinct files instead of silently sharing
//!   one.
//! - Degenerate case: a title made of stop words produces an empty slug;
//!   the key is then the first 16 hex digits of the same digest. This is
//!   handled here and never surfaced as an error.
//!
//! ## Writes
//!
//! Files are written to a temp name in the cache directory and atomically
//! renamed into place, so a reader can never observe a partially written
//! cover and a failed render never leaves a file at the final path. A file
//! that exists is never rewritten by [`CoverCache::get_or_create`];
//! concurrent first-writes for one key are benign last-writer-wins because
//! rendering is a pure function of its inputs.

use crate::render::{Compositor, RenderError, TextBackend};
use crate::slug::generate_slug;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of persisted cover files.
const COVER_EXT: &str = "webp";

/// Hex digits of the content digest appended to a non-empty slug.
const KEY_SUFFIX_LEN: usize = 8;

/// Hex digits used alone when the slug is empty.
const KEY_FALLBACK_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

/// Filename stem of a cached cover, derived from `(title, category)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a `(title, category)` pair.
    ///
    /// Deterministic and collision-resistant: the slug keeps filenames
    /// readable, the digest fragment keeps distinct inputs distinct.
    pub fn derive(title: &str, category: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(title.as_bytes());
        hasher.update(b"\0");
        hasher.update(category.as_bytes());
        let digest = format!("{:x}", hasher.finalize());

        let slug = generate_slug(title);
        if slug.is_empty() {
            Self(digest[..KEY_FALLBACK_LEN].to_string())
        } else {
            Self(format!("{}-{}", slug, &digest[..KEY_SUFFIX_LEN]))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache filename for this key.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, COVER_EXT)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persisted cover cache over a compositor and a text backend.
pub struct CoverCache<B: TextBackend> {
    dir: PathBuf,
    compositor: Compositor,
    backend: B,
}

impl<B: TextBackend> CoverCache<B> {
    /// Open (creating if needed) the cache directory.
    pub fn new(dir: &Path, compositor: Compositor, backend: B) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            compositor,
            backend,
        })
    }

    /// The path a `(title, category)` pair maps to, rendered or not.
    pub fn path_for(&self, title: &str, category: &str) -> PathBuf {
        self.dir.join(CacheKey::derive(title, category).file_name())
    }

    /// Whether a cover for this pair is already on disk.
    pub fn contains(&self, title: &str, category: &str) -> bool {
        self.path_for(title, category).exists()
    }

    /// Return the cover path for `(title, category)`, rendering it first if
    /// it is not cached yet.
    ///
    /// An existing file is returned untouched — no re-render, no
    /// modification-time check.
    pub fn get_or_create(&self, title: &str, category: &str) -> Result<PathBuf, CacheError> {
        let path = self.path_for(title, category);
        if path.exists() {
            return Ok(path);
        }
        let bytes = self.compositor.render(&self.backend, title, category)?;
        write_atomic(&path, &bytes)?;
        Ok(path)
    }

    /// Re-render unconditionally and atomically replace any cached file.
    /// Backs the CLI `--no-cache` flag.
    pub fn refresh(&self, title: &str, category: &str) -> Result<PathBuf, CacheError> {
        let path = self.path_for(title, category);
        let bytes = self.compositor.render(&self.backend, title, category)?;
        write_atomic(&path, &bytes)?;
        Ok(path)
    }
}

/// Write bytes to a sibling temp file, then rename into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("cover");
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));
    std::fs::write(&tmp, bytes)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// Summary of cache performance for a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub rendered: u32,
    pub failed: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn render(&mut self) {
        self.rendered += 1;
    }

    pub fn fail(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.rendered + self.failed
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} rendered ({} total)",
                self.hits,
                self.rendered,
                self.total()
            )?;
        } else {
            write!(f, "{} rendered", self.rendered)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}
