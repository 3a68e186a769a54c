//! # covergen
//!
//! Featured-image generator for blog posts. Given an article title and a
//! category, covergen produces a branded cover image: a category background
//! template with the title wrapped and overlaid, persisted as lossy WebP and
//! cached by content.
//!
//! # Architecture: One Pipeline, Content-Addressed
//!
//! ```text
//! title, category
//!   → slug            (normalized, length-bounded identifier)
//!   → cache key       (slug + digest fragment → {key}.webp)
//!   → cache hit?      (file exists → done, no re-render)
//!   → template        (category → blog-{name}.png, default fallback)
//!   → layout          (greedy wrap against real glyph widths)
//!   → composite       (draw lines, encode WebP)
//!   → persisted path  (atomic temp-then-rename write)
//! ```
//!
//! Each step is a pure function of its inputs plus fixed configuration, so
//! a cache file never goes stale — there is no time-based invalidation,
//! only content addressing. Re-running covergen over the same editorial
//! calendar is cheap and idempotent.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`slug`] | Title → URL slug: accent folding, stop words, priority terms, length budget |
//! | [`render`] | Text backend trait + font, layout, templates, compositor |
//! | [`cache`] | Content-addressed cover cache with atomic writes |
//! | [`config`] | Flat `covergen.toml` loading, validation, stock config |
//! | [`batch`] | Parallel rendering of request manifests via rayon |
//! | [`types`] | Shared serialized types (`CoverRequest`, `CoverRecord`) |
//! | [`output`] | CLI output formatting — pure `format_*` + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Real Font Metrics
//!
//! Line-wrap points are decided by measured advance widths (plus kerning)
//! of the configured TrueType font, not a per-character estimate. A
//! monospace approximation produces different wrap points and therefore
//! different covers. The measurement lives behind the
//! [`render::TextBackend`] trait so layout logic is unit-testable with a
//! deterministic variable-width mock.
//!
//! ## No Index File
//!
//! The cache directory is the cache: one flat directory of `{key}.webp`
//! files, where existence on disk is the only source of truth for "already
//! rendered". Keys embed a digest fragment over `(title, category)`, so
//! distinct titles that reduce to the same slug never share a file.
//!
//! ## Fail Fast on Assets
//!
//! The font and the default template are loaded at startup and their
//! absence aborts initialization. A misconfigured deployment is caught
//! before the first title is processed, not midway through a batch.
//!
//! ## Explicit Ordering Everywhere
//!
//! Slug phrase rewrites are an ordered longest-first table; template
//! partial matching walks entries sorted by name. Nothing depends on map
//! iteration order or directory order, so the same inputs give the same
//! outputs on every machine.

pub mod batch;
pub mod cache;
pub mod config;
pub mod output;
pub mod render;
pub mod slug;
pub mod types;
