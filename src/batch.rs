//! Batch rendering of cover manifests.
//!
//! Takes a JSON array of [`CoverRequest`]s, renders each through the cover
//! cache in parallel, and produces an output manifest of [`CoverRecord`]s
//! plus cache statistics. A failing request is reported and skipped; it
//! never aborts the rest of the batch, since every render is independent.
//!
//! Progress events stream through an optional channel so the CLI can print
//! while workers are busy, the same way long-running stages report
//! per-item status.

use crate::cache::{CacheStats, CoverCache};
use crate::render::TextBackend;
use crate::types::{CoverRecord, CoverRequest};
use rayon::prelude::*;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-request progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// The cover was already on disk.
    Cached { title: String, path: String },
    /// The cover was rendered and persisted.
    Rendered { title: String, path: String },
    /// The request failed; the batch continues.
    Failed { title: String, error: String },
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchResult {
    /// Successful covers, in request order.
    pub records: Vec<CoverRecord>,
    pub stats: CacheStats,
}

/// Read a batch manifest: a JSON array of `{title, category?}` objects.
pub fn load_requests(path: &Path) -> Result<Vec<CoverRequest>, BatchError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write the output manifest of rendered covers.
pub fn write_manifest(path: &Path, records: &[CoverRecord]) -> Result<(), BatchError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Render all requests through the cache, in parallel.
///
/// With `force`, every request re-renders and replaces its cached file
/// (the `--no-cache` path); otherwise existing covers count as hits.
pub fn run_batch<B: TextBackend>(
    cache: &CoverCache<B>,
    requests: &[CoverRequest],
    force: bool,
    events: Option<Sender<BatchEvent>>,
) -> BatchResult {
    let outcomes: Vec<Result<CoverRecord, (String, String)>> = requests
        .par_iter()
        .map_with(events, |tx, req| {
            let was_cached = !force && cache.contains(&req.title, &req.category);
            let result = if force {
                cache.refresh(&req.title, &req.category)
            } else {
                cache.get_or_create(&req.title, &req.category)
            };
            match result {
                Ok(path) => {
                    let path = path.display().to_string();
                    if let Some(tx) = tx {
                        let event = if was_cached {
                            BatchEvent::Cached {
                                title: req.title.clone(),
                                path: path.clone(),
                            }
                        } else {
                            BatchEvent::Rendered {
                                title: req.title.clone(),
                                path: path.clone(),
                            }
                        };
                        let _ = tx.send(event);
                    }
                    Ok(CoverRecord {
                        title: req.title.clone(),
                        category: req.category.clone(),
                        path,
                        cached: was_cached,
                    })
                }
                Err(e) => {
                    let error = e.to_string();
                    if let Some(tx) = tx {
                        let _ = tx.send(BatchEvent::Failed {
                            title: req.title.clone(),
                            error: error.clone(),
                        });
                    }
                    Err((req.title.clone(), error))
                }
            }
        })
        .collect();

    let mut stats = CacheStats::default();
    let mut records = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(record) => {
                if record.cached {
                    stats.hit();
                } else {
                    stats.render();
                }
                records.push(record);
            }
            Err(_) => stats.fail(),
        }
    }

    BatchResult { records, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::tests::MockTextBackend;
    use crate::render::{Compositor, Geometry, Quality, TemplateLibrary};
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn test_cache(tmp: &TempDir) -> CoverCache<MockTextBackend> {
        let templates_dir = tmp.path().join("templates");
        fs::create_dir_all(&templates_dir).unwrap();
        let png = RgbaImage::from_pixel(100, 60, Rgba([30, 30, 30, 255]));
        png.save(templates_dir.join("blog-default.png")).unwrap();
        fs::write(templates_dir.join("blog-corrompido.png"), b"junk").unwrap();

        let geometry = Geometry {
            canvas_width: 100,
            canvas_height: 60,
            text_max_width_px: 80,
            text_position_x: 10,
            text_position_y: 15,
            max_lines: 2,
            line_spacing_px: 4,
        };
        let library = TemplateLibrary::load(&templates_dir).unwrap();
        let compositor = Compositor::new(library, geometry, Quality::new(75));
        CoverCache::new(
            &tmp.path().join("covers"),
            compositor,
            MockTextBackend::new(),
        )
        .unwrap()
    }

    fn requests(pairs: &[(&str, &str)]) -> Vec<CoverRequest> {
        pairs
            .iter()
            .map(|(title, category)| CoverRequest {
                title: (*title).to_string(),
                category: (*category).to_string(),
            })
            .collect()
    }

    #[test]
    fn fresh_batch_renders_everything() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let reqs = requests(&[("Guia de Marketing", "geral"), ("Guia de SEO", "geral")]);

        let result = run_batch(&cache, &reqs, false, None);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.stats.rendered, 2);
        assert_eq!(result.stats.hits, 0);
        assert!(result.records.iter().all(|r| !r.cached));
    }

    #[test]
    fn second_batch_hits_the_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let reqs = requests(&[("Guia de Marketing", "geral"), ("Guia de SEO", "geral")]);

        run_batch(&cache, &reqs, false, None);
        let result = run_batch(&cache, &reqs, false, None);
        assert_eq!(result.stats.hits, 2);
        assert_eq!(result.stats.rendered, 0);
        assert!(result.records.iter().all(|r| r.cached));
    }

    #[test]
    fn force_rerenders_cached_covers() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let reqs = requests(&[("Guia de Marketing", "geral")]);

        run_batch(&cache, &reqs, false, None);
        let result = run_batch(&cache, &reqs, true, None);
        assert_eq!(result.stats.rendered, 1);
        assert_eq!(result.stats.hits, 0);
    }

    #[test]
    fn failure_is_counted_and_skipped() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let reqs = requests(&[
            ("Guia de Marketing", "geral"),
            ("Titulo Perdido", "corrompido"),
        ]);

        let result = run_batch(&cache, &reqs, false, None);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.stats.rendered, 1);
        assert_eq!(result.stats.failed, 1);
    }

    #[test]
    fn events_stream_per_request() {
        let tmp = TempDir::new().unwrap();
        let cache = test_cache(&tmp);
        let reqs = requests(&[
            ("Guia de Marketing", "geral"),
            ("Titulo Perdido", "corrompido"),
        ]);

        let (tx, rx) = mpsc::channel();
        run_batch(&cache, &reqs, false, Some(tx));
        let events: Vec<BatchEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, BatchEvent::Rendered { title, .. } if title == "Guia de Marketing"))
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, BatchEvent::Failed { title, .. } if title == "Titulo Perdido"))
        );
    }

    #[test]
    fn manifest_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("requests.json");
        fs::write(
            &manifest,
            r#"[{"title": "Guia de SEO", "category": "seo"}, {"title": "Sem Categoria"}]"#,
        )
        .unwrap();

        let reqs = load_requests(&manifest).unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[1].category, "geral");

        let records = vec![CoverRecord {
            title: "Guia de SEO".into(),
            category: "seo".into(),
            path: "covers/guia-seo.webp".into(),
            cached: false,
        }];
        let out = tmp.path().join("covers-manifest.json");
        write_manifest(&out, &records).unwrap();
        let parsed: Vec<CoverRecord> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn malformed_manifest_is_a_json_error() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("requests.json");
        fs::write(&manifest, "{not json").unwrap();
        assert!(matches!(
            load_requests(&manifest),
            Err(BatchError::Json(_))
        ));
    }
}
