//! Cover compositing: template + wrapped title → encoded WebP bytes.
//!
//! The compositor owns the immutable render inputs (template library,
//! geometry, quality) and produces bytes only — persistence belongs to the
//! cover cache. Rendering is a pure function of `(title, category)` plus
//! that fixed configuration, which is what makes concurrent duplicate
//! renders benign.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Template decode | `image::open` |
//! | Canvas resize | `image::imageops` Lanczos3 |
//! | Title wrap | [`wrap_title`] over the text backend |
//! | Glyph drawing | [`TextBackend::draw_line`] |
//! | Encode → WebP | `webp::Encoder` (lossy, fixed quality) |

use super::backend::TextBackend;
use super::layout::wrap_title;
use super::params::{Geometry, Quality};
use super::templates::TemplateLibrary;
use image::Rgba;
use image::RgbaImage;
use image::imageops::FilterType;
use std::path::PathBuf;
use thiserror::Error;

/// Title text color. Fixed by design: templates are authored with a dark
/// title region.
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template asset no longer on disk: {0}")]
    TemplateMissing(PathBuf),
    #[error("failed to decode template {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("WebP encode failed: {0}")]
    Encode(String),
}

/// Renders covers from a fixed template library, geometry, and quality.
pub struct Compositor {
    templates: TemplateLibrary,
    geometry: Geometry,
    quality: Quality,
}

impl Compositor {
    pub fn new(templates: TemplateLibrary, geometry: Geometry, quality: Quality) -> Self {
        Self {
            templates,
            geometry,
            quality,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    /// Render the cover for `(title, category)` and return WebP bytes.
    ///
    /// The template resolved for `category` is loaded, resized to the
    /// configured canvas when its dimensions differ, overlaid with the
    /// wrapped title, and encoded. Failures surface to the caller; nothing
    /// is written to disk here.
    pub fn render(
        &self,
        backend: &impl TextBackend,
        title: &str,
        category: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let template_path = self.templates.resolve(category);
        if !template_path.exists() {
            return Err(RenderError::TemplateMissing(template_path.to_path_buf()));
        }

        let template = image::open(template_path).map_err(|e| RenderError::Decode {
            path: template_path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (w, h) = (self.geometry.canvas_width, self.geometry.canvas_height);
        let template = if template.width() != w || template.height() != h {
            template.resize_exact(w, h, FilterType::Lanczos3)
        } else {
            template
        };
        let mut canvas = template.to_rgba8();

        let wrapped = wrap_title(
            title,
            backend,
            self.geometry.text_max_width_px as f32,
            self.geometry.max_lines,
        );
        let advance = backend.line_height() + self.geometry.line_spacing_px as f32;
        for (i, line) in wrapped.lines.iter().enumerate() {
            let y = self.geometry.text_position_y as f32 + i as f32 * advance;
            backend.draw_line(
                &mut canvas,
                line,
                self.geometry.text_position_x as i32,
                y.round() as i32,
                TEXT_COLOR,
            );
        }

        encode_webp(&canvas, self.quality)
    }
}

/// Encode an RGBA canvas as lossy WebP at the given quality.
fn encode_webp(canvas: &RgbaImage, quality: Quality) -> Result<Vec<u8>, RenderError> {
    let (w, h) = canvas.dimensions();
    let encoder = webp::Encoder::from_rgba(canvas.as_raw(), w, h);
    let memory = encoder
        .encode_simple(false, quality.value() as f32)
        .map_err(|e| RenderError::Encode(format!("{e:?}")))?;
    Ok(memory.to_vec())
}
