//! TrueType-backed text backend.
//!
//! Loads the configured title font once at startup and implements
//! [`TextBackend`] with rusttype: line widths are the sum of scaled advance
//! widths plus pair kerning, and drawing rasterizes positioned glyphs with
//! per-pixel alpha blending onto the RGBA canvas.
//!
//! A missing or unparseable font file is a construction-time error — a
//! misconfigured deployment fails before any cover is rendered.

use super::backend::TextBackend;
use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a parseable TrueType/OpenType font: {0}")]
    Parse(PathBuf),
}

/// The title font at a fixed pixel size.
#[derive(Debug)]
pub struct TitleFont {
    font: Font<'static>,
    size: f32,
}

impl TitleFont {
    /// Load a font file and fix its rendering size.
    pub fn load(path: &Path, size_px: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font =
            Font::try_from_vec(data).ok_or_else(|| FontError::Parse(path.to_path_buf()))?;
        Ok(Self {
            font,
            size: size_px as f32,
        })
    }

    fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }
}

impl TextBackend for TitleFont {
    fn line_width(&self, text: &str) -> f32 {
        let scale = self.scale();
        let mut width = 0.0;
        let mut last = None;
        for c in text.chars() {
            let glyph = self.font.glyph(c).scaled(scale);
            if let Some(prev) = last {
                width += self.font.pair_kerning(scale, prev, glyph.id());
            }
            width += glyph.h_metrics().advance_width;
            last = Some(glyph.id());
        }
        width
    }

    fn line_height(&self) -> f32 {
        self.size
    }

    fn draw_line(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, color: Rgba<u8>) {
        let scale = self.scale();
        let ascent = self.font.v_metrics(scale).ascent;
        let baseline = point(x as f32, y as f32 + ascent);

        for glyph in self.font.layout(text, scale, baseline) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }
                if coverage <= 0.0 {
                    return;
                }
                let dst = canvas.get_pixel_mut(px, py);
                let alpha = coverage.min(1.0);
                let inv = 1.0 - alpha;
                for i in 0..3 {
                    dst.0[i] = (color.0[i] as f32 * alpha + dst.0[i] as f32 * inv) as u8;
                }
                dst.0[3] = 255;
            });
        }
    }
}
