//! Text measurement and drawing backend trait.
//!
//! The [`TextBackend`] trait defines the three operations the layout engine
//! and compositor need from a font: measure a line, report the line height,
//! and draw a line onto a canvas.
//!
//! The production implementation is
//! [`TitleFont`](super::font::TitleFont) — a TrueType font rasterized with
//! real advance-width metrics. Wrap points depend on actual glyph widths,
//! so everything downstream is written against the trait and unit tests use
//! a deterministic variable-width mock instead of a monospace estimate.

use image::{Rgba, RgbaImage};

/// Trait for text measurement and drawing backends.
///
/// Every backend must implement all three operations so layout and
/// compositing stay font-library-agnostic.
pub trait TextBackend: Sync {
    /// Rendered pixel width of `text` as a single line.
    fn line_width(&self, text: &str) -> f32;

    /// Nominal height of one line (the font pixel size).
    fn line_height(&self) -> f32;

    /// Draw `text` onto `canvas` with its top-left corner at `(x, y)`.
    /// Glyphs falling outside the canvas are clipped.
    fn draw_line(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, color: Rgba<u8>);
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// A drawing operation recorded by [`MockTextBackend`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct DrawnLine {
        pub text: String,
        pub x: i32,
        pub y: i32,
    }

    /// Mock backend with deliberately non-uniform glyph widths.
    ///
    /// Narrow letters measure 4px, wide letters 12px, everything else 8px,
    /// spaces 5px. Records draw calls instead of touching pixels. Uses
    /// Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockTextBackend {
        pub drawn: Mutex<Vec<DrawnLine>>,
    }

    impl MockTextBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn drawn_lines(&self) -> Vec<DrawnLine> {
            self.drawn.lock().unwrap().clone()
        }

        fn char_width(c: char) -> f32 {
            match c {
                ' ' => 5.0,
                'i' | 'j' | 'l' | 't' | 'f' | '.' | ',' | '-' => 4.0,
                'm' | 'w' => 12.0,
                _ => 8.0,
            }
        }
    }

    impl TextBackend for MockTextBackend {
        fn line_width(&self, text: &str) -> f32 {
            text.chars().map(Self::char_width).sum()
        }

        fn line_height(&self) -> f32 {
            16.0
        }

        fn draw_line(
            &self,
            _canvas: &mut RgbaImage,
            text: &str,
            x: i32,
            y: i32,
            _color: Rgba<u8>,
        ) {
            self.drawn.lock().unwrap().push(DrawnLine {
                text: text.to_string(),
                x,
                y,
            });
        }
    }

    #[test]
    fn mock_widths_are_not_monospace() {
        let backend = MockTextBackend::new();
        assert!(backend.line_width("iii") < backend.line_width("mmm"));
        assert_eq!(backend.line_width("abc"), 24.0);
    }

    #[test]
    fn mock_records_draws() {
        let backend = MockTextBackend::new();
        let mut canvas = RgbaImage::new(10, 10);
        backend.draw_line(&mut canvas, "hello", 3, 7, Rgba([255, 255, 255, 255]));

        let drawn = backend.drawn_lines();
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].text, "hello");
        assert_eq!((drawn[0].x, drawn[0].y), (3, 7));
    }
}
