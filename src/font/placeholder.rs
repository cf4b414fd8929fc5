//! Placeholder face
//!
//! Block glyphs used when the requested family/weight cannot be resolved,
//! so a document still lays out and renders instead of failing. Boxes
//! follow coarse letter classes (capital height, x-height, descenders) to
//! keep the vertical rhythm of the real text roughly intact.

use crate::font::outline::OutlineSink;
use crate::font::{GlyphBitmap, GlyphMetrics, GlyphSource};

/// Advance width relative to size
const ADVANCE: f32 = 0.6;
/// Ink box left edge relative to size
const INK_LEFT: f32 = 0.05;
/// Ink box right edge relative to size
const INK_RIGHT: f32 = 0.55;
/// Capital / ascender height relative to size
const CAP_HEIGHT: f32 = 0.7;
/// Lowercase height relative to size
const X_HEIGHT: f32 = 0.5;
/// Descender depth relative to size
const DESCENDER: f32 = 0.2;

/// Face drawing one filled box per character
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderFace;

/// Ink box in font-relative units: (ascent, descent), or None for no ink
fn ink_box(ch: char) -> Option<(f32, f32)> {
    if ch.is_whitespace() || ch.is_control() {
        return None;
    }
    let ink = match ch {
        'g' | 'j' | 'p' | 'q' | 'y' => (X_HEIGHT, DESCENDER),
        'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' | 'i' => (CAP_HEIGHT, 0.0),
        c if c.is_lowercase() => (X_HEIGHT, 0.0),
        _ => (CAP_HEIGHT, 0.0),
    };
    Some(ink)
}

/// Overlap length of [a0, a1] and [b0, b1]
#[inline]
fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

impl GlyphSource for PlaceholderFace {
    fn metrics(&self, ch: char, size: f32) -> GlyphMetrics {
        let size = size.max(0.0);
        let (ascent, descent) = ink_box(ch).unwrap_or((0.0, 0.0));
        GlyphMetrics {
            advance: ADVANCE * size,
            ink_ascent: ascent * size,
            ink_descent: descent * size,
        }
    }

    fn outline(&self, ch: char, x: f32, y: f32, size: f32, sink: &mut dyn OutlineSink) -> bool {
        let Some((ascent, descent)) = ink_box(ch) else {
            return false;
        };
        if size <= 0.0 {
            return false;
        }

        let x0 = x + INK_LEFT * size;
        let x1 = x + INK_RIGHT * size;
        let top = y - ascent * size;
        let bottom = y + descent * size;

        sink.move_to(x0, top);
        sink.line_to(x1, top);
        sink.line_to(x1, bottom);
        sink.line_to(x0, bottom);
        sink.close();
        true
    }

    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap {
        let Some((ascent, descent)) = ink_box(ch) else {
            return GlyphBitmap::default();
        };
        if size <= 0.0 {
            return GlyphBitmap::default();
        }

        // Ink box relative to the pen position, Y down
        let x0 = INK_LEFT * size;
        let x1 = INK_RIGHT * size;
        let y0 = -ascent * size;
        let y1 = descent * size;

        let left = x0.floor() as i32;
        let right = x1.ceil() as i32;
        let first_row = y0.floor() as i32;
        let last_row = y1.ceil() as i32;

        let width = (right - left).max(0) as usize;
        let height = (last_row - first_row).max(0) as usize;
        let mut coverage = vec![0u8; width * height];

        // Area coverage per pixel
        for row in 0..height {
            let py = (first_row + row as i32) as f32;
            let oy = overlap(py, py + 1.0, y0, y1);
            for col in 0..width {
                let px = (left + col as i32) as f32;
                let ox = overlap(px, px + 1.0, x0, x1);
                coverage[row * width + col] = (ox * oy * 255.0).round().min(255.0) as u8;
            }
        }

        GlyphBitmap {
            left,
            top: -first_row,
            width,
            height,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ink_extents_follow_letter_class() {
        let face = PlaceholderFace;
        let cap = face.metrics('A', 100.0);
        let lower = face.metrics('a', 100.0);
        let desc = face.metrics('y', 100.0);

        assert!((cap.ink_ascent - 70.0).abs() < 1e-4);
        assert!((lower.ink_ascent - 50.0).abs() < 1e-4);
        assert!((desc.ink_descent - 20.0).abs() < 1e-4);
        assert_eq!(cap.advance, lower.advance);
    }

    #[test]
    fn test_space_has_advance_but_no_ink() {
        let face = PlaceholderFace;
        let m = face.metrics(' ', 50.0);
        assert!(m.advance > 0.0);
        assert_eq!(m.ink_ascent, 0.0);
        assert!(face.rasterize(' ', 50.0).is_empty());
    }

    #[test]
    fn test_rasterize_covers_ink_box() {
        let bitmap = PlaceholderFace.rasterize('H', 20.0);
        // Ink x: 1.0..11.0, y: -14.0..0.0
        assert_eq!(bitmap.left, 1);
        assert_eq!(bitmap.top, 14);
        assert_eq!(bitmap.width, 10);
        assert_eq!(bitmap.height, 14);
        assert!(bitmap.coverage.iter().all(|&c| c == 255));
    }
}
