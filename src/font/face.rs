//! TrueType/OpenType face
//!
//! Glyph selection and advances come from rustybuzz shaping, ink extents
//! and outlines from the re-exported `ttf_parser`, coverage masks from
//! fontdue. All three read the same font bytes, parsed once when the face
//! is loaded.

use crate::error::FontError;
use crate::font::outline::OutlineSink;
use crate::font::{GlyphBitmap, GlyphMetrics, GlyphSource};
use fontdue::{Font, FontSettings};
use log::debug;
use rustybuzz::ttf_parser::{self, GlyphId};
use std::fmt;
use std::sync::Arc;

/// Parsed font face
pub struct FontFace {
    /// Font bytes, leaked once per loaded face (shaping face borrows them)
    data: &'static [u8],
    /// Shaping face
    shaper: rustybuzz::Face<'static>,
    /// Rasterizer
    raster: Font,
    /// Font units per em (design coordinate space)
    units_per_em: f32,
}

/// One shaped character
struct Shaped {
    glyph: GlyphId,
    /// Advance in design units
    advance: i32,
}

impl FontFace {
    /// Parse a face from TTF/OTF bytes.
    ///
    /// Bytes are only leaked (`Box::leak`) once they are known to be a font,
    /// so rejected input is freed.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let units_per_em = rustybuzz::Face::from_slice(&data, 0)
            .ok_or_else(|| FontError::Parse("not a TrueType/OpenType font".to_string()))?
            .units_per_em() as f32;
        if units_per_em <= 0.0 {
            return Err(FontError::Parse("units per em is zero".to_string()));
        }

        let raster = Font::from_bytes(&data[..], FontSettings::default())
            .map_err(|e| FontError::Parse(e.to_string()))?;

        let data: &'static [u8] = Box::leak(data.into_boxed_slice());
        let shaper = rustybuzz::Face::from_slice(data, 0)
            .ok_or_else(|| FontError::Parse("not a TrueType/OpenType font".to_string()))?;

        debug!(
            "Font face loaded ({} bytes, {} units/em)",
            data.len(),
            units_per_em
        );

        Ok(Self {
            data,
            shaper,
            raster,
            units_per_em,
        })
    }

    /// Parse into a shareable [`GlyphSource`] (cache parser)
    pub fn parse_shared(data: Vec<u8>) -> Result<Arc<dyn GlyphSource>, FontError> {
        Ok(Arc::new(Self::from_bytes(data)?))
    }

    /// Font bytes this face was parsed from
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Scale factor from design units to pixels at `size`
    fn scale(&self, size: f32) -> f32 {
        size / self.units_per_em
    }

    /// Select the glyph for one character.
    /// Missing characters shape to glyph 0 (notdef) with its own advance.
    fn shape(face: &rustybuzz::Face<'_>, ch: char) -> Shaped {
        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.add(ch, 0);
        let glyphs = rustybuzz::shape(face, &[], buffer);

        match glyphs.glyph_infos().first() {
            Some(info) => Shaped {
                glyph: GlyphId(info.glyph_id as u16),
                // Decomposed characters advance by the whole cluster
                advance: glyphs.glyph_positions().iter().map(|p| p.x_advance).sum(),
            },
            None => Shaped {
                glyph: GlyphId(0),
                advance: face.glyph_hor_advance(GlyphId(0)).map(i32::from).unwrap_or(0),
            },
        }
    }
}

impl GlyphSource for FontFace {
    fn metrics(&self, ch: char, size: f32) -> GlyphMetrics {
        if size <= 0.0 {
            return GlyphMetrics::default();
        }
        let face = &self.shaper;

        let scale = self.scale(size);
        let shaped = Self::shape(face, ch);

        // True bounding box, not typographic ascender/descender
        let (ink_ascent, ink_descent) = match face.glyph_bounding_box(shaped.glyph) {
            Some(bb) => (
                (bb.y_max as f32 * scale).max(0.0),
                (-(bb.y_min as f32) * scale).max(0.0),
            ),
            None => (0.0, 0.0),
        };

        GlyphMetrics {
            advance: (shaped.advance as f32 * scale).max(0.0),
            ink_ascent,
            ink_descent,
        }
    }

    fn outline(&self, ch: char, x: f32, y: f32, size: f32, sink: &mut dyn OutlineSink) -> bool {
        if size <= 0.0 {
            return false;
        }

        let glyph = Self::shape(&self.shaper, ch).glyph;
        let mut adapter = OutlineAdapter {
            sink,
            scale: self.scale(size),
            x,
            y,
        };
        self.shaper.outline_glyph(glyph, &mut adapter).is_some()
    }

    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap {
        if size <= 0.0 {
            return GlyphBitmap::default();
        }

        // Same glyph as metrics/outline so all surfaces agree
        let glyph = Self::shape(&self.shaper, ch).glyph;
        let (metrics, coverage) = self.raster.rasterize_indexed(glyph.0, size);

        GlyphBitmap {
            left: metrics.xmin,
            top: metrics.ymin + metrics.height as i32,
            width: metrics.width,
            height: metrics.height,
            coverage,
        }
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("units_per_em", &self.units_per_em)
            .field("bytes_len", &self.data.len())
            .finish()
    }
}

/// Adapter from [`OutlineSink`] to `ttf_parser::OutlineBuilder`:
/// scales design units, translates to the pen position, flips Y.
struct OutlineAdapter<'a> {
    sink: &'a mut dyn OutlineSink,
    scale: f32,
    x: f32,
    y: f32,
}

impl OutlineAdapter<'_> {
    #[inline]
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y - y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for OutlineAdapter<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.sink.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.sink.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.sink.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.sink.curve_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.sink.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_font_bytes() {
        let err = FontFace::from_bytes(vec![0u8; 256]).unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_bytes() {
        assert!(FontFace::from_bytes(Vec::new()).is_err());
    }
}
