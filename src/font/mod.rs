//! Font loading and glyph metrics
//!
//! Handles:
//! - TTF/OTF face loading (fontdue for coverage, rustybuzz for shaping)
//! - Ink-extent metrics from true glyph bounding boxes
//! - Glyph outlines for vector export
//! - Placeholder block glyphs when a face is unavailable
//! - Font byte fetching and the single-flight face cache

pub mod book;
pub mod cache;
pub mod face;
pub mod fetch;
pub mod outline;
pub mod placeholder;

use std::fmt;

pub use book::FontBook;
pub use cache::{FontCache, FontKey};
pub use face::FontFace;
pub use fetch::{font_file_stem, DirectoryFetcher, FontFetcher, FontRequest};
pub use outline::OutlineSink;
pub use placeholder::PlaceholderFace;

/// Horizontal advance and ink extents of one glyph at a given pixel size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance to next character (before letter spacing)
    pub advance: f32,
    /// Ink extent above the baseline (>= 0)
    pub ink_ascent: f32,
    /// Ink extent below the baseline (>= 0)
    pub ink_descent: f32,
}

/// 8-bit coverage mask for one glyph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphBitmap {
    /// Offset from pen position to the left column
    pub left: i32,
    /// Rows above the baseline to the top row
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major, top row first
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Resolved face for one (family, weight).
///
/// Every query is deterministic for identical inputs. Characters missing
/// from the face degrade to the notdef glyph instead of failing.
pub trait GlyphSource: Send + Sync + fmt::Debug {
    /// Advance width and ink ascent/descent at `size` pixels per em
    fn metrics(&self, ch: char, size: f32) -> GlyphMetrics;

    /// Emit the glyph outline with its origin at (`x`, `y`), Y pointing down.
    /// Returns false when the glyph has no ink (e.g. space).
    fn outline(&self, ch: char, x: f32, y: f32, size: f32, sink: &mut dyn OutlineSink) -> bool;

    /// Anti-aliased coverage mask at `size` pixels per em
    fn rasterize(&self, ch: char, size: f32) -> GlyphBitmap;
}
