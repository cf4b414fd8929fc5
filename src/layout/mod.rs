//! Multi-line layout engine
//!
//! Turns a [`Document`] into absolute glyph positions for one output
//! surface. Every renderer (raster previews, app icons, SVG) goes through
//! [`layout`], so all surfaces share the same line metrics and baselines.
//!
//! Line metrics come from glyph ink extents (true bounding boxes), not from
//! font-wide line heights:
//! - ascent  = max ink ascent over the line's letters (0.8 × size if none)
//! - descent = max ink descent, at least 0.15 × size (0.2 × size when empty)
//!
//! Baselines stack: `b[0] = a[0]`, `b[i] = b[i-1] + d[i-1] + spacing + a[i]`.

use crate::constants::{EMPTY_LINE_ASCENT, EMPTY_LINE_DESCENT, MIN_DESCENT_RATIO};
use crate::font::{FontBook, GlyphSource};
use crate::model::{Document, HorizontalAlign, LayerOrder, Letter, Line};
use log::trace;
use std::sync::Arc;

/// Re-measure passes when scaled metrics drift past the available box
const MAX_FIT_PASSES: usize = 3;

/// Tolerance for the fit check (pixels)
const FIT_EPSILON: f32 = 1e-3;

// ============================================================================
// Layout results
// ============================================================================

/// One placed letter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPosition {
    pub letter: Letter,
    /// Index of the letter within its line
    pub index: usize,
    /// Pen offset from the line's left edge
    pub x: f32,
    /// Advance width (before letter spacing)
    pub advance: f32,
    /// Resolved font size (pixels)
    pub font_size: f32,
}

/// One measured and placed line
#[derive(Debug, Clone)]
pub struct LineLayout {
    pub positions: Vec<GlyphPosition>,
    /// Sum of advances plus spacing between letters
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
    pub font_size: f32,
    pub weight: u16,
    /// Left edge on the surface
    pub x: f32,
    /// Baseline on the surface
    pub baseline: f32,
    /// Face the line was measured with
    pub face: Arc<dyn GlyphSource>,
}

impl LineLayout {
    /// Positions in paint order. Reading order is unchanged; only the
    /// z-order of overlapping glyphs differs.
    pub fn paint_order(&self, order: LayerOrder) -> Vec<&GlyphPosition> {
        match order {
            // Painted last wins, so the left glyph goes last
            LayerOrder::LeftOverRight => self.positions.iter().rev().collect(),
            LayerOrder::RightOverLeft => self.positions.iter().collect(),
        }
    }

    /// Surface origin (pen position on the baseline) of `pos`
    pub fn origin(&self, pos: &GlyphPosition) -> (f32, f32) {
        (self.x + pos.x, self.baseline)
    }
}

/// Layout of a whole document on one surface
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub lines: Vec<LineLayout>,
    /// Uniform scale applied to every size and spacing
    pub scale: f32,
    /// Widest line (scaled)
    pub width: f32,
    /// Total visual height: last baseline + last descent (scaled)
    pub height: f32,
    /// Top of the text block on the surface
    pub top: f32,
    pub surface_width: f32,
    pub surface_height: f32,
}

impl DocumentLayout {
    /// Bounding box of every line's advance box: (left, top, right, bottom)
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let left = self
            .lines
            .iter()
            .map(|l| l.x.min(l.x + l.width))
            .fold(f32::INFINITY, f32::min);
        let right = self
            .lines
            .iter()
            .map(|l| l.x.max(l.x + l.width))
            .fold(f32::NEG_INFINITY, f32::max);
        (left, self.top, right, self.top + self.height)
    }
}

// ============================================================================
// Frames
// ============================================================================

/// Output surface the layout is computed for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Fixed surface; content is scaled down to fit inside the padding and
    /// centered vertically
    Fit { width: f32, height: f32, padding: f32 },
    /// Surface sized to content at scale 1, plus `padding` on every side
    Natural { padding: f32, min_width: f32 },
}

impl Frame {
    /// Square `size` surface with padding `size * padding_ratio`
    pub fn square(size: u32, padding_ratio: f32) -> Self {
        let size = size as f32;
        Frame::Fit {
            width: size,
            height: size,
            padding: size * padding_ratio,
        }
    }

    fn padding(&self) -> f32 {
        match *self {
            Frame::Fit { padding, .. } | Frame::Natural { padding, .. } => padding,
        }
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// Line measured at one scale, not yet placed
struct Measured {
    positions: Vec<GlyphPosition>,
    width: f32,
    ascent: f32,
    descent: f32,
    font_size: f32,
}

/// Measure `line` at `font_size` with `spacing` between letters
fn measure_line(line: &Line, face: &dyn GlyphSource, font_size: f32, spacing: f32) -> Measured {
    let mut positions = Vec::with_capacity(line.letters().len());
    let mut x = 0.0f32;
    let mut ascent = 0.0f32;
    let mut descent = 0.0f32;

    for (index, letter) in line.letters().iter().enumerate() {
        if index > 0 {
            x += spacing;
        }
        let m = face.metrics(letter.ch, font_size);
        positions.push(GlyphPosition {
            letter: *letter,
            index,
            x,
            advance: m.advance,
            font_size,
        });
        x += m.advance;
        ascent = ascent.max(m.ink_ascent);
        descent = descent.max(m.ink_descent);
    }

    if ascent <= 0.0 {
        ascent = font_size * EMPTY_LINE_ASCENT;
    }
    descent = if positions.is_empty() {
        font_size * EMPTY_LINE_DESCENT
    } else {
        descent.max(font_size * MIN_DESCENT_RATIO)
    };

    Measured {
        positions,
        width: x,
        ascent,
        descent,
        font_size,
    }
}

/// Every line measured at `scale`, with its face and weight
fn measure_all(
    doc: &Document,
    faces: &[(Arc<dyn GlyphSource>, u16)],
    scale: f32,
) -> Vec<Measured> {
    let base = doc.settings.base_font_size;
    doc.lines()
        .iter()
        .zip(faces)
        .map(|(line, (face, _))| {
            let size = line.effective_size(base) * scale;
            measure_line(line, face.as_ref(), size, line.letter_spacing * scale)
        })
        .collect()
}

/// Baselines relative to the block top, and the total visual height
fn stack_baselines(lines: &[Measured], line_spacing: f32) -> (Vec<f32>, f32) {
    let mut baselines = Vec::with_capacity(lines.len());
    let mut baseline = 0.0f32;

    for (i, line) in lines.iter().enumerate() {
        baseline = match i {
            0 => line.ascent,
            _ => baseline + lines[i - 1].descent + line_spacing + line.ascent,
        };
        baselines.push(baseline);
    }

    let height = lines.last().map_or(0.0, |l| baseline + l.descent);
    (baselines, height)
}

fn max_width(lines: &[Measured]) -> f32 {
    lines.iter().map(|l| l.width).fold(0.0, f32::max)
}

/// Uniform scale fitting `width`×`height` into `avail_w`×`avail_h`, never enlarging
fn fit_scale(width: f32, height: f32, avail_w: f32, avail_h: f32) -> f32 {
    let sx = if width > 0.0 { avail_w / width } else { f32::INFINITY };
    let sy = if height > 0.0 { avail_h / height } else { f32::INFINITY };
    sx.min(sy).min(1.0).max(0.0)
}

// ============================================================================
// Layout
// ============================================================================

/// Lay out `doc` for `frame`.
///
/// Faces are resolved per line weight from `fonts`; unavailable faces fall
/// back to placeholder glyphs so layout never fails.
pub fn layout(doc: &Document, fonts: &FontBook, frame: Frame) -> DocumentLayout {
    let settings = &doc.settings;
    let faces: Vec<(Arc<dyn GlyphSource>, u16)> = doc
        .lines()
        .iter()
        .map(|line| {
            let weight = doc.weight_of(line);
            (fonts.resolve(&settings.font_family, weight), weight)
        })
        .collect();

    // Natural size
    let natural = measure_all(doc, &faces, 1.0);
    let (_, natural_height) = stack_baselines(&natural, settings.line_spacing);
    let natural_width = max_width(&natural);

    let padding = frame.padding();
    let (scale, measured) = match frame {
        Frame::Natural { .. } => (1.0, natural),
        Frame::Fit { width, height, .. } => {
            let avail_w = width - padding * 2.0;
            let avail_h = height - padding * 2.0;
            let mut scale = fit_scale(natural_width, natural_height, avail_w, avail_h);
            let mut measured = if scale == 1.0 {
                natural
            } else {
                measure_all(doc, &faces, scale)
            };

            // Re-measured metrics may drift past the box; shrink and retry
            for _ in 0..MAX_FIT_PASSES {
                if scale == 1.0 {
                    break;
                }
                let w = max_width(&measured);
                let (_, h) = stack_baselines(&measured, settings.line_spacing * scale);
                if w <= avail_w + FIT_EPSILON && h <= avail_h + FIT_EPSILON {
                    break;
                }
                let correction = fit_scale(w, h, avail_w, avail_h);
                scale *= correction;
                measured = measure_all(doc, &faces, scale);
            }
            (scale, measured)
        }
    };

    let (baselines, height) = stack_baselines(&measured, settings.line_spacing * scale);
    let width = max_width(&measured);

    let (surface_width, surface_height, top) = match frame {
        Frame::Fit {
            width: w,
            height: h,
            ..
        } => (w, h, (h - height) / 2.0),
        Frame::Natural { min_width, .. } => (
            (width + padding * 2.0).max(min_width).ceil(),
            (height + padding * 2.0).ceil(),
            padding,
        ),
    };

    let lines: Vec<LineLayout> = measured
        .into_iter()
        .zip(baselines)
        .zip(faces)
        .map(|((m, baseline), (face, weight))| {
            let x = match settings.align {
                HorizontalAlign::Left => padding,
                HorizontalAlign::Right => surface_width - padding - m.width,
                HorizontalAlign::Center => (surface_width - m.width) / 2.0,
            };
            LineLayout {
                positions: m.positions,
                width: m.width,
                ascent: m.ascent,
                descent: m.descent,
                font_size: m.font_size,
                weight,
                x,
                baseline: top + baseline,
                face,
            }
        })
        .collect();

    trace!(
        "Layout: {} lines, scale {:.4}, block {:.1}x{:.1} on {:.0}x{:.0}",
        lines.len(),
        scale,
        width,
        height,
        surface_width,
        surface_height
    );

    DocumentLayout {
        lines,
        scale,
        width,
        height,
        top,
        surface_width,
        surface_height,
    }
}
