//! Glyph outline extraction.
//!
//! [`OutlineSink`] receives glyph outline commands already placed on the
//! output surface: scaled to the requested size, translated to the pen
//! position, and flipped to Y-down. Consumers never see font design units
//! or `ttf_parser` types.

/// Receiver for glyph outline commands (surface coordinates, Y down)
pub trait OutlineSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Quadratic Bezier (TrueType-style)
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);
    /// Cubic Bezier (CFF-style)
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);
    fn close(&mut self);
}
