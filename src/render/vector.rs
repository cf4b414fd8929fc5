//! SVG exporter
//!
//! Writes the document at its natural size (scale 1) with fixed padding.
//! One `<path>` per inked glyph, built from the face outline at the same
//! baseline positions the raster renderer uses.

use crate::constants::SVG_MIN_WIDTH;
use crate::font::{FontBook, OutlineSink};
use crate::layout::{layout, Frame};
use crate::model::Document;
use log::debug;
use std::fmt::Write as _;
use svg::node::element::{Path, Rectangle};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Decimal places in path data
const PATH_PRECISION: usize = 2;

/// Format with `precision` decimals, trailing zeros stripped
fn fmt_scalar(v: f32, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" {
        "0".to_owned()
    } else {
        s
    }
}

/// Collects outline commands into an SVG path `d` string
#[derive(Debug, Default)]
pub struct SvgPathBuilder {
    data: String,
    precision: usize,
}

impl SvgPathBuilder {
    pub fn new(precision: usize) -> Self {
        Self {
            data: String::new(),
            precision,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn finish(self) -> String {
        self.data
    }

    fn command(&mut self, cmd: char, coords: &[f32]) {
        self.data.push(cmd);
        for (i, v) in coords.iter().enumerate() {
            if i > 0 {
                self.data.push(' ');
            }
            let _ = write!(self.data, "{}", fmt_scalar(*v, self.precision));
        }
    }
}

impl OutlineSink for SvgPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.command('M', &[x, y]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.command('L', &[x, y]);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.command('Q', &[x1, y1, x, y]);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.command('C', &[x1, y1, x2, y2, x, y]);
    }

    fn close(&mut self) {
        self.data.push('Z');
    }
}

/// Render `doc` as a standalone SVG document with `padding` pixels around
/// the text block
pub fn render_svg(doc: &Document, fonts: &FontBook, padding: f32) -> String {
    let placed = layout(
        doc,
        fonts,
        Frame::Natural {
            padding,
            min_width: SVG_MIN_WIDTH,
        },
    );

    let width = fmt_scalar(placed.surface_width, 0);
    let height = fmt_scalar(placed.surface_height, 0);

    let mut document = svg::Document::new()
        .set("xmlns", SVG_NAMESPACE)
        .set("viewBox", format!("0 0 {} {}", width, height))
        .set("width", width.as_str())
        .set("height", height.as_str());

    if let Some(bg) = doc.settings.background.fill() {
        document = document.add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", bg.to_string()),
        );
    }

    let mut glyphs = 0usize;
    for line in &placed.lines {
        for pos in line.paint_order(doc.settings.layer_order) {
            let (x, y) = line.origin(pos);
            let mut path = SvgPathBuilder::new(PATH_PRECISION);
            if !line.face.outline(pos.letter.ch, x, y, pos.font_size, &mut path) || path.is_empty() {
                continue;
            }
            let color = doc.resolve_color(&pos.letter);
            document = document.add(
                Path::new()
                    .set("d", path.finish())
                    .set("fill", color.to_string()),
            );
            glyphs += 1;
        }
    }

    debug!("SVG: {} glyph paths, {}x{}", glyphs, width, height);
    format!("{}\n{}", XML_DECLARATION, document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SVG_PADDING;
    use crate::model::{BackgroundKind, LayerOrder, LayoutSettings, Line};
    use crate::utils::Color;

    fn doc(lines: &[&str]) -> Document {
        Document::new(
            lines.iter().map(|t| Line::new(t)).collect(),
            LayoutSettings::default(),
        )
    }

    #[test]
    fn test_fmt_scalar() {
        assert_eq!(fmt_scalar(10.0, 2), "10");
        assert_eq!(fmt_scalar(10.5, 2), "10.5");
        assert_eq!(fmt_scalar(1.234, 2), "1.23");
        assert_eq!(fmt_scalar(-0.001, 2), "0");
        assert_eq!(fmt_scalar(200.0, 0), "200");
    }

    #[test]
    fn test_path_builder_commands() {
        let mut path = SvgPathBuilder::new(2);
        path.move_to(1.0, 2.5);
        path.quad_to(3.0, 4.0, 5.0, 6.0);
        path.line_to(0.0, 0.0);
        path.close();
        assert_eq!(path.finish(), "M1 2.5Q3 4 5 6L0 0Z");
    }

    #[test]
    fn test_svg_natural_size_with_minimum_width() {
        let svg = render_svg(&doc(&["A"]), &FontBook::new(), SVG_PADDING);
        assert!(svg.starts_with(XML_DECLARATION));
        assert!(svg.contains(r#"viewBox="0 0 200 165""#));
        assert!(svg.contains(r#"width="200""#));
        assert!(svg.contains(r#"height="165""#));
    }

    #[test]
    fn test_one_path_per_inked_glyph() {
        let svg = render_svg(&doc(&["A B", "cd"]), &FontBook::new(), SVG_PADDING);
        assert_eq!(svg.matches("<path").count(), 4);
        assert!(svg.contains(r##"fill="#333333""##));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_background_rect_and_letter_colors() {
        let mut d = doc(&["AB"]);
        d.settings.background.kind = BackgroundKind::Color;
        d.settings.background.color = Color::rgb(0, 0, 0);
        d.set_letter_color(0, 1, Some(Color::rgb(255, 0, 0)));

        let svg = render_svg(&d, &FontBook::new(), SVG_PADDING);
        assert!(svg.contains("<rect"));
        assert!(svg.contains(r##"fill="#000000""##));
        assert!(svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn test_layer_order_reverses_paths() {
        let mut d = doc(&["AB"]);
        d.set_letter_color(0, 0, Some(Color::rgb(255, 0, 0)));
        d.set_letter_color(0, 1, Some(Color::rgb(0, 0, 255)));

        d.settings.layer_order = LayerOrder::RightOverLeft;
        let svg = render_svg(&d, &FontBook::new(), SVG_PADDING);
        assert!(svg.find("#ff0000") < svg.find("#0000ff"));

        d.settings.layer_order = LayerOrder::LeftOverRight;
        let svg = render_svg(&d, &FontBook::new(), SVG_PADDING);
        assert!(svg.find("#0000ff") < svg.find("#ff0000"));
    }
}
