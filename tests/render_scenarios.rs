//! Layout and raster scenarios with placeholder glyphs

use brandkit::constants::LOGO_PADDING;
use brandkit::font::FontBook;
use brandkit::layout::{layout, Frame};
use brandkit::model::{LayerOrder, LayoutSettings, Line};
use brandkit::render::{render, RasterTarget};
use brandkit::{Color, Document};
use image::RgbaImage;

fn doc(lines: &[&str]) -> Document {
    Document::new(
        lines.iter().map(|t| Line::new(t)).collect(),
        LayoutSettings::default(),
    )
}

fn pixel(img: &RgbaImage, x: f32, y: f32) -> [u8; 4] {
    img.get_pixel(x.floor() as u32, y.floor() as u32).0
}

#[test]
fn test_glyph_centroid_is_inked_and_outside_is_empty() {
    let d = doc(&["AB"]);
    let fonts = FontBook::new();
    let size = 64;

    let placed = layout(&d, &fonts, Frame::square(size, LOGO_PADDING));
    let img = render(&d, &fonts, RasterTarget::logo(size)).unwrap();

    let line = &placed.lines[0];
    let a = &line.positions[0];
    let (x, baseline) = line.origin(a);
    let centroid = (x + a.advance / 2.0, baseline - line.ascent / 2.0);

    let px = pixel(&img, centroid.0, centroid.1);
    assert!(px[3] > 0);
    assert_eq!(&px[..3], &[0x33, 0x33, 0x33]);

    let (left, top, right, bottom) = placed.bounds();
    for (px, py, p) in img.enumerate_pixels() {
        let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
        let inside = cx >= left - 1.0 && cx <= right + 1.0 && cy >= top - 1.0 && cy <= bottom + 1.0;
        if !inside {
            assert_eq!(p.0[3], 0, "ink outside block at ({}, {})", px, py);
        }
    }
}

#[test]
fn test_scaled_block_fits_every_box() {
    let fonts = FontBook::new();
    let texts: [&[&str]; 4] = [
        &["A"],
        &["Brand"],
        &["A very long single line of text"],
        &["Top", "Middle line", "gy"],
    ];

    for lines in texts {
        for base in [24.0, 100.0, 400.0] {
            let mut d = doc(lines);
            d.settings.base_font_size = base;

            for size in [16u32, 64, 512] {
                let placed = layout(&d, &fonts, Frame::square(size, LOGO_PADDING));
                let avail = size as f32 - 2.0 * size as f32 * LOGO_PADDING;
                let eps = 1e-3 * avail.max(1.0);

                for line in &placed.lines {
                    assert!(line.width <= avail + eps, "{:?} base {} size {}", lines, base, size);
                }
                assert!(placed.height <= avail + eps);
                assert!(placed.scale <= 1.0);

                if placed.scale < 1.0 {
                    let touches = (placed.width - avail).abs() <= eps
                        || (placed.height - avail).abs() <= eps;
                    assert!(touches, "{:?} base {} size {}", lines, base, size);
                }
            }
        }
    }
}

#[test]
fn test_layer_order_decides_overlap_color() {
    let red = Color::rgb(255, 0, 0);
    let blue = Color::rgb(0, 0, 255);
    let fonts = FontBook::new();
    let size = 256;

    let mut d = doc(&["AB"]);
    d.set_letter_color(0, 0, Some(red));
    d.set_letter_color(0, 1, Some(blue));
    if let Some(line) = d.line_mut(0) {
        line.letter_spacing = -40.0;
    }

    // Middle of the region where both ink boxes overlap
    let placed = layout(&d, &fonts, Frame::square(size, LOGO_PADDING));
    let line = &placed.lines[0];
    let (a, b) = (&line.positions[0], &line.positions[1]);
    let (ax, baseline) = line.origin(a);
    let (bx, _) = line.origin(b);
    let a_right = ax + a.font_size * 0.55;
    let b_left = bx + b.font_size * 0.05;
    assert!(b_left < a_right);
    let probe = ((a_right + b_left) / 2.0, baseline - line.ascent / 2.0);

    d.settings.layer_order = LayerOrder::RightOverLeft;
    let img = render(&d, &fonts, RasterTarget::logo(size)).unwrap();
    assert_eq!(pixel(&img, probe.0, probe.1), [0, 0, 255, 255]);

    d.settings.layer_order = LayerOrder::LeftOverRight;
    let img = render(&d, &fonts, RasterTarget::logo(size)).unwrap();
    assert_eq!(pixel(&img, probe.0, probe.1), [255, 0, 0, 255]);
}

#[test]
fn test_baselines_stack_at_every_scale() {
    let fonts = FontBook::new();
    let mut d = doc(&["Hg", "xy"]);
    if let Some(line) = d.line_mut(1) {
        line.relative_size = 60.0;
    }

    let natural = layout(&d, &fonts, Frame::Natural { padding: 0.0, min_width: 0.0 });
    let fitted = layout(&d, &fonts, Frame::square(48, LOGO_PADDING));

    for placed in [&natural, &fitted] {
        let (l1, l2) = (&placed.lines[0], &placed.lines[1]);
        let gap = d.settings.line_spacing * placed.scale;
        let expected = l1.descent + gap + l2.ascent;
        assert!((l2.baseline - l1.baseline - expected).abs() < 1e-3);
    }
}
