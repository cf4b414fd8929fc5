//! Raster renderer
//!
//! Paints a document onto an RGBA surface: plain squares for logos and
//! favicons, rounded app icons (background, inset border, text clipped to
//! the rounded shape). Glyph placement comes from the shared layout, so
//! every size is a scaled copy of the same composition.

use crate::constants::{
    AA_WIDTH, ALPHA_THRESHOLD, ANDROID_RADIUS, APP_ICON_PADDING, APP_ICON_PREVIEW_SIZE,
    BORDER_WIDTH_DIVISOR, IOS_RADIUS, LOGO_PADDING, PREVIEW_TARGETS,
};
use crate::drawing::RoundedRect;
use crate::error::RenderError;
use crate::font::FontBook;
use crate::layout::{layout, Frame};
use crate::model::Document;
use crate::utils::{blend_over, Color};
use image::RgbaImage;
use log::debug;

/// Outline of the output surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Full square (logos, favicons)
    Square,
    /// Rounded square with corner radius `size * radius_ratio` (app icons)
    Rounded { radius_ratio: f32 },
}

/// One raster output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterTarget {
    /// Edge length (pixels)
    pub size: u32,
    pub shape: Shape,
    /// Padding relative to `size`
    pub padding: f32,
}

impl RasterTarget {
    /// Plain square logo
    pub fn logo(size: u32) -> Self {
        Self {
            size,
            shape: Shape::Square,
            padding: LOGO_PADDING,
        }
    }

    /// Rounded app icon
    pub fn app_icon(size: u32, radius_ratio: f32) -> Self {
        Self {
            size,
            shape: Shape::Rounded { radius_ratio },
            padding: APP_ICON_PADDING,
        }
    }
}

/// Rounded-rectangle clip mask
struct Mask(Option<RoundedRect>);

impl Mask {
    /// Coverage at the center of pixel (x, y)
    #[inline]
    fn at(&self, x: u32, y: u32) -> f32 {
        match &self.0 {
            Some(rect) => rect.coverage(x as f32 + 0.5, y as f32 + 0.5, AA_WIDTH),
            None => 1.0,
        }
    }
}

/// Blend `color` at `alpha` into pixel (x, y)
#[inline]
fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Color, alpha: f32) {
    if alpha <= ALPHA_THRESHOLD {
        return;
    }
    let px = img.get_pixel_mut(x, y);
    px.0 = blend_over(px.0, color, alpha);
}

/// Rounded background and inset border
fn paint_app_icon_shape(img: &mut RgbaImage, doc: &Document, rect: &RoundedRect) {
    let style = &doc.settings.app_icon;
    let size = img.width().min(img.height()) as f32;

    for y in 0..img.height() {
        for x in 0..img.width() {
            let cov = rect.coverage(x as f32 + 0.5, y as f32 + 0.5, AA_WIDTH);
            blend_pixel(img, x, y, style.background, cov);
        }
    }

    if !style.border_enabled {
        return;
    }

    // Stroke centered on a boundary inset by half its width stays inside the icon
    let width = (size / BORDER_WIDTH_DIVISOR).max(1.0);
    let ring = rect.inset(width / 2.0);
    for y in 0..img.height() {
        for x in 0..img.width() {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            let cov = ring.stroke_coverage(px, py, width, AA_WIDTH)
                * rect.coverage(px, py, AA_WIDTH);
            blend_pixel(img, x, y, style.border, cov);
        }
    }
}

/// Paint `doc` onto `img` for `shape` with `padding` (relative to the
/// shorter edge). The surface is modified in place.
pub fn paint(img: &mut RgbaImage, doc: &Document, fonts: &FontBook, shape: Shape, padding: f32) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let edge = width.min(height) as f32;

    let mask = match shape {
        Shape::Square => {
            if let Some(bg) = doc.settings.background.fill() {
                for px in img.pixels_mut() {
                    px.0 = bg.to_rgba(255);
                }
            }
            Mask(None)
        }
        Shape::Rounded { radius_ratio } => {
            let rect = RoundedRect {
                x: 0.0,
                y: 0.0,
                width: width as f32,
                height: height as f32,
                radius: edge * radius_ratio,
            };
            paint_app_icon_shape(img, doc, &rect);
            Mask(Some(rect))
        }
    };

    let frame = Frame::Fit {
        width: width as f32,
        height: height as f32,
        padding: edge * padding,
    };
    let placed = layout(doc, fonts, frame);

    for line in &placed.lines {
        for pos in line.paint_order(doc.settings.layer_order) {
            let color = doc.resolve_color(&pos.letter);
            let bitmap = line.face.rasterize(pos.letter.ch, pos.font_size);
            if bitmap.is_empty() {
                continue;
            }

            let (ox, oy) = line.origin(pos);
            let left = ox.round() as i32 + bitmap.left;
            let top = oy.round() as i32 - bitmap.top;

            for row in 0..bitmap.height {
                let y = top + row as i32;
                if y < 0 || y >= height as i32 {
                    continue;
                }
                for col in 0..bitmap.width {
                    let x = left + col as i32;
                    if x < 0 || x >= width as i32 {
                        continue;
                    }
                    let coverage = bitmap.coverage[row * bitmap.width + col];
                    if coverage == 0 {
                        continue;
                    }
                    let (x, y) = (x as u32, y as u32);
                    let alpha = coverage as f32 / 255.0 * mask.at(x, y);
                    blend_pixel(img, x, y, color, alpha);
                }
            }
        }
    }
}

/// Render `doc` into a new transparent surface for `target`
pub fn render(doc: &Document, fonts: &FontBook, target: RasterTarget) -> Result<RgbaImage, RenderError> {
    if target.size == 0 {
        return Err(RenderError::EmptySurface);
    }
    let mut img = RgbaImage::new(target.size, target.size);
    paint(&mut img, doc, fonts, target.shape, target.padding);
    Ok(img)
}

/// Encode a surface as an 8-bit RGBA PNG
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptySurface);
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(img.as_raw())?;
    }
    Ok(out)
}

/// Render and encode in one step
pub fn render_png(doc: &Document, fonts: &FontBook, target: RasterTarget) -> Result<Vec<u8>, RenderError> {
    encode_png(&render(doc, fonts, target)?)
}

/// One rendered preview
#[derive(Debug, Clone)]
pub struct Preview {
    pub name: &'static str,
    pub image: RgbaImage,
}

/// Thumbnail set plus iOS/Android app-icon previews
pub fn previews(doc: &Document, fonts: &FontBook) -> Result<Vec<Preview>, RenderError> {
    let mut out = Vec::with_capacity(PREVIEW_TARGETS.len() + 2);

    for (name, size) in PREVIEW_TARGETS {
        out.push(Preview {
            name,
            image: render(doc, fonts, RasterTarget::logo(size))?,
        });
    }
    for (name, radius) in [("ios", IOS_RADIUS), ("android", ANDROID_RADIUS)] {
        out.push(Preview {
            name,
            image: render(doc, fonts, RasterTarget::app_icon(APP_ICON_PREVIEW_SIZE, radius))?,
        });
    }

    debug!("Rendered {} previews", out.len());
    Ok(out)
}
