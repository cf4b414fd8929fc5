//! Output surfaces
//!
//! - `raster`: RGBA surfaces (logos, favicons, app icons, previews) and PNG encoding
//! - `vector`: standalone SVG documents with glyph outlines as paths
//!
//! Both consume the same [`crate::layout::DocumentLayout`], which keeps
//! previews and exported files geometrically identical.

pub mod raster;
pub mod vector;

pub use raster::{encode_png, paint, previews, render, render_png, Preview, RasterTarget, Shape};
pub use vector::{render_svg, SvgPathBuilder};
