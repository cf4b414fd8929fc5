//! brandkit - brand asset generator
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   Persisted record (current | legacy)    │
//! │                  ↓                       │
//! │   Document (lines, letters, settings)    │
//! │                  ↓                       │
//! │   Layout (ink metrics, baselines, fit)   │
//! │          ↓                 ↓             │
//! │   Raster (PNG)        Vector (SVG)       │
//! │          ↓                 ↓             │
//! │   Export (catalog, fonts, README)        │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Faces come from a [`font::FontFetcher`] through the single-flight
//! [`font::FontCache`]; a missing face renders with block placeholders.

pub mod config;
pub mod constants;
pub mod drawing;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;
pub mod model;
pub mod render;
pub mod utils;

pub use error::{FetchError, FontError, RecordError, RenderError};
pub use export::{export_bundle, ExportReport};
pub use layout::{layout, DocumentLayout, Frame};
pub use model::{load_record, save_record, Document};
pub use utils::Color;
