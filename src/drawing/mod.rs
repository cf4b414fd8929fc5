//! Geometric drawing utilities for app-icon masks
//!
//! This module provides anti-aliased coverage for:
//! - Rounded-rectangle clip masks (iOS / Android icon shapes)
//! - Inset rounded-rectangle borders
//!
//! Shapes are evaluated per pixel from signed distances rather than
//! scan-converted, so every icon size gets the same edge quality.

pub mod geometry;

pub use geometry::{aa_alpha_from_distance, smoothstep, RoundedRect};
