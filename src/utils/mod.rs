//! Utility functions shared across brandkit
//!
//! Common helpers that don't fit in specialized modules.

pub mod color;

pub use color::{blend_over, parse_hex_color, Color};
