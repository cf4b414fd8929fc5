//! Resolved faces for one render
//!
//! A [`FontBook`] maps (family, weight) to a parsed face. Layout and the
//! renderers only ever talk to the book, so a render never waits on a
//! fetch: faces are resolved up front by the cache.

use crate::error::FontError;
use crate::font::outline::OutlineSink;
use crate::font::{GlyphMetrics, GlyphSource, PlaceholderFace};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Faces keyed by (lowercased family, weight)
#[derive(Debug, Clone)]
pub struct FontBook {
    faces: HashMap<(String, u16), Arc<dyn GlyphSource>>,
    fallback: Arc<dyn GlyphSource>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Empty book: every lookup resolves to the placeholder face
    pub fn new() -> Self {
        Self {
            faces: HashMap::new(),
            fallback: Arc::new(PlaceholderFace),
        }
    }

    fn key(family: &str, weight: u16) -> (String, u16) {
        (family.trim().to_lowercase(), weight)
    }

    /// Register a face for (family, weight), replacing any previous one
    pub fn insert(&mut self, family: &str, weight: u16, face: Arc<dyn GlyphSource>) {
        self.faces.insert(Self::key(family, weight), face);
    }

    /// Whether a real face is registered for (family, weight)
    pub fn contains(&self, family: &str, weight: u16) -> bool {
        self.faces.contains_key(&Self::key(family, weight))
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face for (family, weight)
    pub fn face(&self, family: &str, weight: u16) -> Result<Arc<dyn GlyphSource>, FontError> {
        self.faces
            .get(&Self::key(family, weight))
            .cloned()
            .ok_or_else(|| FontError::Unavailable {
                family: family.to_string(),
                weight,
            })
    }

    /// Face for (family, weight), or the placeholder face when unavailable
    pub fn resolve(&self, family: &str, weight: u16) -> Arc<dyn GlyphSource> {
        match self.face(family, weight) {
            Ok(face) => face,
            Err(e) => {
                debug!("{}, using placeholder glyphs", e);
                Arc::clone(&self.fallback)
            }
        }
    }

    /// Metrics of `ch` in (family, weight) at `size`
    pub fn metrics(
        &self,
        family: &str,
        weight: u16,
        ch: char,
        size: f32,
    ) -> Result<GlyphMetrics, FontError> {
        Ok(self.face(family, weight)?.metrics(ch, size))
    }

    /// Outline of `ch` in (family, weight) with its origin at (`x`, `y`).
    /// `Ok(false)` means the glyph has no ink.
    #[allow(clippy::too_many_arguments)]
    pub fn outline(
        &self,
        family: &str,
        weight: u16,
        ch: char,
        x: f32,
        y: f32,
        size: f32,
        sink: &mut dyn OutlineSink,
    ) -> Result<bool, FontError> {
        Ok(self.face(family, weight)?.outline(ch, x, y, size, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_face_is_unavailable() {
        let book = FontBook::new();
        let err = book.metrics("Montserrat", 700, 'A', 100.0).unwrap_err();
        assert!(matches!(
            err,
            FontError::Unavailable { ref family, weight: 700 } if family == "Montserrat"
        ));
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let book = FontBook::new();
        let face = book.resolve("Montserrat", 400);
        let expected = PlaceholderFace.metrics('A', 50.0);
        assert_eq!(face.metrics('A', 50.0), expected);
    }

    #[test]
    fn test_family_lookup_ignores_case() {
        let mut book = FontBook::new();
        book.insert("Open Sans", 400, Arc::new(PlaceholderFace));
        assert!(book.contains("open sans", 400));
        assert!(!book.contains("open sans", 700));
        assert!(book.metrics("OPEN SANS", 400, 'x', 10.0).is_ok());
    }
}
