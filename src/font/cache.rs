//! Parsed-face cache
//!
//! Faces are memoized by (family, weight, concatenated document text), the
//! same key a subsetting remote source would need. Each key owns a
//! `tokio::sync::OnceCell`, so concurrent requests for a key share one
//! fetch (single-flight). A failed fetch leaves the cell empty and the
//! next request retries. Keys are evicted least-recently-used.

use crate::error::FontError;
use crate::font::fetch::{FontFetcher, FontRequest};
use crate::font::{FontBook, FontFace, GlyphSource};
use crate::model::Document;
use log::{debug, warn};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub family: String,
    pub weight: u16,
    /// Concatenated text of every line
    pub text: String,
}

impl FontKey {
    pub fn new(family: impl Into<String>, weight: u16, text: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight,
            text: text.into(),
        }
    }

    fn request(&self) -> FontRequest {
        FontRequest::new(self.family.clone(), self.weight).with_text_hint(self.text.clone())
    }
}

/// Turns fetched bytes into a face
pub type FaceParser = fn(Vec<u8>) -> Result<Arc<dyn GlyphSource>, FontError>;

type Slot = Arc<OnceCell<Arc<dyn GlyphSource>>>;

/// Single-flight LRU cache of parsed faces
pub struct FontCache<F> {
    fetcher: F,
    parser: FaceParser,
    slots: Mutex<LruCache<FontKey, Slot>>,
}

impl<F: FontFetcher> FontCache<F> {
    /// Cache holding at most `capacity` faces (at least one)
    pub fn new(fetcher: F, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            fetcher,
            parser: FontFace::parse_shared,
            slots: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Replace the byte parser
    pub fn with_parser(mut self, parser: FaceParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Number of cached keys (resolved or in flight)
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell for `key`, created on first use
    fn slot(&self, key: &FontKey) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = slots.get(key) {
            return Arc::clone(slot);
        }
        let slot: Slot = Arc::new(OnceCell::new());
        if let Some((evicted, _)) = slots.push(key.clone(), Arc::clone(&slot)) {
            if &evicted != key {
                debug!("Font cache evicted {} {}", evicted.family, evicted.weight);
            }
        }
        slot
    }

    /// Face for `key`, fetching and parsing it at most once
    pub async fn get(&self, key: &FontKey) -> Result<Arc<dyn GlyphSource>, FontError> {
        let slot = self.slot(key);
        let face = slot.get_or_try_init(|| self.load(key)).await?;
        Ok(Arc::clone(face))
    }

    async fn load(&self, key: &FontKey) -> Result<Arc<dyn GlyphSource>, FontError> {
        debug!("Fetching font {} {}", key.family, key.weight);
        let bytes = self.fetcher.fetch(&key.request()).await?;
        (self.parser)(bytes)
    }

    /// Resolve every weight `doc` uses.
    /// Unresolved weights are left out of the book (placeholder glyphs)
    /// and returned as errors.
    pub async fn font_book(&self, doc: &Document) -> (FontBook, Vec<FontError>) {
        let family = &doc.settings.font_family;
        let text = doc.concatenated_text();
        let mut book = FontBook::new();
        let mut errors = Vec::new();

        for weight in doc.weights() {
            let key = FontKey::new(family.clone(), weight, text.clone());
            match self.get(&key).await {
                Ok(face) => book.insert(family, weight, face),
                Err(e) => {
                    warn!("Font {} {} unavailable: {}", family, weight, e);
                    errors.push(e);
                }
            }
        }

        (book, errors)
    }
}
