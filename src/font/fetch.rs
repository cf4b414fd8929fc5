//! Font byte sources
//!
//! A [`FontFetcher`] turns (family, weight, optional text hint) into raw
//! TTF/OTF bytes. The directory fetcher reads files named the same way the
//! export bundle names them (`Open-Sans-700.ttf`).

use crate::constants::MIN_FONT_FILE_LEN;
use crate::error::FetchError;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One font byte request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub family: String,
    pub weight: u16,
    /// Text the face must cover (remote sources may subset to it)
    pub text_hint: Option<String>,
}

impl FontRequest {
    pub fn new(family: impl Into<String>, weight: u16) -> Self {
        Self {
            family: family.into(),
            weight,
            text_hint: None,
        }
    }

    pub fn with_text_hint(mut self, text: impl Into<String>) -> Self {
        self.text_hint = Some(text.into());
        self
    }
}

/// Source of font bytes
#[allow(async_fn_in_trait)]
pub trait FontFetcher {
    async fn fetch(&self, request: &FontRequest) -> Result<Vec<u8>, FetchError>;
}

/// File stem for (family, weight): words joined by `-`, then the weight
pub fn font_file_stem(family: &str, weight: u16) -> String {
    let name: Vec<&str> = family.split_whitespace().collect();
    format!("{}-{}", name.join("-"), weight)
}

/// Reject truncated files and error pages
pub(crate) fn check_font_len(bytes: &[u8]) -> Result<(), FetchError> {
    if bytes.len() < MIN_FONT_FILE_LEN {
        return Err(FetchError::TooSmall { len: bytes.len() });
    }
    Ok(())
}

/// Reads `{dir}/{stem}.ttf`, then `{dir}/{stem}.otf`
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    dir: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FontFetcher for DirectoryFetcher {
    async fn fetch(&self, request: &FontRequest) -> Result<Vec<u8>, FetchError> {
        let stem = font_file_stem(&request.family, request.weight);

        for ext in ["ttf", "otf"] {
            let path = self.dir.join(format!("{}.{}", stem, ext));
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    check_font_len(&bytes)?;
                    debug!("Font loaded: {} ({} bytes)", path.display(), bytes.len());
                    return Ok(bytes);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(FetchError::Io {
                        path: path.display().to_string(),
                        source: e,
                    })
                }
            }
        }

        Err(FetchError::NotFound {
            family: request.family.clone(),
            weight: request.weight,
        })
    }
}
