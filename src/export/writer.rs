//! Bundle writers
//!
//! Where exported files go. Paths are bundle-relative and use `/`
//! separators (`logos/logo-512.png`).

use anyhow::{bail, Context, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Collects the named blobs of one bundle
pub trait BundleWriter {
    fn add(&mut self, path: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes files under a root directory, creating folders as needed
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    root: PathBuf,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bundle path under the root. Absolute paths and `..` are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("Invalid bundle path: {}", path);
        }
        Ok(self.root.join(relative))
    }
}

impl BundleWriter for DirectoryWriter {
    fn add(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&target, bytes)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        debug!("Wrote {} ({} bytes)", target.display(), bytes.len());
        Ok(())
    }
}

/// In-memory bundle, ordered by path
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|b| b.as_slice())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl BundleWriter for MemoryBundle {
    fn add(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        self.files.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}
