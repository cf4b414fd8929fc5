//! Export orchestrator
//!
//! Walks the fixed asset catalog (plain logos and favicons, rounded iOS and
//! Android icons, one SVG), renders each entry and hands the blobs to a
//! [`BundleWriter`]. A single failing asset is recorded as a warning and
//! skipped; only the README write is fatal.

pub mod manifest;
pub mod writer;

use crate::config::ExportConfig;
use crate::constants::APPLE_TOUCH_SIZE;
use crate::font::fetch::check_font_len;
use crate::font::{font_file_stem, FontBook, FontFetcher, FontRequest};
use crate::model::Document;
use crate::render::{render_png, render_svg, RasterTarget, Shape};
use anyhow::{Context, Result};
use log::{info, warn};

pub use manifest::{font_license, readme};
pub use writer::{BundleWriter, DirectoryWriter, MemoryBundle};

/// One raster entry of the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct RasterAsset {
    /// Bundle folder (`logos`, `favicons`, `ios`, `android`)
    pub folder: &'static str,
    /// File name inside the folder
    pub name: String,
    pub target: RasterTarget,
}

impl RasterAsset {
    fn new(folder: &'static str, name: String, size: u32, shape: Shape, padding: f32) -> Self {
        Self {
            folder,
            name,
            target: RasterTarget {
                size,
                shape,
                padding,
            },
        }
    }

    /// Bundle-relative path
    pub fn path(&self) -> String {
        format!("{}/{}", self.folder, self.name)
    }
}

/// Raster entries in bundle order
pub fn catalog(config: &ExportConfig) -> Vec<RasterAsset> {
    let mut assets = Vec::new();

    for &size in &config.logo_sizes {
        assets.push(RasterAsset::new(
            "logos",
            format!("logo-{}.png", size),
            size,
            Shape::Square,
            config.logo_padding,
        ));
    }

    for &size in &config.favicon_sizes {
        let name = if size == APPLE_TOUCH_SIZE {
            "apple-touch-icon.png".to_string()
        } else {
            format!("favicon-{}x{}.png", size, size)
        };
        assets.push(RasterAsset::new(
            "favicons",
            name,
            size,
            Shape::Square,
            config.logo_padding,
        ));
    }

    let rounded = [
        ("ios", &config.ios_sizes, config.ios_radius),
        ("android", &config.android_sizes, config.android_radius),
    ];
    for (folder, sizes, radius_ratio) in rounded {
        for &size in sizes {
            assets.push(RasterAsset::new(
                folder,
                format!("{}-{}.png", folder, size),
                size,
                Shape::Rounded { radius_ratio },
                config.app_icon_padding,
            ));
        }
    }

    assets
}

/// Outcome of one export
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Folder name of the bundle (`brand_kit_<title>`)
    pub bundle_name: String,
    /// Bundle paths written, in write order
    pub written: Vec<String>,
    /// Assets that were skipped, with the reason
    pub warnings: Vec<String>,
}

impl ExportReport {
    fn skip(&mut self, what: &str, err: impl std::fmt::Display) {
        warn!("Skipping {}: {}", what, err);
        self.warnings.push(format!("{}: {}", what, err));
    }
}

/// Render the whole bundle for `doc` into `writer`.
///
/// `fonts` must already hold the faces for the document's weights (see
/// [`crate::font::FontCache::font_book`]); `fetcher` is only asked for the
/// TTF bytes copied into `fonts/`.
pub async fn export_bundle<F, W>(
    doc: &Document,
    fonts: &FontBook,
    fetcher: &F,
    config: &ExportConfig,
    writer: &mut W,
) -> Result<ExportReport>
where
    F: FontFetcher,
    W: BundleWriter,
{
    let mut report = ExportReport {
        bundle_name: doc.bundle_name(),
        ..Default::default()
    };

    // ====================================================================
    // Raster assets
    // ====================================================================
    let assets = catalog(config);
    for asset in &assets {
        let path = asset.path();
        let written = render_png(doc, fonts, asset.target)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| writer.add(&path, &bytes));
        match written {
            Ok(()) => report.written.push(path),
            Err(e) => report.skip(&path, e),
        }
        tokio::task::yield_now().await;
    }

    // ====================================================================
    // Vector logo
    // ====================================================================
    let svg_path = "logos/logo.svg";
    let svg = render_svg(doc, fonts, config.svg_padding);
    match writer.add(svg_path, svg.as_bytes()) {
        Ok(()) => report.written.push(svg_path.to_string()),
        Err(e) => report.skip(svg_path, e),
    }

    // ====================================================================
    // Font files
    // ====================================================================
    if config.include_fonts {
        let family = &doc.settings.font_family;
        let mut fonts_written = 0usize;

        for weight in doc.weights() {
            let request = FontRequest::new(family.as_str(), weight);
            let path = format!("fonts/{}.ttf", font_file_stem(family, weight));
            let fetched = match fetcher.fetch(&request).await {
                Ok(bytes) => check_font_len(&bytes).map(|_| bytes),
                Err(e) => Err(e),
            };
            let written = fetched
                .map_err(anyhow::Error::from)
                .and_then(|bytes| writer.add(&path, &bytes));
            match written {
                Ok(()) => {
                    report.written.push(path);
                    fonts_written += 1;
                }
                Err(e) => report.skip(&format!("font {} {}", family, weight), e),
            }
        }

        if fonts_written > 0 {
            let license_path = "fonts/LICENSE.txt";
            match writer.add(license_path, font_license(doc).as_bytes()) {
                Ok(()) => report.written.push(license_path.to_string()),
                Err(e) => report.skip(license_path, e),
            }
        }
    }

    // ====================================================================
    // Manifest
    // ====================================================================
    let text = readme(doc, &assets, &report.written, &report.warnings);
    writer
        .add("README.txt", text.as_bytes())
        .context("Failed to write README.txt")?;
    report.written.push("README.txt".to_string());

    info!(
        "Exported {}: {} files, {} skipped",
        report.bundle_name,
        report.written.len(),
        report.warnings.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    /// Serves the same bytes for every request
    struct StaticFetcher(Vec<u8>);

    impl FontFetcher for StaticFetcher {
        async fn fetch(&self, _request: &FontRequest) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_catalog_names() {
        let assets = catalog(&ExportConfig::default());
        let paths: Vec<String> = assets.iter().map(|a| a.path()).collect();

        assert_eq!(assets.len(), 4 + 4 + 5 + 6);
        assert_eq!(paths[0], "logos/logo-1024.png");
        assert!(paths.contains(&"favicons/favicon-16x16.png".to_string()));
        assert!(paths.contains(&"favicons/apple-touch-icon.png".to_string()));
        assert!(paths.contains(&"ios/ios-167.png".to_string()));
        assert!(paths.contains(&"android/android-48.png".to_string()));
    }

    #[test]
    fn test_catalog_shapes() {
        let config = ExportConfig::default();
        let assets = catalog(&config);

        let ios = assets.iter().find(|a| a.folder == "ios").unwrap();
        assert_eq!(
            ios.target.shape,
            Shape::Rounded {
                radius_ratio: config.ios_radius
            }
        );
        assert_eq!(ios.target.padding, config.app_icon_padding);

        let favicon = assets.iter().find(|a| a.folder == "favicons").unwrap();
        assert_eq!(favicon.target.shape, Shape::Square);
        assert_eq!(favicon.target.padding, config.logo_padding);
    }

    #[tokio::test]
    async fn test_zero_size_entry_becomes_warning() {
        let config = ExportConfig {
            logo_sizes: vec![0, 16],
            favicon_sizes: vec![],
            ios_sizes: vec![],
            android_sizes: vec![],
            include_fonts: false,
            ..Default::default()
        };
        let mut bundle = MemoryBundle::new();
        let report = export_bundle(
            &Document::default(),
            &FontBook::new(),
            &StaticFetcher(Vec::new()),
            &config,
            &mut bundle,
        )
        .await
        .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].starts_with("logos/logo-0.png"));
        assert!(bundle.contains("logos/logo-16.png"));
        assert!(!bundle.contains("logos/logo-0.png"));
        let text = String::from_utf8(bundle.get("README.txt").unwrap().to_vec()).unwrap();
        assert!(text.contains("Warnings:"));
    }

    #[tokio::test]
    async fn test_fonts_and_license_written() {
        let config = ExportConfig {
            logo_sizes: vec![],
            favicon_sizes: vec![],
            ios_sizes: vec![],
            android_sizes: vec![],
            ..Default::default()
        };
        let mut doc = Document::default();
        doc.settings.font_family = "Open Sans".to_string();

        let mut bundle = MemoryBundle::new();
        let report = export_bundle(
            &doc,
            &FontBook::new(),
            &StaticFetcher(vec![0u8; 4096]),
            &config,
            &mut bundle,
        )
        .await
        .unwrap();

        assert!(report.warnings.is_empty());
        assert_eq!(bundle.get("fonts/Open-Sans-700.ttf").map(|b| b.len()), Some(4096));
        assert!(bundle.contains("fonts/LICENSE.txt"));
        assert_eq!(report.written.last().map(String::as_str), Some("README.txt"));
    }

    #[tokio::test]
    async fn test_truncated_font_is_skipped() {
        let config = ExportConfig {
            logo_sizes: vec![],
            favicon_sizes: vec![],
            ios_sizes: vec![],
            android_sizes: vec![],
            ..Default::default()
        };
        let mut bundle = MemoryBundle::new();
        let report = export_bundle(
            &Document::default(),
            &FontBook::new(),
            &StaticFetcher(vec![0u8; 12]),
            &config,
            &mut bundle,
        )
        .await
        .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("too small"));
        assert!(!bundle.contains("fonts/LICENSE.txt"));
        assert!(bundle.contains("logos/logo.svg"));
    }
}
