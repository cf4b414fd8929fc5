//! Bundle export through the public API, with placeholder glyphs only

use brandkit::config::ExportConfig;
use brandkit::error::FetchError;
use brandkit::export::{catalog, export_bundle, DirectoryWriter, MemoryBundle};
use brandkit::font::{FontBook, FontCache, FontFetcher, FontRequest};
use brandkit::model::load_record;
use brandkit::Document;

/// Fetcher with no fonts at all
struct NoFonts;

impl FontFetcher for NoFonts {
    async fn fetch(&self, request: &FontRequest) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::NotFound {
            family: request.family.clone(),
            weight: request.weight,
        })
    }
}

fn readme(bundle: &MemoryBundle) -> String {
    String::from_utf8(bundle.get("README.txt").unwrap().to_vec()).unwrap()
}

#[tokio::test]
async fn test_missing_fonts_do_not_abort_export() {
    let doc = Document::default();
    let config = ExportConfig::default();
    let cache = FontCache::new(NoFonts, 4);

    let (fonts, errors) = cache.font_book(&doc).await;
    assert_eq!(errors.len(), 1);
    assert!(fonts.is_empty());

    let mut bundle = MemoryBundle::new();
    let report = export_bundle(&doc, &fonts, cache.fetcher(), &config, &mut bundle)
        .await
        .unwrap();

    let rasters = catalog(&config).len();
    assert_eq!(rasters, 19);
    assert_eq!(bundle.len(), rasters + 2);
    assert_eq!(report.written.len(), bundle.len());
    assert_eq!(report.bundle_name, "brand_kit_brand");

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].starts_with("font Montserrat 700"));
    assert!(!bundle.paths().any(|p| p.starts_with("fonts/")));

    for path in [
        "logos/logo-1024.png",
        "logos/logo.svg",
        "favicons/favicon-32x32.png",
        "favicons/apple-touch-icon.png",
        "ios/ios-120.png",
        "android/android-192.png",
        "README.txt",
    ] {
        assert!(bundle.contains(path), "missing {}", path);
    }

    let text = readme(&bundle);
    assert!(text.contains("Warnings:"));
    assert!(text.contains("  - apple-touch-icon.png (180x180) - iOS Safari bookmark"));
    assert!(!text.contains("/fonts/"));
}

#[tokio::test]
async fn test_png_sizes_match_catalog() {
    let doc = Document::default();
    let config = ExportConfig {
        logo_sizes: vec![64],
        favicon_sizes: vec![16],
        ios_sizes: vec![120],
        android_sizes: vec![48],
        include_fonts: false,
        ..Default::default()
    };
    let mut bundle = MemoryBundle::new();
    export_bundle(&doc, &FontBook::new(), &NoFonts, &config, &mut bundle)
        .await
        .unwrap();

    for (path, size) in [
        ("logos/logo-64.png", 64),
        ("favicons/favicon-16x16.png", 16),
        ("ios/ios-120.png", 120),
        ("android/android-48.png", 48),
    ] {
        let img = image::load_from_memory(bundle.get(path).unwrap()).unwrap();
        assert_eq!((img.width(), img.height()), (size, size), "{}", path);
    }
}

#[tokio::test]
async fn test_legacy_record_exports_to_directory() {
    let json = r##"{
        "logoText": "Acme Labs",
        "letters": [{"char": "A", "color": "#ff0000"}],
        "fontSize": 90,
        "letterSpacing": 4,
        "font": "Open Sans",
        "fontWeight": "600",
        "bgType": "color",
        "bgColor": "#000000"
    }"##;
    let doc = load_record(json).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join(doc.bundle_name());
    let mut writer = DirectoryWriter::new(&root);
    let config = ExportConfig {
        logo_sizes: vec![128],
        favicon_sizes: vec![],
        ios_sizes: vec![],
        android_sizes: vec![],
        ..Default::default()
    };

    let report = export_bundle(&doc, &FontBook::new(), &NoFonts, &config, &mut writer)
        .await
        .unwrap();

    assert_eq!(report.bundle_name, "brand_kit_acme_labs");
    assert!(root.join("logos/logo-128.png").exists());
    assert!(root.join("logos/logo.svg").exists());

    let text = std::fs::read_to_string(root.join("README.txt")).unwrap();
    assert!(text.starts_with("Brand Kit - Acme Labs\n"));
    assert!(text.contains("Font: Open Sans"));
    assert!(text.contains("  Line 1: \"Acme Labs\" (weight: 600, size: 100%, spacing: 4px)"));
    assert!(text.contains("  - #ff0000"));
    assert!(text.contains("  - #000000"));
    assert!(text.contains("font Open Sans 600"));

    let svg = std::fs::read_to_string(root.join("logos/logo.svg")).unwrap();
    assert!(svg.contains(r##"fill="#ff0000""##));
}
