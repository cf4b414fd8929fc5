//! Text files of a bundle: README.txt and fonts/LICENSE.txt

use crate::export::RasterAsset;
use crate::model::Document;
use std::fmt::Write as _;

/// Folders in the order the README lists them
const FOLDERS: [&str; 5] = ["logos", "favicons", "ios", "android", "fonts"];

/// Short description of a catalog entry
fn describe(folder: &str, size: u32) -> Option<&'static str> {
    let text = match (folder, size) {
        ("logos", 1024) => "Full size logo",
        ("favicons", 16) => "Browser tab icon",
        ("favicons", 32) => "Browser tab icon (retina)",
        ("favicons", 48) => "Windows site icon",
        ("favicons", 180) => "iOS Safari bookmark",
        ("ios", 1024) => "App Store (required)",
        ("ios", 180) => "iPhone @3x",
        ("ios", 167) => "iPad Pro",
        ("ios", 152) => "iPad",
        ("ios", 120) => "iPhone @2x",
        ("android", 512) => "Play Store (required)",
        ("android", 192) => "xxxhdpi launcher",
        ("android", 144) => "xxhdpi launcher",
        ("android", 96) => "xhdpi launcher",
        ("android", 72) => "hdpi launcher",
        ("android", 48) => "mdpi launcher",
        _ => return None,
    };
    Some(text)
}

fn weight_list(doc: &Document) -> String {
    doc.weights()
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Google Fonts specimen URL of `family`
fn specimen_url(family: &str) -> String {
    let name: Vec<&str> = family.split_whitespace().collect();
    format!("https://fonts.google.com/specimen/{}", name.join("+"))
}

/// Bundle README.
///
/// `written` lists bundle paths actually produced; the contents section
/// only mentions those. `warnings` are skipped assets.
pub fn readme(
    doc: &Document,
    assets: &[RasterAsset],
    written: &[String],
    warnings: &[String],
) -> String {
    let s = &doc.settings;
    let title = doc.title();
    let mut out = String::new();

    let _ = writeln!(out, "Brand Kit - {}", title);
    out.push_str("================================\n\n");
    let _ = writeln!(out, "Font: {}", s.font_family);
    let _ = writeln!(out, "Weights used: {}\n", weight_list(doc));

    out.push_str("Lines:\n------\n");
    for (i, line) in doc.lines().iter().enumerate() {
        let _ = writeln!(
            out,
            "  Line {}: \"{}\" (weight: {}, size: {}%, spacing: {}px)",
            i + 1,
            line.text(),
            doc.weight_of(line),
            line.relative_size,
            line.letter_spacing
        );
    }

    out.push_str("\nColors:\n-------\n");
    for color in doc.palette() {
        let _ = writeln!(out, "  - {}", color);
    }

    out.push_str("\nContents:\n---------\n");
    let is_written = |path: &str| written.iter().any(|w| w == path);
    for folder in FOLDERS {
        let mut entries: Vec<String> = Vec::new();

        for asset in assets.iter().filter(|a| a.folder == folder) {
            if !is_written(&asset.path()) {
                continue;
            }
            let size = asset.target.size;
            let entry = match describe(folder, size) {
                Some(text) => format!("  - {} ({}x{}) - {}", asset.name, size, size, text),
                None => format!("  - {} ({}x{})", asset.name, size, size),
            };
            entries.push(entry);
        }

        let prefix = format!("{}/", folder);
        for path in written.iter().filter(|p| p.starts_with(&prefix)) {
            let name = &path[prefix.len()..];
            if assets.iter().any(|a| a.path() == *path) {
                continue;
            }
            let entry = if name.ends_with(".svg") {
                format!("  - {} - Vector format (scalable)", name)
            } else if name.ends_with(".ttf") {
                format!("  - {} - Font file", name)
            } else if name == "LICENSE.txt" {
                format!("  - {} - Font license information", name)
            } else {
                format!("  - {}", name)
            };
            entries.push(entry);
        }

        if !entries.is_empty() {
            let _ = writeln!(out, "\n/{}/", folder);
            for entry in entries {
                let _ = writeln!(out, "{}", entry);
            }
        }
    }

    out.push_str(
        "\n\nUsage:\n------\n\n\
         Web Favicons - Add to your HTML <head>:\n\n  \
         <link rel=\"icon\" type=\"image/png\" sizes=\"32x32\" href=\"/favicon-32x32.png\">\n  \
         <link rel=\"icon\" type=\"image/png\" sizes=\"16x16\" href=\"/favicon-16x16.png\">\n  \
         <link rel=\"apple-touch-icon\" sizes=\"180x180\" href=\"/apple-touch-icon.png\">\n\n\
         iOS App Store:\n  \
         Use ios-1024.png for App Store Connect submission.\n  \
         Xcode will use the other sizes for device icons.\n\n\
         Android / Google Play:\n  \
         Use android-512.png for Play Store submission.\n  \
         Place other sizes in res/mipmap-* folders.\n\n\
         SVG Logo:\n  \
         Use logo.svg for websites, print, or any scalable usage.\n  \
         The SVG contains vector paths (not embedded fonts).\n",
    );

    if written.iter().any(|p| p.ends_with(".ttf")) {
        out.push_str(
            "\nFont:\n  \
             Install the TTF file to use the same font in other apps.\n  \
             See fonts/LICENSE.txt for terms.\n",
        );
    }

    if !warnings.is_empty() {
        out.push_str("\nWarnings:\n---------\n");
        for warning in warnings {
            let _ = writeln!(out, "  - {}", warning);
        }
    }

    out
}

/// fonts/LICENSE.txt
pub fn font_license(doc: &Document) -> String {
    let family = &doc.settings.font_family;
    let url = specimen_url(family);
    format!(
        "Font: {family}\n\
         Weights: {weights}\n\
         Source: Google Fonts ({url})\n\n\
         License:\n\
         --------\n\
         This font is distributed under the Open Font License (OFL) or Apache 2.0.\n\
         You can use it freely in your personal and commercial projects.\n\n\
         For more information about this font's specific license,\n\
         visit: {url}#license\n",
        weights = weight_list(doc),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::export::catalog;

    #[test]
    fn test_readme_lists_written_files_only() {
        let doc = Document::default();
        let assets = catalog(&ExportConfig::default());
        let written = vec![
            "logos/logo-1024.png".to_string(),
            "logos/logo.svg".to_string(),
            "ios/ios-180.png".to_string(),
        ];

        let text = readme(&doc, &assets, &written, &[]);
        assert!(text.starts_with("Brand Kit - Brand\n"));
        assert!(text.contains("Weights used: 700"));
        assert!(text.contains("  Line 1: \"Brand\" (weight: 700, size: 100%, spacing: 0px)"));
        assert!(text.contains("  - logo-1024.png (1024x1024) - Full size logo"));
        assert!(text.contains("  - logo.svg - Vector format (scalable)"));
        assert!(text.contains("  - ios-180.png (180x180) - iPhone @3x"));
        assert!(!text.contains("logo-512.png"));
        assert!(!text.contains("/android/"));
        assert!(!text.contains("Warnings:"));
    }

    #[test]
    fn test_readme_warnings_section() {
        let doc = Document::default();
        let warnings = vec!["font Montserrat 700: not found".to_string()];
        let text = readme(&doc, &[], &[], &warnings);
        assert!(text.contains("Warnings:\n---------\n  - font Montserrat 700: not found\n"));
    }

    #[test]
    fn test_font_license() {
        let mut doc = Document::default();
        doc.settings.font_family = "Open Sans".to_string();
        let text = font_license(&doc);
        assert!(text.starts_with("Font: Open Sans\nWeights: 700\n"));
        assert!(text.contains("https://fonts.google.com/specimen/Open+Sans#license"));
    }
}
