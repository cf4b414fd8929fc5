//! Configuration file management
//!
//! Loads TOML configuration files and provides application settings.
//! Default config path: ~/.config/brandkit/config.toml

use crate::constants::{
    ANDROID_RADIUS, ANDROID_SIZES, APP_ICON_PADDING, DEFAULT_FONT_CACHE_CAPACITY, FAVICON_SIZES,
    IOS_RADIUS, IOS_SIZES, LOGO_PADDING, LOGO_SIZES, SVG_PADDING,
};
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font source settings
    pub fonts: FontsConfig,
    /// Export catalog settings
    pub export: ExportConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Font source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// Directory holding `Family-Name-<weight>.ttf` files (~ is expanded)
    pub dir: String,
    /// Maximum number of parsed faces kept in memory
    pub cache_capacity: usize,
}

/// Export catalog settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Plain logo sizes (logos/logo-<size>.png)
    pub logo_sizes: Vec<u32>,
    /// Favicon sizes (180 is written as apple-touch-icon.png)
    pub favicon_sizes: Vec<u32>,
    /// iOS app icon sizes
    pub ios_sizes: Vec<u32>,
    /// Android app icon sizes
    pub android_sizes: Vec<u32>,
    /// iOS corner radius relative to icon size
    pub ios_radius: f32,
    /// Android corner radius relative to icon size
    pub android_radius: f32,
    /// Logo/favicon padding relative to size
    pub logo_padding: f32,
    /// App icon padding relative to size
    pub app_icon_padding: f32,
    /// SVG padding (pixels)
    pub svg_padding: f32,
    /// Copy TTF files for every weight into the bundle
    pub include_fonts: bool,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory bundles are written into (~ is expanded)
    pub dir: String,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dir: "~/.local/share/brandkit/fonts".to_string(),
            cache_capacity: DEFAULT_FONT_CACHE_CAPACITY,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            logo_sizes: LOGO_SIZES.to_vec(),
            favicon_sizes: FAVICON_SIZES.to_vec(),
            ios_sizes: IOS_SIZES.to_vec(),
            android_sizes: ANDROID_SIZES.to_vec(),
            ios_radius: IOS_RADIUS,
            android_radius: ANDROID_RADIUS,
            logo_padding: LOGO_PADDING,
            app_icon_padding: APP_ICON_PADDING,
            svg_padding: SVG_PADDING,
            include_fonts: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
        }
    }
}

impl Config {
    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        // 1. BRANDKIT_CONFIG environment variable
        if let Ok(path) = std::env::var("BRANDKIT_CONFIG") {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/brandkit/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("brandkit").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
        }

        None
    }

    /// Load configuration with priority:
    /// 1. BRANDKIT_CONFIG environment variable
    /// 2. ~/.config/brandkit/config.toml (user config)
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {}", path.display(), e);
                }
            }
        }
        info!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Commented default config
    pub fn default_template() -> Result<String> {
        let defaults = Config::default();
        let body = toml::to_string_pretty(&defaults)?;
        Ok(format!(
            "# brandkit configuration\n\
             # Location: ~/.config/brandkit/config.toml (or $BRANDKIT_CONFIG)\n\
             #\n\
             # [fonts]   dir: TTF/OTF files named like Open-Sans-700.ttf\n\
             # [export]  sizes, corner radius and padding ratios of the bundle\n\
             # [output]  dir: bundles are written to <dir>/brand_kit_<name>/\n\
             \n{}",
            fix_float_precision(&body)
        ))
    }

    /// Write the default template to ~/.config/brandkit/config.toml
    pub fn write_default_config() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Config directory not found"))?;
        let dir = config_dir.join("brandkit");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join("config.toml");
        std::fs::write(&path, Self::default_template()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Font directory with ~ expanded
    pub fn fonts_dir(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.fonts.dir, None))
    }

    /// Output directory with ~ expanded
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(expand_path(&self.output.dir, None))
    }
}

/// Round f32 noise in TOML output (0.2237 serializes as 0.22370000183582306)
fn fix_float_precision(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let Some((key, value)) = line.split_once(" = ") else {
                return line.to_string();
            };
            match value.parse::<f64>() {
                Ok(v) if value.contains('.') => {
                    let rounded = format!("{:.4}", v);
                    let rounded = rounded.trim_end_matches('0');
                    let rounded = if rounded.ends_with('.') {
                        format!("{}0", rounded)
                    } else {
                        rounded.to_string()
                    };
                    format!("{} = {}", key, rounded)
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path: &str, user_home: Option<&str>) -> String {
    if !path.starts_with('~') {
        return path.to_string();
    }

    // Get home directory: prefer provided value, fallback to dirs
    let home = user_home
        .map(|h| h.to_string())
        .or_else(|| dirs::home_dir().map(|p| p.to_string_lossy().to_string()));

    match home {
        Some(home) if path == "~" => home,
        Some(home) => format!("{}{}", home, &path[1..]),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[export]
ios_sizes = [1024]
include_fonts = false
"#,
        )
        .unwrap();

        assert_eq!(config.export.ios_sizes, vec![1024]);
        assert!(!config.export.include_fonts);
        assert_eq!(config.export.logo_sizes, LOGO_SIZES.to_vec());
        assert_eq!(config.fonts, FontsConfig::default());
    }

    #[test]
    fn test_default_template_parses_back() {
        let template = Config::default_template().unwrap();
        assert!(template.contains("ios_radius = 0.2237"));
        let parsed: Config = toml::from_str(&template).unwrap();
        assert_eq!(parsed.export.logo_sizes, LOGO_SIZES.to_vec());
        assert!((parsed.export.ios_radius - IOS_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ndir = \"/tmp/kits\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.output.dir, "/tmp/kits");

        std::fs::write(&path, "[output\n").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("~/fonts", Some("/home/me")), "/home/me/fonts");
        assert_eq!(expand_path("~", Some("/home/me")), "/home/me");
        assert_eq!(expand_path("/abs", Some("/home/me")), "/abs");
    }
}
