//! Global constants for brandkit
//!
//! Consolidates document limits, default styling, and rendering ratios
//! to eliminate magic numbers throughout the codebase.

// ============================================================================
// Document Limits
// ============================================================================

/// Maximum number of text lines in a document
pub const MAX_LINES: usize = 3;

/// Text of the first line in a fresh document
pub const DEFAULT_TEXT: &str = "Brand";

/// Placeholder text for a line created with `add_line`
pub const NEW_LINE_TEXT: &str = "Text";

// ============================================================================
// Default Styling
// ============================================================================

pub const DEFAULT_FONT_FAMILY: &str = "Montserrat";

pub const DEFAULT_FONT_WEIGHT: u16 = 700;

/// Base font size (pixels)
pub const DEFAULT_BASE_FONT_SIZE: f32 = 100.0;

/// Inter-line spacing (pixels)
pub const DEFAULT_LINE_SPACING: f32 = 10.0;

/// Line size relative to the base font size (percent)
pub const DEFAULT_RELATIVE_SIZE: f32 = 100.0;

pub const DEFAULT_TEXT_COLOR: &str = "#333333";

pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

pub const DEFAULT_APP_ICON_BACKGROUND: &str = "#ffffff";

pub const DEFAULT_APP_ICON_BORDER: &str = "#e0e0e0";

// ============================================================================
// Layout Constants
// ============================================================================

/// Ascent of a line without ink, relative to its font size
pub const EMPTY_LINE_ASCENT: f32 = 0.8;

/// Descent of a line without ink, relative to its font size
pub const EMPTY_LINE_DESCENT: f32 = 0.2;

/// Minimum descent of a line, relative to its font size.
/// Keeps all-caps lines from collapsing the vertical rhythm.
pub const MIN_DESCENT_RATIO: f32 = 0.15;

/// Minimum width of an SVG document (pixels)
pub const SVG_MIN_WIDTH: f32 = 200.0;

// ============================================================================
// Rendering Constants
// ============================================================================

/// Logo padding relative to surface size
pub const LOGO_PADDING: f32 = 0.075;

/// App icon padding relative to surface size
pub const APP_ICON_PADDING: f32 = 0.15;

/// SVG padding (pixels, not scaled)
pub const SVG_PADDING: f32 = 40.0;

/// iOS corner radius relative to icon size (Apple standard 22.37%)
pub const IOS_RADIUS: f32 = 0.2237;

/// Android corner radius relative to icon size (Material)
pub const ANDROID_RADIUS: f32 = 0.15;

/// App icon border width is `size / BORDER_WIDTH_DIVISOR`, at least 1px
pub const BORDER_WIDTH_DIVISOR: f32 = 120.0;

/// Anti-aliasing width for rounded-rectangle edges (pixels)
pub const AA_WIDTH: f32 = 1.0;

/// Coverage below this is treated as empty
pub const ALPHA_THRESHOLD: f32 = 0.002;

// ============================================================================
// Export Catalog
// ============================================================================

pub const LOGO_SIZES: [u32; 4] = [1024, 512, 256, 128];

pub const FAVICON_SIZES: [u32; 4] = [16, 32, 48, 180];

/// Favicon size exported as `apple-touch-icon.png`
pub const APPLE_TOUCH_SIZE: u32 = 180;

pub const IOS_SIZES: [u32; 5] = [1024, 180, 167, 152, 120];

pub const ANDROID_SIZES: [u32; 6] = [512, 192, 144, 96, 72, 48];

/// Preview thumbnails: (name, rendered size in pixels).
/// Named after the export size they stand in for.
pub const PREVIEW_TARGETS: [(&str, u32); 7] = [
    ("preview512", 128),
    ("preview256", 64),
    ("preview128", 32),
    ("preview64", 32),
    ("preview32", 32),
    ("preview16", 16),
    ("favicon", 16),
];

/// App icon preview size (pixels)
pub const APP_ICON_PREVIEW_SIZE: u32 = 120;

/// Font files shorter than this are rejected as truncated
pub const MIN_FONT_FILE_LEN: usize = 100;

/// Default font cache capacity (parsed faces)
pub const DEFAULT_FONT_CACHE_CAPACITY: usize = 16;
