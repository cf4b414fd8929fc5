//! Styled-text document
//!
//! A [`Document`] holds 1..=[`MAX_LINES`] lines plus the global
//! [`LayoutSettings`]. Every line keeps one [`Letter`] per codepoint of its
//! text; letter colors survive a text edit only where the character at the
//! same index is unchanged (strict positional diff).

pub mod record;

use crate::constants::{
    DEFAULT_APP_ICON_BACKGROUND, DEFAULT_APP_ICON_BORDER, DEFAULT_BACKGROUND_COLOR,
    DEFAULT_BASE_FONT_SIZE, DEFAULT_FONT_FAMILY, DEFAULT_FONT_WEIGHT, DEFAULT_LINE_SPACING,
    DEFAULT_RELATIVE_SIZE, DEFAULT_TEXT, DEFAULT_TEXT_COLOR, MAX_LINES, NEW_LINE_TEXT,
};
use crate::utils::Color;
use log::warn;
use serde::{Deserialize, Serialize};

pub use record::{load_record, save_record, to_record, StoredRecord};

// ============================================================================
// Letters and lines
// ============================================================================

/// One codepoint of a line with an optional color override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub ch: char,
    /// `None` inherits the document default color at render time
    pub color: Option<Color>,
}

impl Letter {
    pub fn new(ch: char) -> Self {
        Self { ch, color: None }
    }
}

/// Rebuild letters for `text`, keeping a color only where `old` has the
/// same character at the same index
fn carry_colors(old: &[Letter], text: &str) -> Vec<Letter> {
    text.chars()
        .enumerate()
        .map(|(i, ch)| Letter {
            ch,
            color: old.get(i).filter(|l| l.ch == ch).and_then(|l| l.color),
        })
        .collect()
}

/// One line of text
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    text: String,
    letters: Vec<Letter>,
    /// Size relative to the base font size (percent)
    pub relative_size: f32,
    /// Extra space between letters (pixels, may be negative)
    pub letter_spacing: f32,
    /// Per-line weight override
    pub font_weight: Option<u16>,
}

impl Line {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            letters: text.chars().map(Letter::new).collect(),
            relative_size: DEFAULT_RELATIVE_SIZE,
            letter_spacing: 0.0,
            font_weight: None,
        }
    }

    /// Line whose colors come from previously stored letters
    pub fn with_letters(text: &str, stored: &[Letter]) -> Self {
        let mut line = Self::new(text);
        line.letters = carry_colors(stored, text);
        line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Replace the text. A letter keeps its color iff the old letter at the
    /// same index had the same character; inserting mid-string shifts colors.
    pub fn set_text(&mut self, text: &str) {
        self.letters = carry_colors(&self.letters, text);
        self.text = text.to_string();
    }

    /// Set or clear (`None` = inherit) the color of the letter at `index`.
    /// Returns false when `index` is out of range.
    pub fn set_letter_color(&mut self, index: usize, color: Option<Color>) -> bool {
        match self.letters.get_mut(index) {
            Some(letter) => {
                letter.color = color;
                true
            }
            None => false,
        }
    }

    /// Font size in pixels for `base_font_size`
    pub fn effective_size(&self, base_font_size: f32) -> f32 {
        self.relative_size / 100.0 * base_font_size
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Z-order of overlapping glyphs (positions stay left to right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayerOrder {
    /// Left glyph painted on top
    #[serde(rename = "left-over-right", alias = "left")]
    LeftOverRight,
    /// Right glyph painted on top
    #[default]
    #[serde(rename = "right-over-left", alias = "right")]
    RightOverLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Transparent,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub kind: BackgroundKind,
    /// Fill color, kept while the background is transparent
    pub color: Color,
}

impl Background {
    /// Fill color, or `None` when transparent
    pub fn fill(&self) -> Option<Color> {
        match self.kind {
            BackgroundKind::Transparent => None,
            BackgroundKind::Color => Some(self.color),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Transparent,
            color: Color::parse_or(DEFAULT_BACKGROUND_COLOR, Color::WHITE),
        }
    }
}

/// Rounded app-icon styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppIconStyle {
    pub background: Color,
    pub border: Color,
    pub border_enabled: bool,
}

impl Default for AppIconStyle {
    fn default() -> Self {
        Self {
            background: Color::parse_or(DEFAULT_APP_ICON_BACKGROUND, Color::WHITE),
            border: Color::parse_or(DEFAULT_APP_ICON_BORDER, Color::WHITE),
            border_enabled: true,
        }
    }
}

/// Settings shared by every line
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub font_family: String,
    pub font_weight: u16,
    /// Base font size (pixels)
    pub base_font_size: f32,
    /// Gap between one line's descent and the next line's ascent (pixels)
    pub line_spacing: f32,
    pub align: HorizontalAlign,
    pub default_color: Color,
    pub background: Background,
    pub layer_order: LayerOrder,
    pub app_icon: AppIconStyle,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            align: HorizontalAlign::default(),
            default_color: Color::parse_or(DEFAULT_TEXT_COLOR, Color::BLACK),
            background: Background::default(),
            layer_order: LayerOrder::default(),
            app_icon: AppIconStyle::default(),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// Lines plus global settings
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    lines: Vec<Line>,
    pub settings: LayoutSettings,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Line::new(DEFAULT_TEXT)],
            settings: LayoutSettings::default(),
        }
    }
}

impl Document {
    /// Document from `lines`. Extra lines past the cap are dropped, an empty
    /// list gets the default line.
    pub fn new(mut lines: Vec<Line>, settings: LayoutSettings) -> Self {
        if lines.is_empty() {
            lines.push(Line::new(DEFAULT_TEXT));
        }
        if lines.len() > MAX_LINES {
            warn!(
                "Document has {} lines, keeping the first {}",
                lines.len(),
                MAX_LINES
            );
            lines.truncate(MAX_LINES);
        }
        Self { lines, settings }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    /// Append a line with placeholder text. Returns false at the line cap.
    pub fn add_line(&mut self) -> bool {
        if self.lines.len() >= MAX_LINES {
            return false;
        }
        self.lines.push(Line::new(NEW_LINE_TEXT));
        true
    }

    /// Remove the line at `index`. Never removes the last remaining line.
    pub fn remove_line(&mut self, index: usize) -> bool {
        if self.lines.len() <= 1 || index >= self.lines.len() {
            return false;
        }
        self.lines.remove(index);
        true
    }

    /// [`Line::set_text`] on line `index`
    pub fn set_text(&mut self, index: usize, text: &str) -> bool {
        match self.lines.get_mut(index) {
            Some(line) => {
                line.set_text(text);
                true
            }
            None => false,
        }
    }

    /// [`Line::set_letter_color`] on line `line`
    pub fn set_letter_color(&mut self, line: usize, index: usize, color: Option<Color>) -> bool {
        self.lines
            .get_mut(line)
            .is_some_and(|l| l.set_letter_color(index, color))
    }

    /// Text of every line joined without separators (font cache key)
    pub fn concatenated_text(&self) -> String {
        self.lines.iter().map(|l| l.text()).collect()
    }

    /// Effective weight of the line at `index`
    pub fn line_weight(&self, index: usize) -> u16 {
        self.lines
            .get(index)
            .and_then(|l| l.font_weight)
            .unwrap_or(self.settings.font_weight)
    }

    /// Weight of `line`, falling back to the global weight
    pub fn weight_of(&self, line: &Line) -> u16 {
        line.font_weight.unwrap_or(self.settings.font_weight)
    }

    /// Distinct weights used by any line, ascending
    pub fn weights(&self) -> Vec<u16> {
        let mut weights: Vec<u16> = self.lines.iter().map(|l| self.weight_of(l)).collect();
        weights.sort_unstable();
        weights.dedup();
        weights
    }

    /// Render color of `letter`
    pub fn resolve_color(&self, letter: &Letter) -> Color {
        letter.color.unwrap_or(self.settings.default_color)
    }

    /// Colors a brand kit uses, in first-use order: the default color,
    /// letter overrides, the background (when filled) and the app icon colors
    pub fn palette(&self) -> Vec<Color> {
        let s = &self.settings;
        let letters = self
            .lines
            .iter()
            .flat_map(|l| l.letters())
            .filter_map(|l| l.color);
        let border = s.app_icon.border_enabled.then_some(s.app_icon.border);

        let mut colors = Vec::new();
        for color in std::iter::once(s.default_color)
            .chain(letters)
            .chain(s.background.fill())
            .chain(std::iter::once(s.app_icon.background))
            .chain(border)
        {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }

    /// Text of the first line, or the default text when it is empty
    pub fn title(&self) -> &str {
        self.lines
            .first()
            .map(|l| l.text())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TEXT)
    }

    /// Bundle name: `brand_kit_` + lowercased title. Runs of whitespace,
    /// path separators and other characters outside `[alnum . -]` become
    /// one `_`, so the name is always a single path component.
    pub fn bundle_name(&self) -> String {
        let title = self.title().to_lowercase();
        let mut name = String::from("brand_kit_");
        let mut in_gap = false;
        for ch in title.chars() {
            if ch.is_alphanumeric() || ch == '-' || ch == '.' {
                name.push(ch);
                in_gap = false;
            } else {
                if !in_gap {
                    name.push('_');
                }
                in_gap = true;
            }
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(255, 0, 0)
    }

    #[test]
    fn test_letters_track_codepoints() {
        let mut line = Line::new("Brand");
        assert_eq!(line.letters().len(), 5);

        line.set_text("héllo 🙂");
        assert_eq!(line.letters().len(), line.text().chars().count());
        assert_eq!(line.letters()[6].ch, '🙂');

        line.set_text("");
        assert!(line.is_empty());
    }

    #[test]
    fn test_colors_survive_appending() {
        let mut line = Line::new("Brand");
        for i in 0..5 {
            assert!(line.set_letter_color(i, Some(red())));
        }

        line.set_text("Brandy");
        for i in 0..5 {
            assert_eq!(line.letters()[i].color, Some(red()));
        }
        assert_eq!(line.letters()[5].color, None);
    }

    #[test]
    fn test_colors_are_positional() {
        let mut line = Line::new("abc");
        line.set_letter_color(1, Some(red()));
        line.set_letter_color(2, Some(red()));

        // Insert at the front: every index now holds a different char
        line.set_text("xabc");
        assert!(line.letters().iter().all(|l| l.color.is_none()));
    }

    #[test]
    fn test_set_letter_color_out_of_range() {
        let mut line = Line::new("ab");
        assert!(!line.set_letter_color(2, Some(red())));
        assert!(line.set_letter_color(0, None));
    }

    #[test]
    fn test_inherited_color_follows_default() {
        let mut doc = Document::default();
        let letter = doc.lines()[0].letters()[0];
        assert_eq!(doc.resolve_color(&letter), Color::rgb(0x33, 0x33, 0x33));

        doc.settings.default_color = red();
        assert_eq!(doc.resolve_color(&letter), red());
    }

    #[test]
    fn test_line_count_bounds() {
        let mut doc = Document::default();
        assert!(!doc.remove_line(0));

        assert!(doc.add_line());
        assert_eq!(doc.lines()[1].text(), "Text");
        assert!(doc.add_line());
        assert!(!doc.add_line());
        assert_eq!(doc.lines().len(), MAX_LINES);

        assert!(doc.remove_line(1));
        assert!(!doc.remove_line(5));
        assert_eq!(doc.lines().len(), 2);
    }

    #[test]
    fn test_new_truncates_and_fills() {
        let lines = (0..5).map(|i| Line::new(&i.to_string())).collect();
        let doc = Document::new(lines, LayoutSettings::default());
        assert_eq!(doc.lines().len(), MAX_LINES);

        let doc = Document::new(Vec::new(), LayoutSettings::default());
        assert_eq!(doc.lines()[0].text(), "Brand");
    }

    #[test]
    fn test_weights_are_unique_and_sorted() {
        let mut doc = Document::default();
        doc.add_line();
        doc.add_line();
        doc.line_mut(1).unwrap().font_weight = Some(400);
        doc.line_mut(2).unwrap().font_weight = Some(700);
        assert_eq!(doc.weights(), vec![400, 700]);
        assert_eq!(doc.line_weight(0), 700);
        assert_eq!(doc.line_weight(1), 400);
    }

    #[test]
    fn test_bundle_name() {
        let mut doc = Document::default();
        doc.set_text(0, "My  Cool\tBrand");
        assert_eq!(doc.bundle_name(), "brand_kit_my_cool_brand");

        doc.set_text(0, "");
        assert_eq!(doc.bundle_name(), "brand_kit_brand");

        doc.set_text(0, "Acme.io");
        assert_eq!(doc.bundle_name(), "brand_kit_acme.io");
    }

    #[test]
    fn test_bundle_name_is_one_path_component() {
        let mut doc = Document::default();
        for title in ["../../../tmp/evil", "a/b\\c", "/etc", "..", "x:y*z?"] {
            doc.set_text(0, title);
            let name = doc.bundle_name();
            assert!(!name.contains('/') && !name.contains('\\'), "{}", name);

            let joined = std::path::Path::new("/out").join(&name);
            let mut parts = joined.components();
            assert_eq!(parts.next(), Some(std::path::Component::RootDir));
            assert_eq!(parts.next().map(|c| c.as_os_str().to_os_string()), Some("out".into()));
            assert_eq!(
                parts.next(),
                Some(std::path::Component::Normal(name.as_ref()))
            );
            assert_eq!(parts.next(), None);
        }

        doc.set_text(0, "../../../tmp/evil");
        assert_eq!(doc.bundle_name(), "brand_kit_.._.._.._tmp_evil");
    }

    #[test]
    fn test_palette() {
        let mut doc = Document::default();
        doc.set_letter_color(0, 2, Some(red()));
        doc.set_letter_color(0, 3, Some(red()));

        let palette = doc.palette();
        assert_eq!(
            palette,
            vec![
                Color::rgb(0x33, 0x33, 0x33),
                red(),
                Color::WHITE,
                Color::rgb(0xe0, 0xe0, 0xe0),
            ]
        );

        doc.settings.app_icon.border_enabled = false;
        assert_eq!(doc.palette().len(), 3);
    }

    #[test]
    fn test_effective_size() {
        let mut line = Line::new("A");
        line.relative_size = 50.0;
        assert!((line.effective_size(120.0) - 60.0).abs() < 1e-4);
    }
}
