//! Persisted document records
//!
//! JSON shape of a saved document. Two shapes are accepted forever:
//! - current: `{ lines: [...], baseFontSize, lineSpacing, ... }`
//! - legacy single-line: `{ logoText, letters, fontSize, letterSpacing, ... }`
//!
//! Both are resolved once at load time into a [`Document`]. Absent or
//! unreadable fields take their defaults; only input that is not a JSON
//! object is rejected. Saved records also carry the legacy fields so older
//! readers can still open them.

use crate::constants::{DEFAULT_BASE_FONT_SIZE, DEFAULT_LINE_SPACING, DEFAULT_RELATIVE_SIZE, DEFAULT_TEXT};
use crate::error::RecordError;
use crate::model::{
    AppIconStyle, Background, BackgroundKind, Document, HorizontalAlign, LayerOrder,
    LayoutSettings, Letter, Line,
};
use crate::utils::Color;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Record types
// ============================================================================

/// One letter: `{ "char": "H", "color": "#111111" | null }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterRecord {
    #[serde(rename = "char", default)]
    pub ch: String,
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "lenient")]
    pub letters: Option<Vec<LetterRecord>>,
    /// Relative size (percent)
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    pub letter_spacing: Option<f32>,
    #[serde(
        default,
        deserialize_with = "deserialize_weight",
        serialize_with = "serialize_weight",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_weight: Option<u16>,
}

/// Settings common to both shapes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub font: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_weight",
        serialize_with = "serialize_weight"
    )]
    pub font_weight: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_color: Option<Color>,
    #[serde(default, deserialize_with = "lenient")]
    pub bg_type: Option<BackgroundKind>,
    #[serde(default, deserialize_with = "lenient")]
    pub bg_color: Option<Color>,
    #[serde(default, deserialize_with = "lenient")]
    pub layer_order: Option<LayerOrder>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_icon_bg: Option<Color>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_icon_border: Option<Color>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_icon_border_enabled: Option<bool>,
}

/// Multi-line record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentRecord {
    pub lines: Vec<LineRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub base_font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    pub line_spacing: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    pub horizontal_align: Option<HorizontalAlign>,
    #[serde(flatten)]
    pub style: StyleRecord,
    /// Save time (milliseconds since the Unix epoch)
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Legacy mirror of the first line
    #[serde(flatten)]
    pub legacy: LegacyFields,
}

/// Single-line fields of the legacy shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFields {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub letters: Option<Vec<LetterRecord>>,
    /// Base font size (pixels)
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
}

/// Legacy single-line record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecord {
    #[serde(flatten)]
    pub fields: LegacyFields,
    #[serde(flatten)]
    pub style: StyleRecord,
}

/// Either persisted shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRecord {
    Current(CurrentRecord),
    Legacy(LegacyRecord),
}

// ============================================================================
// Field deserializers
// ============================================================================

/// Deserialize an optional field, treating unreadable values as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!("Ignoring unreadable record value {}: {}", value, e);
            Ok(None)
        }
    }
}

/// Font weight as a number or a numeric string ("700"); "normal"/"bold" map to 400/700
fn deserialize_weight<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct WeightVisitor;

    impl<'de> Visitor<'de> for WeightVisitor {
        type Value = Option<u16>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a font weight number or string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let weight = match value.trim() {
                "normal" => Some(400),
                "bold" => Some(700),
                v => v.parse::<u16>().ok(),
            };
            if weight.is_none() {
                warn!("Ignoring unreadable font weight {:?}", value);
            }
            Ok(weight)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u16::try_from(value).ok())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(u16::try_from(value).ok())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value.is_finite() && (0.0..=u16::MAX as f64).contains(&value) {
                Ok(Some(value.round() as u16))
            } else {
                Ok(None)
            }
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map
                .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                .is_some()
            {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(WeightVisitor)
}

/// Weights are written as strings ("700")
fn serialize_weight<S>(weight: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match weight {
        Some(w) => serializer.serialize_str(&w.to_string()),
        None => serializer.serialize_none(),
    }
}

// ============================================================================
// Upgrade to Document
// ============================================================================

fn to_letters(records: &[LetterRecord]) -> Vec<Letter> {
    records
        .iter()
        .map(|r| Letter {
            // Empty entries keep their slot but never match a character
            ch: r.ch.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
            color: r.color,
        })
        .collect()
}

fn apply_style(style: &StyleRecord, settings: &mut LayoutSettings) {
    let defaults = LayoutSettings::default();

    settings.font_family = style.font.clone().unwrap_or(defaults.font_family);
    settings.font_weight = style.font_weight.unwrap_or(defaults.font_weight);
    settings.default_color = style.default_color.unwrap_or(defaults.default_color);
    settings.background = Background {
        kind: style.bg_type.unwrap_or(defaults.background.kind),
        color: style.bg_color.unwrap_or(defaults.background.color),
    };
    settings.layer_order = style.layer_order.unwrap_or(defaults.layer_order);
    settings.app_icon = AppIconStyle {
        background: style.app_icon_bg.unwrap_or(defaults.app_icon.background),
        border: style.app_icon_border.unwrap_or(defaults.app_icon.border),
        // Only an explicit false disables the border
        border_enabled: style.app_icon_border_enabled.unwrap_or(true),
    };
}

impl LineRecord {
    fn to_line(&self) -> Line {
        let stored = self.letters.as_deref().map(to_letters).unwrap_or_default();
        let mut line = Line::with_letters(&self.text, &stored);
        line.relative_size = self.font_size.unwrap_or(DEFAULT_RELATIVE_SIZE);
        line.letter_spacing = self.letter_spacing.unwrap_or(0.0);
        line.font_weight = self.font_weight;
        line
    }

    fn from_line(line: &Line) -> Self {
        Self {
            text: line.text().to_string(),
            letters: Some(letter_records(line)),
            font_size: Some(line.relative_size),
            letter_spacing: Some(line.letter_spacing),
            font_weight: line.font_weight,
        }
    }
}

fn letter_records(line: &Line) -> Vec<LetterRecord> {
    line.letters()
        .iter()
        .map(|l| LetterRecord {
            ch: l.ch.to_string(),
            color: l.color,
        })
        .collect()
}

impl StoredRecord {
    /// Resolve either shape into a document
    pub fn into_document(self) -> Document {
        let mut settings = LayoutSettings::default();

        match self {
            StoredRecord::Current(record) => {
                apply_style(&record.style, &mut settings);
                settings.base_font_size = record.base_font_size.unwrap_or(DEFAULT_BASE_FONT_SIZE);
                settings.line_spacing = record.line_spacing.unwrap_or(DEFAULT_LINE_SPACING);
                settings.align = record.horizontal_align.unwrap_or_default();

                let lines = record.lines.iter().map(LineRecord::to_line).collect();
                Document::new(lines, settings)
            }
            StoredRecord::Legacy(record) => {
                apply_style(&record.style, &mut settings);
                settings.base_font_size = record.fields.font_size.unwrap_or(DEFAULT_BASE_FONT_SIZE);

                let text = record.fields.logo_text.as_deref().unwrap_or(DEFAULT_TEXT);
                let stored = record.fields.letters.as_deref().map(to_letters).unwrap_or_default();
                let mut line = Line::with_letters(text, &stored);
                line.letter_spacing = record.fields.letter_spacing.unwrap_or(0.0);

                Document::new(vec![line], settings)
            }
        }
    }
}

/// Parse a persisted record of either shape
pub fn load_record(json: &str) -> Result<Document, RecordError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| RecordError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(RecordError::Malformed("expected a JSON object".to_string()));
    }
    let record: StoredRecord =
        serde_json::from_value(value).map_err(|e| RecordError::Malformed(e.to_string()))?;
    Ok(record.into_document())
}

/// Current-shape record for `doc`, stamped with the current time
pub fn to_record(doc: &Document) -> CurrentRecord {
    let s = &doc.settings;
    let first = doc.lines().first();

    CurrentRecord {
        lines: doc.lines().iter().map(LineRecord::from_line).collect(),
        base_font_size: Some(s.base_font_size),
        line_spacing: Some(s.line_spacing),
        horizontal_align: Some(s.align),
        style: StyleRecord {
            font: Some(s.font_family.clone()),
            font_weight: Some(s.font_weight),
            default_color: Some(s.default_color),
            bg_type: Some(s.background.kind),
            bg_color: Some(s.background.color),
            layer_order: Some(s.layer_order),
            app_icon_bg: Some(s.app_icon.background),
            app_icon_border: Some(s.app_icon.border),
            app_icon_border_enabled: Some(s.app_icon.border_enabled),
        },
        timestamp: Some(chrono::Utc::now().timestamp_millis()),
        legacy: LegacyFields {
            logo_text: Some(doc.title().to_string()),
            letters: first.map(letter_records),
            font_size: Some(s.base_font_size),
            letter_spacing: Some(first.map_or(0.0, |l| l.letter_spacing)),
        },
    }
}

/// Serialize `doc` as a pretty-printed current-shape record
pub fn save_record(doc: &Document) -> Result<String, RecordError> {
    serde_json::to_string_pretty(&to_record(doc)).map_err(|e| RecordError::Encode(e.to_string()))
}
