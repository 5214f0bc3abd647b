// The structured music description: the JSON contract between whatever
// interprets the user's request (a language model, a keyword matcher, a
// hand-written file) and the timeline renderer.
//
// Descriptions usually come from a language model, so parsing is lenient
// by construction. `from_value` only fails when the root isn't an object;
// every individual field has a default or is simply absent:
//
// - `genre`: any non-empty string, default "hip-hop"
// - `bpm`: positive number (or numeric string), rounded; default 90
// - `music_type`: drums | chords | melody | mixed, default drums (also for
//   unrecognized labels)
// - `pattern`: voice -> "1,2.3,4" token list. Arrays of scalars and bare
//   numbers are folded into the same comma-separated form.
// - `chords` / `melody`: arrays of strings; non-string entries are dropped
//
// Serde deserialization goes through the same path (`try_from = Value`), so
// `serde_json::from_str::<MusicDescription>` is just as forgiving.

use crate::error::DescriptionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_BPM: u16 = 90;
pub const DEFAULT_GENRE: &str = "hip-hop";

/// Which sub-renderers run for a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicType {
    #[default]
    Drums,
    Chords,
    Melody,
    Mixed,
}

impl MusicType {
    pub const ALL: [MusicType; 4] = [
        MusicType::Drums,
        MusicType::Chords,
        MusicType::Melody,
        MusicType::Mixed,
    ];

    /// Parse a label case-insensitively. Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "drums" => Some(MusicType::Drums),
            "chords" => Some(MusicType::Chords),
            "melody" => Some(MusicType::Melody),
            "mixed" => Some(MusicType::Mixed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MusicType::Drums => "drums",
            MusicType::Chords => "chords",
            MusicType::Melody => "melody",
            MusicType::Mixed => "mixed",
        }
    }

    /// True if a percussion track is produced.
    pub fn has_drums(self) -> bool {
        matches!(self, MusicType::Drums | MusicType::Mixed)
    }

    /// True if a pitched (piano) track is produced.
    pub fn has_pitched(self) -> bool {
        !matches!(self, MusicType::Drums)
    }

    pub fn has_chords(self) -> bool {
        matches!(self, MusicType::Chords | MusicType::Mixed)
    }

    pub fn has_melody(self) -> bool {
        matches!(self, MusicType::Melody | MusicType::Mixed)
    }
}

/// A complete, defaulted music description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct MusicDescription {
    pub genre: String,
    pub bpm: u16,
    pub music_type: MusicType,
    /// Drum voice -> comma-separated beat tokens. Sorted by voice name.
    pub pattern: Option<BTreeMap<String, String>>,
    pub chords: Option<Vec<String>>,
    pub melody: Option<Vec<String>>,
}

impl Default for MusicDescription {
    fn default() -> Self {
        MusicDescription {
            genre: DEFAULT_GENRE.to_string(),
            bpm: DEFAULT_BPM,
            music_type: MusicType::Drums,
            pattern: None,
            chords: None,
            melody: None,
        }
    }
}

impl MusicDescription {
    /// A drums-only description for a bare pattern.
    pub fn drums<K, V>(pattern: impl IntoIterator<Item = (K, V)>, bpm: u16) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MusicDescription {
            bpm: if bpm == 0 { DEFAULT_BPM } else { bpm },
            pattern: Some(
                pattern
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Build a description from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, DescriptionError> {
        let obj = value.as_object().ok_or(DescriptionError::NotAnObject {
            found: json_kind(value),
        })?;
        Ok(Self::from_object(obj))
    }

    pub fn from_json_str(text: &str) -> Result<Self, DescriptionError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Read a description from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DescriptionError> {
        let data = std::fs::read_to_string(path).map_err(|source| DescriptionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let genre = obj
            .get("genre")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_GENRE)
            .to_string();

        let bpm = obj.get("bpm").and_then(parse_bpm).unwrap_or(DEFAULT_BPM);

        let music_type = obj
            .get("music_type")
            .and_then(Value::as_str)
            .and_then(MusicType::from_label)
            .unwrap_or_default();

        let pattern = obj.get("pattern").and_then(Value::as_object).map(|p| {
            p.iter()
                .filter_map(|(voice, hits)| Some((voice.clone(), token_list(hits)?)))
                .collect()
        });

        MusicDescription {
            genre,
            bpm,
            music_type,
            pattern,
            chords: obj.get("chords").and_then(string_list),
            melody: obj.get("melody").and_then(string_list),
        }
    }
}

impl TryFrom<Value> for MusicDescription {
    type Error = DescriptionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        MusicDescription::from_value(&value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A usable tempo, or `None` to fall back to the default.
fn parse_bpm(value: &Value) -> Option<u16> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    let rounded = raw.round();
    if !(1.0..=f64::from(u16::MAX)).contains(&rounded) {
        return None;
    }
    Some(rounded as u16)
}

/// Normalize a pattern entry into its comma-separated token string.
fn token_list(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    })
}
