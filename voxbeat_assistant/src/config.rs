// Assistant configuration.
//
// Loaded from an optional JSON file; every field has a default, so a file
// only needs the keys it wants to change:
//
//   { "output_dir": "out", "recording": { "duration_secs": 10 } }
//
// Output files are named `<output_dir>/<stem>.mid` where the stem is either
// a caller-supplied name or `<genre>_beat`.

use crate::error::AssistantError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Microphone capture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Length used when the caller doesn't ask for one.
    pub duration_secs: u32,
    pub sample_rate: u32,
    /// Accepted range for requested durations (inclusive).
    pub min_secs: u32,
    pub max_secs: u32,
    /// Length used when a requested duration is out of range.
    pub fallback_secs: u32,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        RecordingConfig {
            duration_secs: 15,
            sample_rate: 44_100,
            min_secs: 5,
            max_secs: 60,
            fallback_secs: 10,
        }
    }
}

impl RecordingConfig {
    /// The duration to actually record for a request.
    pub fn resolve_duration(&self, requested: Option<u32>) -> u32 {
        let secs = requested.unwrap_or(self.duration_secs);
        if (self.min_secs..=self.max_secs).contains(&secs) {
            secs
        } else {
            warn!(
                requested = secs,
                min = self.min_secs,
                max = self.max_secs,
                fallback = self.fallback_secs,
                "recording duration out of range"
            );
            self.fallback_secs
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub output_dir: PathBuf,
    pub recording: RecordingConfig,
    /// Seed for fallback selection; random when absent.
    pub fallback_seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            output_dir: PathBuf::from("midi_output"),
            recording: RecordingConfig::default(),
            fallback_seed: None,
        }
    }
}

impl AssistantConfig {
    pub fn load(path: &Path) -> Result<Self, AssistantError> {
        let data = std::fs::read_to_string(path).map_err(|source| AssistantError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&data).map_err(|source| AssistantError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given. A missing file falls back to defaults; a file
    /// that exists but doesn't parse is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AssistantError> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                warn!(path = %p.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Where to write the MIDI file for a piece.
    pub fn output_path(&self, genre: &str, custom_name: Option<&str>) -> PathBuf {
        let stem = match custom_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.strip_suffix(".mid").unwrap_or(name).to_string(),
            None => format!("{genre}_beat"),
        };
        self.output_dir.join(format!("{}.mid", file_stem(&stem)))
    }
}

/// Make a string safe to use as a single path component.
fn file_stem(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "untitled".to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("midi_output"));
        assert_eq!(config.recording.duration_secs, 15);
        assert_eq!(config.recording.sample_rate, 44_100);
        assert_eq!(config.fallback_seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"output_dir": "out", "recording": {"duration_secs": 8}}"#;
        let config: AssistantConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.recording.duration_secs, 8);
        assert_eq!(config.recording.max_secs, 60);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = AssistantConfig {
            fallback_seed: Some(42),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AssistantConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_duration_resolution() {
        let rec = RecordingConfig::default();
        assert_eq!(rec.resolve_duration(None), 15);
        assert_eq!(rec.resolve_duration(Some(5)), 5);
        assert_eq!(rec.resolve_duration(Some(60)), 60);
        assert_eq!(rec.resolve_duration(Some(4)), 10);
        assert_eq!(rec.resolve_duration(Some(61)), 10);
    }

    #[test]
    fn test_output_paths() {
        let config = AssistantConfig::default();
        assert_eq!(
            config.output_path("trap", None),
            PathBuf::from("midi_output/trap_beat.mid")
        );
        assert_eq!(
            config.output_path("trap", Some("my song")),
            PathBuf::from("midi_output/my_song.mid")
        );
        assert_eq!(
            config.output_path("trap", Some("take2.mid")),
            PathBuf::from("midi_output/take2.mid")
        );
        assert_eq!(
            config.output_path("lo-fi/jazz", Some("  ")),
            PathBuf::from("midi_output/lo-fi_jazz_beat.mid")
        );
        assert_eq!(
            config.output_path("x", Some("..")),
            PathBuf::from("midi_output/untitled.mid")
        );
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let config = AssistantConfig::load_or_default(Some(&missing)).unwrap();
        assert_eq!(config, AssistantConfig::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            AssistantConfig::load_or_default(Some(&bad)),
            Err(AssistantError::ConfigParse { .. })
        ));
    }
}
