// Offline request interpretation by keyword.
//
// Stands in for the chat model when none is available. The request text is
// lowercased and scanned for:
// 1. a genre phrase, selecting a preset from presets.rs (default hip-hop)
// 2. a music-type word: "mixed", then "chord", then "melody"/"piano", then
//    "drum"/"beat". These match at the start of a word, so "beats" counts
//    but "upbeat" doesn't. Without one the preset's own type is kept.
// 3. an explicit tempo: "120 bpm" or "120bpm"
//
// If the chosen type needs material the preset lacks (e.g. "jazz drums" on a
// chords-only preset), a plain default is filled in so the result is never
// silent.

use crate::collab::PromptParser;
use crate::presets::{BACKBEAT, EIGHTH_HATS, GenrePreset, genre_presets};
use std::collections::BTreeMap;
use tracing::debug;
use voxbeat_music::description::DEFAULT_GENRE;
use voxbeat_music::{MusicDescription, MusicType};

const DEFAULT_CHORDS: [&str; 4] = ["C", "Am", "F", "G"];
const DEFAULT_MELODY: [&str; 4] = ["C4", "E4", "G4", "C5"];

pub struct KeywordParser {
    presets: Vec<GenrePreset>,
}

impl Default for KeywordParser {
    fn default() -> Self {
        KeywordParser {
            presets: genre_presets(),
        }
    }
}

impl KeywordParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn preset_for(&self, text: &str) -> Option<&GenrePreset> {
        self.presets
            .iter()
            .find(|p| p.keywords.iter().any(|k| text.contains(k)))
            .or_else(|| {
                self.presets
                    .iter()
                    .find(|p| p.description.genre == DEFAULT_GENRE)
            })
    }
}

/// Music type named explicitly in the request, if any.
pub fn requested_type(text: &str) -> Option<MusicType> {
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has = |stems: &[&str]| {
        words
            .iter()
            .any(|w| stems.iter().any(|stem| w.starts_with(stem)))
    };

    if has(&["mixed"]) {
        Some(MusicType::Mixed)
    } else if has(&["chord"]) {
        Some(MusicType::Chords)
    } else if has(&["melody", "piano"]) {
        Some(MusicType::Melody)
    } else if has(&["drum", "beat"]) {
        Some(MusicType::Drums)
    } else {
        None
    }
}

/// Tempo written as "<n> bpm" or "<n>bpm", if any and in a sane range.
pub fn requested_bpm(text: &str) -> Option<u16> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.iter().enumerate().find_map(|(i, word)| {
        let digits = if *word == "bpm" {
            *words.get(i.checked_sub(1)?)?
        } else {
            word.strip_suffix("bpm")?
        };
        digits
            .parse::<u16>()
            .ok()
            .filter(|bpm| (20..=300).contains(bpm))
    })
}

fn fill_missing(desc: &mut MusicDescription) {
    let kind = desc.music_type;
    if kind.has_drums() && desc.pattern.is_none() {
        desc.pattern = Some(BTreeMap::from([
            ("kick".to_string(), "1,3".to_string()),
            ("snare".to_string(), BACKBEAT.to_string()),
            ("hats".to_string(), EIGHTH_HATS.to_string()),
        ]));
    }
    let needs_chords = kind.has_chords() && desc.chords.is_none();
    let needs_melody = kind.has_melody() && desc.melody.is_none();
    // Mixed is satisfied by either chords or melody.
    if needs_chords && (kind != MusicType::Mixed || needs_melody) {
        desc.chords = Some(DEFAULT_CHORDS.iter().map(|s| s.to_string()).collect());
    }
    if needs_melody && kind != MusicType::Mixed {
        desc.melody = Some(DEFAULT_MELODY.iter().map(|s| s.to_string()).collect());
    }
}

impl PromptParser for KeywordParser {
    fn parse(&self, text: &str) -> Option<MusicDescription> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        let mut desc = self.preset_for(&text)?.description.clone();
        if let Some(kind) = requested_type(&text) {
            desc.music_type = kind;
        }
        if let Some(bpm) = requested_bpm(&text) {
            desc.bpm = bpm;
        }
        fill_missing(&mut desc);

        debug!(
            genre = desc.genre.as_str(),
            music_type = desc.music_type.label(),
            bpm = desc.bpm,
            "keyword match"
        );
        Some(desc)
    }
}
