// Canned music descriptions.
//
// Three groups:
// - `malformed_reply_fallbacks`: full descriptions (drums, chords, melody,
//   mixed) substituted when the model answers with something that isn't
//   JSON.
// - `call_failed_fallbacks`: drum-only grooves substituted when the model
//   can't be reached at all. These carry no `music_type`, so they render as
//   drums.
// - `genre_presets`: one starting point per recognized genre, used by the
//   offline keyword parser.
//
// Some fallback patterns deliberately contain off-grid tokens such as "1.5";
// the renderer drops those, which keeps the groove sparse.

use std::collections::BTreeMap;
use voxbeat_music::{MusicDescription, MusicType};

pub const EIGHTH_HATS: &str = "1.2,1.4,2.2,2.4,3.2,3.4,4.2,4.4";
pub const SIXTEENTH_HATS: &str = "1,1.2,1.3,1.4,2,2.2,2.3,2.4,3,3.2,3.3,3.4,4,4.2,4.3,4.4";
pub const BACKBEAT: &str = "2,4";

/// Build a description from borrowed parts.
pub fn preset(
    genre: &str,
    bpm: u16,
    music_type: MusicType,
    pattern: &[(&str, &str)],
    chords: Option<&[&str]>,
    melody: Option<&[&str]>,
) -> MusicDescription {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    MusicDescription {
        genre: genre.to_string(),
        bpm,
        music_type,
        pattern: (!pattern.is_empty()).then(|| {
            pattern
                .iter()
                .map(|&(voice, hits)| (voice.to_string(), hits.to_string()))
                .collect::<BTreeMap<_, _>>()
        }),
        chords: chords.map(owned),
        melody: melody.map(owned),
    }
}

fn straight_groove(kick: &'static str) -> [(&'static str, &'static str); 3] {
    [("kick", kick), ("snare", BACKBEAT), ("hats", EIGHTH_HATS)]
}

/// Substitutes for a reply that could not be parsed as JSON.
pub fn malformed_reply_fallbacks() -> Vec<MusicDescription> {
    vec![
        preset(
            "jazz",
            120,
            MusicType::Chords,
            &straight_groove("1,3"),
            Some(&["Cmaj7", "Dm7", "G7", "Cmaj7"]),
            None,
        ),
        preset(
            "trap",
            140,
            MusicType::Drums,
            &straight_groove("1,1.5,2,2.5,3,3.5,4,4.5"),
            None,
            None,
        ),
        preset(
            "lo-fi",
            85,
            MusicType::Mixed,
            &straight_groove("1,3"),
            Some(&["Am", "F", "C", "G"]),
            Some(&["A4", "C5", "E5", "F5"]),
        ),
        preset(
            "classical",
            90,
            MusicType::Melody,
            &straight_groove("1,3"),
            None,
            Some(&["C4", "E4", "G4", "A4", "C5"]),
        ),
    ]
}

/// Substitutes for a chat call that failed outright.
pub fn call_failed_fallbacks() -> Vec<MusicDescription> {
    [
        ("trap", 140, "1,1.5,2,2.5,3,3.5,4,4.5"),
        ("lo-fi", 85, "1,3"),
        ("house", 128, "1,2,3,4"),
        ("hip-hop", 90, "1,1.3,2,2.3"),
    ]
    .into_iter()
    .map(|(genre, bpm, kick)| {
        preset(
            genre,
            bpm,
            MusicType::Drums,
            &straight_groove(kick),
            None,
            None,
        )
    })
    .collect()
}

/// A genre the keyword parser recognizes, with the phrases that select it.
pub struct GenrePreset {
    pub keywords: &'static [&'static str],
    pub description: MusicDescription,
}

/// Starting points per genre. Tempos sit inside each genre's usual range.
pub fn genre_presets() -> Vec<GenrePreset> {
    vec![
        GenrePreset {
            keywords: &["jazz", "swing", "bebop"],
            description: preset(
                "jazz",
                130,
                MusicType::Chords,
                &straight_groove("1,3"),
                Some(&["Dm7", "G7", "Cmaj7", "Cmaj7"]),
                Some(&["D4", "F4", "A4", "B4", "E5", "C5"]),
            ),
        },
        GenrePreset {
            keywords: &["lo-fi", "lofi", "lo fi", "chill"],
            description: preset(
                "lo-fi",
                85,
                MusicType::Mixed,
                &straight_groove("1,2.3,3"),
                Some(&["Am", "F", "C", "G"]),
                Some(&["A4", "C5", "E5", "F5"]),
            ),
        },
        GenrePreset {
            keywords: &["trap"],
            description: preset(
                "trap",
                145,
                MusicType::Drums,
                &[
                    ("kick", "1,1.4,2.3,3.3"),
                    ("snare", "3"),
                    ("hats", SIXTEENTH_HATS),
                ],
                None,
                None,
            ),
        },
        GenrePreset {
            keywords: &["house", "four on the floor", "four-on-the-floor"],
            description: preset(
                "house",
                128,
                MusicType::Drums,
                &[
                    ("kick", "1,2,3,4"),
                    ("clap", BACKBEAT),
                    ("hats", "1.3,2.3,3.3,4.3"),
                ],
                None,
                None,
            ),
        },
        GenrePreset {
            keywords: &[
                "hip-hop", "hip hop", "hiphop", "boom bap", "boom-bap", "rap",
            ],
            description: preset(
                "hip-hop",
                90,
                MusicType::Drums,
                &straight_groove("1,1.3,2,2.3"),
                None,
                None,
            ),
        },
        GenrePreset {
            keywords: &["classical", "orchestral", "baroque"],
            description: preset(
                "classical",
                90,
                MusicType::Melody,
                &[],
                Some(&["C", "F", "G", "C"]),
                Some(&["C4", "E4", "G4", "A4", "C5"]),
            ),
        },
        GenrePreset {
            keywords: &["ambient", "atmospheric", "drone"],
            description: preset(
                "ambient",
                70,
                MusicType::Chords,
                &[("crash", "1")],
                Some(&["Cmaj7", "Am"]),
                Some(&["E5", "G4"]),
            ),
        },
        GenrePreset {
            keywords: &["funk", "funky"],
            description: preset(
                "funk",
                105,
                MusicType::Mixed,
                &[
                    ("kick", "1,1.4,2.3,3,3.3"),
                    ("snare", BACKBEAT),
                    ("hats", SIXTEENTH_HATS),
                ],
                Some(&["Dm7", "G7", "Dm7", "G7"]),
                Some(&["D4", "F4", "A4", "C5"]),
            ),
        },
        GenrePreset {
            keywords: &["techno"],
            description: preset(
                "techno",
                132,
                MusicType::Drums,
                &[
                    ("kick", "1,2,3,4"),
                    ("clap", BACKBEAT),
                    ("hats", "1.3,2.3,3.3,4.3"),
                    ("crash", "1"),
                ],
                None,
                None,
            ),
        },
        GenrePreset {
            keywords: &["dubstep", "wobble"],
            description: preset(
                "dubstep",
                140,
                MusicType::Drums,
                &[
                    ("kick", "1,2.4"),
                    ("snare", "3"),
                    ("hats", EIGHTH_HATS),
                    ("tom", "4.3,4.4"),
                ],
                None,
                None,
            ),
        },
    ]
}
