// Static lookup data for the timeline renderer.
//
// Everything here is immutable constant data: the 16-slot beat grid, the
// General MIDI percussion keys for the supported drum voices, the chord
// dictionary, and the note-letter semitone table. Lookups that miss return
// `None` and the caller decides on the fallback (see pitch.rs and
// timeline.rs).
//
// Times are in quarter-note units. The grid covers one 4/4 bar at sixteenth
// resolution: token `B` is beat B, `B.2`/`B.3`/`B.4` add 0.25/0.5/0.75.

/// The 16 beat-position tokens and their start times.
pub const BEAT_GRID: [(&str, f64); 16] = [
    ("1", 0.0),
    ("1.2", 0.25),
    ("1.3", 0.5),
    ("1.4", 0.75),
    ("2", 1.0),
    ("2.2", 1.25),
    ("2.3", 1.5),
    ("2.4", 1.75),
    ("3", 2.0),
    ("3.2", 2.25),
    ("3.3", 2.5),
    ("3.4", 2.75),
    ("4", 3.0),
    ("4.2", 3.25),
    ("4.3", 3.5),
    ("4.4", 3.75),
];

/// Drum voice names and their General MIDI percussion keys.
pub const DRUM_VOICES: [(&str, u8); 6] = [
    ("kick", 36),  // Bass Drum 1
    ("snare", 38), // Acoustic Snare
    ("hats", 42),  // Closed Hi-Hat
    ("crash", 49), // Crash Cymbal 1
    ("tom", 45),   // Low Floor Tom
    ("clap", 39),  // Hand Clap
];

/// Chord symbols and their voicings (MIDI pitches).
pub const CHORDS: [(&str, &[u8]); 13] = [
    ("C", &[60, 64, 67]),
    ("Cm", &[60, 63, 67]),
    ("C7", &[60, 64, 67, 70]),
    ("Cmaj7", &[60, 64, 67, 71]),
    ("Am", &[57, 60, 64]),
    ("A", &[57, 61, 64]),
    ("F", &[53, 57, 60]),
    ("G", &[55, 59, 62]),
    ("G7", &[55, 59, 62, 65]),
    ("Dm", &[50, 53, 57]),
    ("Dm7", &[50, 53, 57, 60]),
    ("Em", &[52, 55, 59]),
    ("Bm", &[47, 50, 54]),
];

/// Voicing used for any chord symbol missing from `CHORDS`.
pub const DEFAULT_CHORD: &[u8] = &[60, 64, 67];

/// Note letters (with optional sharp) and their pitch class.
pub const NOTE_SEMITONES: [(&str, u8); 12] = [
    ("C", 0),
    ("C#", 1),
    ("D", 2),
    ("D#", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("G", 7),
    ("G#", 8),
    ("A", 9),
    ("A#", 10),
    ("B", 11),
];

/// Total length of a rendered phrase in quarter notes. Chords and melody
/// notes are spread evenly across it.
pub const PHRASE_LENGTH: f64 = 4.0;

/// Length of every drum hit in quarter notes.
pub const DRUM_HIT_LENGTH: f64 = 0.1;

pub const KICK_VELOCITY: u8 = 100;
pub const DRUM_VELOCITY: u8 = 80;
pub const CHORD_VELOCITY: u8 = 70;
pub const MELODY_VELOCITY: u8 = 80;

/// Start time of a beat-position token, or `None` if it is not on the grid.
pub fn beat_time(token: &str) -> Option<f64> {
    BEAT_GRID
        .iter()
        .find(|(name, _)| *name == token)
        .map(|&(_, time)| time)
}

/// Percussion key for a drum voice name.
pub fn drum_key(voice: &str) -> Option<u8> {
    DRUM_VOICES
        .iter()
        .find(|(name, _)| *name == voice)
        .map(|&(_, key)| key)
}

/// Voicing for a chord symbol, if it is in the dictionary.
pub fn chord_voicing(symbol: &str) -> Option<&'static [u8]> {
    CHORDS
        .iter()
        .find(|(name, _)| *name == symbol)
        .map(|&(_, pitches)| pitches)
}

/// Pitch class for a note letter with optional sharp ("C", "F#").
pub fn note_semitone(name: &str) -> Option<u8> {
    NOTE_SEMITONES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, pc)| pc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_times_follow_beat_and_subdivision() {
        for (token, time) in BEAT_GRID {
            let (beat, sub) = match token.split_once('.') {
                Some((b, s)) => (b, s),
                None => (token, "1"),
            };
            let beat: f64 = beat.parse().unwrap();
            let offset = match sub {
                "1" => 0.0,
                "2" => 0.25,
                "3" => 0.5,
                "4" => 0.75,
                other => panic!("unexpected subdivision {other}"),
            };
            assert_eq!(time, (beat - 1.0) + offset, "token {token}");
        }
    }

    #[test]
    fn test_grid_is_strictly_increasing() {
        for pair in BEAT_GRID.windows(2) {
            assert!(pair[0].1 < pair[1].1);
        }
        assert_eq!(BEAT_GRID[15].1, 3.75);
    }

    #[test]
    fn test_lookups_miss_cleanly() {
        assert_eq!(beat_time("1.5"), None);
        assert_eq!(beat_time(""), None);
        assert_eq!(drum_key("cowbell"), None);
        assert_eq!(chord_voicing("Xyz7"), None);
        assert_eq!(note_semitone("Bb"), None);
    }

    #[test]
    fn test_known_entries() {
        assert_eq!(beat_time("2.3"), Some(1.5));
        assert_eq!(drum_key("kick"), Some(36));
        assert_eq!(drum_key("clap"), Some(39));
        assert_eq!(chord_voicing("Cmaj7"), Some(&[60u8, 64, 67, 71][..]));
        assert_eq!(note_semitone("A#"), Some(10));
    }
}
