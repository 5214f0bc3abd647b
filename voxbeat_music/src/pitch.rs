// Pitch resolution for chord symbols and note names.
//
// All three resolvers are total: a symbol or name that can't be understood
// resolves to a fixed fallback (C-major triad, pitch class C, or middle C)
// instead of an error. Fallbacks are logged at debug level so a caller
// chasing a "why is everything C" report can see them with `voxbeat -v`.
//
// Note-name grammar for melody entries: `<letter>[#]<octave digit>`, e.g.
// "A4", "C#5". The octave is the single trailing digit; everything before
// it is looked up as the letter part. Flats are not understood and resolve
// to pitch class C like any other unknown letter.

use crate::tables::{DEFAULT_CHORD, chord_voicing, note_semitone};
use tracing::debug;

/// Middle C, used when a note name can't be decoded at all.
pub const MIDDLE_C: u8 = 60;

/// Pitches for a chord symbol, falling back to a C-major triad.
pub fn chord_pitches(symbol: &str) -> &'static [u8] {
    chord_voicing(symbol).unwrap_or_else(|| {
        debug!(symbol, "unknown chord symbol, using C major");
        DEFAULT_CHORD
    })
}

/// Decode a note name like "A#5" into a MIDI pitch.
///
/// `pitch = semitone(letter part) + (octave + 1) * 12`. An unknown letter
/// part counts as C. Names shorter than two characters, names whose last
/// character is not a digit, and names that land above 127 all decode to
/// middle C.
pub fn note_name_to_pitch(name: &str) -> u8 {
    let mut chars = name.chars();
    let Some(last) = chars.next_back() else {
        debug!(name, "empty note name, using middle C");
        return MIDDLE_C;
    };
    let letter = chars.as_str();
    let Some(octave) = last.to_digit(10).filter(|_| !letter.is_empty()) else {
        debug!(name, "malformed note name, using middle C");
        return MIDDLE_C;
    };

    let semitone = note_semitone(letter).unwrap_or_else(|| {
        debug!(name, "unknown note letter, using C");
        0
    });
    let pitch = semitone as u32 + (octave + 1) * 12;
    match u8::try_from(pitch) {
        Ok(p) if p <= 127 => p,
        _ => {
            debug!(name, pitch, "note above MIDI range, using middle C");
            MIDDLE_C
        }
    }
}

/// Pitch for a step-melody entry: a note letter (optional sharp anywhere in
/// the name) plus a separate octave number, with octave 4 holding middle C.
///
/// The sharp is stripped before the letter lookup and added back as one
/// semitone. Results outside the MIDI range are clamped; any `i32` octave
/// is accepted.
pub fn step_pitch(note: &str, octave: i32) -> u8 {
    let letter = note.replace('#', "");
    let base = i64::from(MIDDLE_C) + i64::from(note_semitone(&letter).unwrap_or(0));
    let sharp = i64::from(note.contains('#'));
    // Widened so extreme octaves can't overflow before the clamp.
    let pitch = base + (i64::from(octave) - 4) * 12 + sharp;
    pitch.clamp(0, 127) as u8
}
