// Render entry points: description in, MIDI file out.
//
// `render` is the main operation. The two helpers below it cover the older
// call shapes: a bare drum pattern, and a sequential melody where each step
// carries its own duration instead of being spread across the phrase.
//
// Every call is independent; rendering the same input to the same path
// twice produces the same file (the second run overwrites the first).

use crate::description::MusicDescription;
use crate::error::RenderError;
use crate::midi::write_midi;
use crate::pitch::step_pitch;
use crate::tables::MELODY_VELOCITY;
use crate::timeline::{Channel, NoteEvent, Timeline, Track};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Render a description to a MIDI file at `target`. Returns the path written.
pub fn render(desc: &MusicDescription, target: &Path) -> Result<PathBuf, RenderError> {
    let timeline = Timeline::from_description(desc);
    write_midi(&timeline, target)?;
    Ok(target.to_path_buf())
}

/// Render a bare drum pattern (voice -> beat tokens) as a drums-only piece.
pub fn render_drum_pattern<K, V>(
    pattern: impl IntoIterator<Item = (K, V)>,
    bpm: u16,
    target: &Path,
) -> Result<PathBuf, RenderError>
where
    K: Into<String>,
    V: Into<String>,
{
    render(&MusicDescription::drums(pattern, bpm), target)
}

/// One entry of a sequential melody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MelodyStep {
    /// Note letter with optional sharp, e.g. "F#".
    pub note: String,
    /// Length in quarter notes.
    pub duration: f64,
    /// Octave number; octave 4 holds middle C.
    pub octave: i32,
}

impl Default for MelodyStep {
    fn default() -> Self {
        MelodyStep {
            note: "C".to_string(),
            duration: 0.5,
            octave: 4,
        }
    }
}

/// Lay melody steps end to end from time zero on a single piano track.
/// Steps with a negative or non-finite duration take no time.
pub fn step_melody_timeline(steps: &[MelodyStep], bpm: u16) -> Timeline {
    let mut now = 0.0;
    let notes = steps
        .iter()
        .map(|step| {
            let length = if step.duration.is_finite() {
                step.duration.max(0.0)
            } else {
                0.0
            };
            let note = NoteEvent {
                pitch: step_pitch(&step.note, step.octave),
                velocity: MELODY_VELOCITY,
                start: now,
                end: now + length,
                channel: Channel::Pitched,
            };
            now += length;
            note
        })
        .collect();
    Timeline::from_tracks(bpm, vec![Track::with_notes(Channel::Pitched, notes)])
}

/// Render a sequential melody to a MIDI file at `target`.
pub fn render_step_melody(
    steps: &[MelodyStep],
    bpm: u16,
    target: &Path,
) -> Result<PathBuf, RenderError> {
    write_midi(&step_melody_timeline(steps, bpm), target)?;
    Ok(target.to_path_buf())
}
