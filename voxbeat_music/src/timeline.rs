// The note timeline: the in-memory result of expanding a description.
//
// A Timeline holds up to two tracks, percussion and pitched, each a flat
// list of NoteEvents with start/end times in quarter notes. It is built in
// a single pass from a MusicDescription and never mutated afterwards; midi.rs
// turns it into an SMF.
//
// Expansion rules:
// - Drums: each pattern voice known to the drum table contributes one short
//   hit per grid token. Unknown voices and off-grid tokens (e.g. "1.5") are
//   dropped without error and logged at debug level.
// - Chords: the 4-quarter phrase is split into N equal slots, one chord per
//   slot, every chord tone sustained for the whole slot.
// - Melody: same split, one note per slot.
// An empty chord or melody list skips that expansion entirely, so the slot
// division never sees N = 0.

use crate::description::MusicDescription;
use crate::pitch::{chord_pitches, note_name_to_pitch};
use crate::tables::{
    CHORD_VELOCITY, DRUM_HIT_LENGTH, DRUM_VELOCITY, KICK_VELOCITY, MELODY_VELOCITY,
    PHRASE_LENGTH, beat_time, drum_key,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::debug;

/// Which kind of instrument a note belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Channel {
    Percussion,
    Pitched,
}

impl Channel {
    /// Zero-based MIDI channel. Percussion uses channel 10 (index 9).
    pub fn midi_channel(self) -> u8 {
        match self {
            Channel::Percussion => 9,
            Channel::Pitched => 0,
        }
    }

    pub fn track_name(self) -> &'static str {
        match self {
            Channel::Percussion => "Drums",
            Channel::Pitched => "Piano",
        }
    }
}

/// A single timed note. Times are in quarter notes from the start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteEvent {
    pub pitch: u8,
    pub velocity: u8,
    pub start: f64,
    pub end: f64,
    pub channel: Channel,
}

impl NoteEvent {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One instrument's notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub channel: Channel,
    /// General MIDI program. Ignored by players for the percussion channel.
    pub program: u8,
    pub notes: Vec<NoteEvent>,
}

impl Track {
    fn new(channel: Channel) -> Self {
        Track {
            channel,
            program: 0, // Acoustic Grand Piano
            notes: Vec::new(),
        }
    }

    /// A track holding notes timed by the caller.
    pub fn with_notes(channel: Channel, notes: Vec<NoteEvent>) -> Self {
        Track {
            notes,
            ..Track::new(channel)
        }
    }

    fn push(&mut self, pitch: u8, velocity: u8, start: f64, end: f64) {
        self.notes.push(NoteEvent {
            pitch,
            velocity,
            start,
            end,
            channel: self.channel,
        });
    }
}

/// The complete rendered phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub bpm: u16,
    /// Percussion track first (if present), then pitched.
    pub tracks: Vec<Track>,
}

impl Timeline {
    /// Expand a description into note events.
    pub fn from_description(desc: &MusicDescription) -> Self {
        let mut tracks = Vec::with_capacity(2);
        let kind = desc.music_type;

        if kind.has_drums() {
            let mut drums = Track::new(Channel::Percussion);
            if let Some(pattern) = &desc.pattern {
                expand_drums(pattern, &mut drums);
            }
            tracks.push(drums);
        }

        if kind.has_pitched() {
            let mut piano = Track::new(Channel::Pitched);
            if let Some(chords) = desc.chords.as_ref().filter(|_| kind.has_chords()) {
                expand_chords(chords, &mut piano);
            }
            if let Some(melody) = desc.melody.as_ref().filter(|_| kind.has_melody()) {
                expand_melody(melody, &mut piano);
            }
            tracks.push(piano);
        }

        debug!(
            music_type = kind.label(),
            tracks = tracks.len(),
            notes = tracks.iter().map(|t| t.notes.len()).sum::<usize>(),
            "expanded description"
        );

        Timeline {
            bpm: desc.bpm,
            tracks,
        }
    }

    /// Build a timeline directly from already-timed tracks.
    pub fn from_tracks(bpm: u16, tracks: Vec<Track>) -> Self {
        Timeline { bpm, tracks }
    }

    pub fn track(&self, channel: Channel) -> Option<&Track> {
        self.tracks.iter().find(|t| t.channel == channel)
    }

    pub fn note_count(&self) -> usize {
        self.tracks.iter().map(|t| t.notes.len()).sum()
    }

    /// End time of the last sounding note, in quarter notes.
    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .flat_map(|t| t.notes.iter())
            .map(|n| n.end)
            .fold(0.0, f64::max)
    }

    /// Length in seconds at this timeline's tempo.
    pub fn duration_seconds(&self) -> f64 {
        self.duration() * 60.0 / f64::from(self.bpm)
    }

    /// Compact text listing of every note, one track per block.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "tempo {} bpm", self.bpm);
        for track in &self.tracks {
            let _ = writeln!(
                out,
                "{} ({} notes)",
                track.channel.track_name(),
                track.notes.len()
            );
            for note in &track.notes {
                let _ = writeln!(
                    out,
                    "  {:>6.3}-{:<6.3} pitch {:>3} vel {:>3}",
                    note.start, note.end, note.pitch, note.velocity
                );
            }
        }
        out
    }
}

/// Equal slot length for `count` items across the phrase, or `None` when
/// there is nothing to place.
fn slot_length(count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(PHRASE_LENGTH / count as f64)
    }
}

fn expand_drums(pattern: &BTreeMap<String, String>, track: &mut Track) {
    for (voice, hits) in pattern {
        let Some(key) = drum_key(voice) else {
            debug!(voice = voice.as_str(), "ignoring unknown drum voice");
            continue;
        };
        let velocity = if voice == "kick" {
            KICK_VELOCITY
        } else {
            DRUM_VELOCITY
        };
        for token in hits.split(',').map(str::trim) {
            match beat_time(token) {
                Some(start) => track.push(key, velocity, start, start + DRUM_HIT_LENGTH),
                None => debug!(
                    voice = voice.as_str(),
                    token,
                    "dropping off-grid beat token"
                ),
            }
        }
    }
}

fn expand_chords(chords: &[String], track: &mut Track) {
    let Some(slot) = slot_length(chords.len()) else {
        return;
    };
    for (i, symbol) in chords.iter().enumerate() {
        let start = i as f64 * slot;
        for &pitch in chord_pitches(symbol) {
            track.push(pitch, CHORD_VELOCITY, start, start + slot);
        }
    }
}

fn expand_melody(melody: &[String], track: &mut Track) {
    let Some(slot) = slot_length(melody.len()) else {
        return;
    };
    for (i, name) in melody.iter().enumerate() {
        let start = i as f64 * slot;
        track.push(note_name_to_pitch(name), MELODY_VELOCITY, start, start + slot);
    }
}
