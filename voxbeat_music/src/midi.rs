// MIDI output from timelines.
//
// Converts a Timeline into a Standard MIDI File (SMF) and writes it to disk.
// Track 0 is the conductor track (tempo + 4/4 time signature); each timeline
// track becomes its own MIDI track after that. Timeline times are quarter
// notes, so they map to ticks independently of tempo.
//
// The whole file is encoded into memory before anything touches the
// filesystem, then written with a single call. A failed encode never leaves
// a truncated file behind.
//
// Uses the `midly` crate for MIDI writing. Output is SMF Format 1 (multi-track).

use crate::error::RenderError;
use crate::timeline::{Timeline, Track};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;
use tracing::{debug, info, warn};

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;
const MAX_DELTA: u32 = 0x0FFF_FFFF;

/// Encode a timeline and write it to `path`, creating parent directories.
pub fn write_midi(timeline: &Timeline, path: &Path) -> Result<(), RenderError> {
    let buf = encode(timeline)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, &buf).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        bytes = buf.len(),
        notes = timeline.note_count(),
        "wrote MIDI file"
    );
    Ok(())
}

/// Encode a timeline as SMF bytes.
pub fn encode(timeline: &Timeline) -> Result<Vec<u8>, RenderError> {
    let smf = timeline_to_smf(timeline);
    let mut buf = Vec::new();
    smf.write_std(&mut buf).map_err(RenderError::Encode)?;
    Ok(buf)
}

/// Convert a quarter-note time to ticks.
pub fn to_ticks(time: f64) -> u32 {
    let ticks = (time.max(0.0) * f64::from(TICKS_PER_QUARTER)).round();
    // Saturating float-to-int conversion.
    ticks as u32
}

/// Convert a Timeline to an in-memory SMF.
fn timeline_to_smf(timeline: &Timeline) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: conductor track
    let bpm = u32::from(timeline.bpm.max(1));
    let tempo_micros = (60_000_000 / bpm).min(MAX_TEMPO_MICROS);
    smf.tracks.push(vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(b"voxbeat")),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8)),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]);

    for track in &timeline.tracks {
        smf.tracks.push(track_events(track));
    }

    debug!(tracks = smf.tracks.len(), tempo_micros, "built SMF");
    smf
}

/// Build the event list for one instrument track.
fn track_events(track: &Track) -> Vec<TrackEvent<'static>> {
    let channel = u4::new(track.channel.midi_channel());
    let mut events: Vec<TrackEvent<'static>> = vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(
                track.channel.track_name().as_bytes(),
            )),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange {
                    program: u7::new(track.program.min(127)),
                },
            },
        },
    ];

    // (tick, is_note_on, message). Offs sort ahead of ons at the same tick so
    // a repeated pitch is released before it is struck again. Every note
    // lasts at least one tick, so its own off can never land on its on.
    let mut timed: Vec<(u32, bool, MidiMessage)> = Vec::with_capacity(track.notes.len() * 2);
    for note in &track.notes {
        let key = u7::new(note.pitch.min(127));
        let on = to_ticks(note.start).min(u32::MAX - 1);
        let off = to_ticks(note.end).max(on.saturating_add(1));
        timed.push((
            on,
            true,
            MidiMessage::NoteOn {
                key,
                vel: u7::new(note.velocity.clamp(1, 127)),
            },
        ));
        timed.push((
            off,
            false,
            MidiMessage::NoteOff {
                key,
                vel: u7::new(0),
            },
        ));
    }
    timed.sort_by_key(|&(tick, is_on, _)| (tick, is_on));

    let mut last_tick = 0;
    for (tick, _, message) in timed {
        let delta = tick - last_tick;
        if delta > MAX_DELTA {
            warn!(
                delta,
                max = MAX_DELTA,
                "delta time too large, later events shift earlier"
            );
        }
        events.push(TrackEvent {
            delta: u28::new(delta.min(MAX_DELTA)),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_tick = tick;
    }

    events.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    events
}
