// End-to-end rendering tests: description JSON in, MIDI file on disk out.
//
// Files are written into a temp directory and parsed back with midly so the
// assertions check what a MIDI player would actually see.

use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};
use serde_json::json;
use std::collections::BTreeMap;
use voxbeat_music::{MelodyStep, MusicDescription, render, render_drum_pattern, render_step_melody};

/// Note-ons as (absolute tick, channel, key, velocity), per track.
fn note_ons(smf: &Smf<'_>) -> Vec<Vec<(u32, u8, u8, u8)>> {
    smf.tracks
        .iter()
        .map(|track| {
            let mut tick = 0;
            let mut ons = Vec::new();
            for ev in track {
                tick += ev.delta.as_int();
                if let TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn { key, vel },
                } = ev.kind
                {
                    ons.push((tick, channel.as_int(), key.as_int(), vel.as_int()));
                }
            }
            ons
        })
        .collect()
}

fn tempo_of(smf: &Smf<'_>) -> Option<u32> {
    smf.tracks[0].iter().find_map(|ev| match ev.kind {
        TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
        _ => None,
    })
}

#[test]
fn renders_reference_drum_example() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/out/drums.mid");
    let desc = MusicDescription::from_value(&json!({
        "bpm": 90,
        "music_type": "drums",
        "pattern": {"kick": "1,2", "snare": "2,4"}
    }))
    .unwrap();

    let written = render(&desc, &target).unwrap();
    assert_eq!(written, target);

    let bytes = std::fs::read(&target).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 2);
    assert_eq!(tempo_of(&smf), Some(60_000_000 / 90));

    let mut drums = note_ons(&smf)[1].clone();
    drums.sort();
    assert_eq!(
        drums,
        vec![
            (0, 9, 36, 100),
            (480, 9, 36, 100),
            (480, 9, 38, 80),
            (1440, 9, 38, 80),
        ]
    );
}

#[test]
fn missing_bpm_and_type_use_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("defaults.mid");
    let json = r#"{"pattern": {"hats": "1.2,1.4"}}"#;
    let desc = MusicDescription::from_json_str(json).unwrap();
    render(&desc, &target).unwrap();

    let bytes = std::fs::read(&target).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(tempo_of(&smf), Some(60_000_000 / 90));
    let ons = note_ons(&smf);
    assert_eq!(ons.len(), 2);
    assert_eq!(ons[1], vec![(120, 9, 42, 80), (360, 9, 42, 80)]);
}

#[test]
fn mixed_renders_both_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("lofi.mid");
    let desc = MusicDescription::from_value(&json!({
        "genre": "lo-fi",
        "bpm": 85,
        "music_type": "mixed",
        "pattern": {"kick": "1,3", "snare": "2,4", "hats": "1.2,1.4,2.2,2.4,3.2,3.4,4.2,4.4"},
        "chords": ["Am", "F", "C", "G"],
        "melody": ["A4", "C5", "E5", "F5"]
    }))
    .unwrap();
    render(&desc, &target).unwrap();

    let bytes = std::fs::read(&target).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    let ons = note_ons(&smf);
    assert_eq!(ons.len(), 3);
    assert_eq!(ons[1].len(), 12);
    // Four triads plus four melody notes.
    assert_eq!(ons[2].len(), 16);
    let melody: Vec<u8> = ons[2].iter().filter(|n| n.3 == 80).map(|n| n.2).collect();
    assert_eq!(melody, vec![69, 72, 76, 77]);
}

#[test]
fn empty_chords_produce_an_empty_piano_track() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("empty.mid");
    let value = json!({"music_type": "chords", "chords": []});
    let desc = MusicDescription::from_value(&value).unwrap();
    render(&desc, &target).unwrap();

    let bytes = std::fs::read(&target).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 2);
    assert!(note_ons(&smf)[1].is_empty());
}

#[test]
fn rerendering_overwrites_identically() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("same.mid");
    let desc = MusicDescription::from_value(&json!({
        "music_type": "chords",
        "chords": ["Cmaj7", "Dm7", "G7", "Cmaj7"]
    }))
    .unwrap();
    render(&desc, &target).unwrap();
    let first = std::fs::read(&target).unwrap();
    render(&desc, &target).unwrap();
    let second = std::fs::read(&target).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unwritable_target_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();
    let target = blocker.join("out.mid");

    let err = render(&MusicDescription::default(), &target).unwrap_err();
    assert!(matches!(err, voxbeat_music::RenderError::Io { .. }));
    assert!(!target.exists());
}

#[test]
fn legacy_helpers_write_files() {
    let dir = tempfile::tempdir().unwrap();

    let drums = dir.path().join("drums.mid");
    let pattern = BTreeMap::from([("kick", "1,2,3,4"), ("snare", "2,4")]);
    render_drum_pattern(pattern, 128, &drums).unwrap();
    let bytes = std::fs::read(&drums).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(tempo_of(&smf), Some(60_000_000 / 128));
    assert_eq!(note_ons(&smf)[1].len(), 6);

    let melody = dir.path().join("melody.mid");
    let steps = vec![
        MelodyStep {
            note: "A".into(),
            duration: 1.0,
            octave: 4,
        },
        MelodyStep::default(),
    ];
    render_step_melody(&steps, 90, &melody).unwrap();
    let bytes = std::fs::read(&melody).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(note_ons(&smf)[1], vec![(0, 0, 69, 80), (480, 0, 60, 80)]);
}
