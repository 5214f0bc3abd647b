// Full pipeline tests with scripted collaborators.
//
// A fake recorder, transcriber and chat backend stand in for the external
// services. Each test drives `Assistant` end to end and then parses the
// written MIDI file to check what actually landed on disk.

use midly::{MidiMessage, Smf, TrackEventKind};
use std::path::{Path, PathBuf};
use voxbeat_assistant::presets::call_failed_fallbacks;
use voxbeat_assistant::{
    Assistant, AssistantConfig, AssistantError, AudioRecorder, ChatBackend, LlmPromptParser,
    Transcriber,
};

struct StubRecorder;

impl AudioRecorder for StubRecorder {
    fn record(&self, _duration_secs: u32, _sample_rate: u32) -> Result<PathBuf, AssistantError> {
        Ok(PathBuf::from("input.wav"))
    }
}

struct BrokenRecorder;

impl AudioRecorder for BrokenRecorder {
    fn record(&self, _duration_secs: u32, _sample_rate: u32) -> Result<PathBuf, AssistantError> {
        Err(AssistantError::Recording("no input device".into()))
    }
}

struct StubTranscriber(&'static str);

impl Transcriber for StubTranscriber {
    fn transcribe(&self, _audio: &Path) -> Result<String, AssistantError> {
        Ok(self.0.to_string())
    }
}

/// Always answers with the same reply (or the same failure).
struct CannedBackend(Result<&'static str, &'static str>);

impl ChatBackend for CannedBackend {
    fn complete(&self, _system: &str, _user: &str) -> Result<String, AssistantError> {
        self.0
            .map(str::to_string)
            .map_err(|e| AssistantError::Backend(e.to_string()))
    }
}

fn assistant(dir: &Path, backend: CannedBackend) -> Assistant<LlmPromptParser<CannedBackend>> {
    let config = AssistantConfig {
        output_dir: dir.to_path_buf(),
        fallback_seed: Some(11),
        ..Default::default()
    };
    let parser = LlmPromptParser::with_config(backend, &config);
    Assistant::new(config, parser)
}

/// (channel, key) of every note-on in the file, across all tracks.
fn note_ons(path: &Path) -> Vec<(u8, u8)> {
    let bytes = std::fs::read(path).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    smf.tracks
        .iter()
        .flatten()
        .filter_map(|ev| match ev.kind {
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, .. },
            } => Some((channel.as_int(), key.as_int())),
            _ => None,
        })
        .collect()
}

#[test]
fn voice_request_renders_model_reply() {
    let dir = tempfile::tempdir().unwrap();
    let reply = r#"{
        "genre": "jazz",
        "bpm": 125,
        "music_type": "chords",
        "pattern": {"kick": "1,3"},
        "chords": ["Dm7", "G7", "Cmaj7", "Xyz7"],
        "melody": null
    }"#;
    let assistant = assistant(dir.path(), CannedBackend(Ok(reply)));

    let report = assistant
        .run_voice(
            &StubRecorder,
            &StubTranscriber("some jazz chords"),
            Some(10),
            None,
        )
        .unwrap();

    assert_eq!(report.path, dir.path().join("jazz_beat.mid"));
    assert_eq!(report.transcript.as_deref(), Some("some jazz chords"));
    // Dm7 + G7 + Cmaj7 are four-note chords; the unknown symbol is a triad.
    assert_eq!(report.note_count, 15);

    let ons = note_ons(&report.path);
    assert_eq!(ons.len(), 15);
    assert!(ons.iter().all(|&(channel, _)| channel == 0));
    let last_three: Vec<u8> = ons[12..].iter().map(|&(_, key)| key).collect();
    assert_eq!(last_three, vec![60, 64, 67]);
}

#[test]
fn failed_chat_call_still_produces_drums() {
    let dir = tempfile::tempdir().unwrap();
    let assistant = assistant(dir.path(), CannedBackend(Err("timeout")));

    let report = assistant.run_text("make a beat", Some("fallback")).unwrap();

    assert!(call_failed_fallbacks().contains(&report.description));
    assert_eq!(report.path, dir.path().join("fallback.mid"));
    let ons = note_ons(&report.path);
    assert!(!ons.is_empty());
    assert!(ons.iter().all(|&(channel, _)| channel == 9));
}

#[test]
fn prose_reply_falls_back_to_a_full_description() {
    let dir = tempfile::tempdir().unwrap();
    let backend = CannedBackend(Ok("Sorry, I can only talk about music."));
    let assistant = assistant(dir.path(), backend);

    let report = assistant.run_text("anything", None).unwrap();
    assert!(report.path.exists());
    assert!(report.note_count > 0);
}

#[test]
fn recorder_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let assistant = assistant(dir.path(), CannedBackend(Ok("{}")));

    let err = assistant
        .run_voice(&BrokenRecorder, &StubTranscriber("unused"), None, None)
        .unwrap_err();
    assert!(matches!(err, AssistantError::Recording(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_transcript_is_no_speech() {
    let dir = tempfile::tempdir().unwrap();
    let assistant = assistant(dir.path(), CannedBackend(Ok("{}")));

    let err = assistant
        .run_voice(&StubRecorder, &StubTranscriber("   "), None, None)
        .unwrap_err();
    assert!(matches!(err, AssistantError::NoSpeech));
}
