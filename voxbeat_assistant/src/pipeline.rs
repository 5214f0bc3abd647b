// The request-to-MIDI pipeline.
//
// Voice mode: record -> transcribe -> interpret -> render.
// Text mode skips the first two steps. Each step runs once; there are no
// retries here. Interpretation failures are the parser's business (see
// llm.rs for the fallback policy), so by the time a description reaches
// the renderer it is always complete.

use crate::collab::{AudioRecorder, PromptParser, Transcriber};
use crate::config::AssistantConfig;
use crate::error::AssistantError;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use voxbeat_music::midi::write_midi;
use voxbeat_music::{MusicDescription, Timeline};

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub path: PathBuf,
    pub description: MusicDescription,
    pub note_count: usize,
    /// Transcript of the recording, in voice mode.
    pub transcript: Option<String>,
}

pub struct Assistant<P> {
    config: AssistantConfig,
    parser: P,
}

impl<P: PromptParser> Assistant<P> {
    pub fn new(config: AssistantConfig, parser: P) -> Self {
        Assistant { config, parser }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Interpret a text request and render it.
    pub fn run_text(
        &self,
        text: &str,
        custom_name: Option<&str>,
    ) -> Result<RunReport, AssistantError> {
        if text.trim().is_empty() {
            return Err(AssistantError::NoSpeech);
        }
        let desc = self
            .parser
            .parse(text)
            .ok_or(AssistantError::NoDescription)?;
        info!(
            genre = desc.genre.as_str(),
            bpm = desc.bpm,
            music_type = desc.music_type.label(),
            "interpreted request"
        );
        self.render_description(desc, custom_name)
    }

    /// Record, transcribe, then continue as `run_text`.
    ///
    /// `duration_secs` defaults to the configured length and is replaced by
    /// the configured fallback when outside the accepted range.
    pub fn run_voice(
        &self,
        recorder: &dyn AudioRecorder,
        transcriber: &dyn Transcriber,
        duration_secs: Option<u32>,
        custom_name: Option<&str>,
    ) -> Result<RunReport, AssistantError> {
        let rec = &self.config.recording;
        let secs = rec.resolve_duration(duration_secs);
        info!(secs, sample_rate = rec.sample_rate, "recording");
        let audio = recorder.record(secs, rec.sample_rate)?;

        let transcript = transcriber.transcribe(&audio)?;
        let transcript = transcript.trim().to_string();
        info!(transcript = transcript.as_str(), "transcribed");

        let mut report = self.run_text(&transcript, custom_name)?;
        report.transcript = Some(transcript);
        Ok(report)
    }

    /// Render an already-built description into the output directory.
    pub fn render_description(
        &self,
        desc: MusicDescription,
        custom_name: Option<&str>,
    ) -> Result<RunReport, AssistantError> {
        let path = self.config.output_path(&desc.genre, custom_name);
        self.render_to(desc, path)
    }

    /// Render a description to an explicit path, bypassing output naming.
    pub fn render_to(
        &self,
        desc: MusicDescription,
        path: PathBuf,
    ) -> Result<RunReport, AssistantError> {
        let timeline = Timeline::from_description(&desc);
        write_midi(&timeline, &path)?;
        Ok(RunReport {
            path,
            note_count: timeline.note_count(),
            description: desc,
            transcript: None,
        })
    }
}
