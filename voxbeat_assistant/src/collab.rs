// Interfaces to the outside world.
//
// Recording, speech-to-text, and request interpretation are all delegated
// to external services. Each is a single-method trait so the pipeline can
// be driven by deterministic fixtures in tests and by real services in a
// host application.
//
// `ChatBackend` is the raw transport to a chat-completion model; the
// interpretation logic built on top of it (system prompt, JSON extraction,
// fallbacks) lives in llm.rs.

use crate::error::AssistantError;
use std::path::{Path, PathBuf};
use voxbeat_music::MusicDescription;

/// Captures a fixed-length mono recording to a file.
pub trait AudioRecorder {
    fn record(&self, duration_secs: u32, sample_rate: u32) -> Result<PathBuf, AssistantError>;
}

/// Turns a recording into plain text. May return an empty string.
pub trait Transcriber {
    fn transcribe(&self, audio: &Path) -> Result<String, AssistantError>;
}

/// Interprets a text request as a music description.
///
/// Returns `None` only when the request can't be interpreted at all;
/// implementations backed by a remote model substitute a fallback
/// description when the remote side misbehaves.
pub trait PromptParser {
    fn parse(&self, text: &str) -> Option<MusicDescription>;
}

/// Chat-completion transport: one system message, one user message, one reply.
pub trait ChatBackend {
    /// False when the backend has no credentials and should not be called.
    fn is_configured(&self) -> bool {
        true
    }

    fn complete(&self, system: &str, user: &str) -> Result<String, AssistantError>;
}

impl<T: PromptParser + ?Sized> PromptParser for &T {
    fn parse(&self, text: &str) -> Option<MusicDescription> {
        (**self).parse(text)
    }
}

impl<T: PromptParser + ?Sized> PromptParser for Box<T> {
    fn parse(&self, text: &str) -> Option<MusicDescription> {
        (**self).parse(text)
    }
}
