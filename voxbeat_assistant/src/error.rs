// Errors surfaced by the assistant pipeline.
//
// Collaborator failures (recording, transcription, the chat backend) carry
// a message string because their implementations live outside this crate
// and may wrap anything. Renderer and description errors are wrapped as-is.

use std::path::PathBuf;
use thiserror::Error;
use voxbeat_music::{DescriptionError, RenderError};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("no speech detected")]
    NoSpeech,

    #[error("could not interpret the request")]
    NoDescription,

    #[error("recording failed: {0}")]
    Recording(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("chat backend failed: {0}")]
    Backend(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
