// Error types for the renderer.
//
// Only two things can actually go wrong: the input document is not a JSON
// object at all, or the output file can't be written. Everything else
// (missing keys, unknown tokens, odd chord symbols) is resolved with
// defaults and never surfaces as an error.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read a music description.
#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("description is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("description must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("failed to read description from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to produce a MIDI file.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode MIDI: {0}")]
    Encode(#[source] std::io::Error),
}
