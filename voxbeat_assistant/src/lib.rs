// voxbeat assistant
//
// Everything around the renderer: the request pipeline, the interfaces to
// the external recording / transcription / chat-model services, and the
// policy for what to do when those services misbehave.
//
// Module overview:
// - `collab.rs`:   Single-method traits for the external collaborators.
// - `llm.rs`:      Chat-model interpretation (system prompt, JSON extraction,
//                  fallback on bad replies or failed calls).
// - `keyword.rs`:  Offline keyword-based interpretation.
// - `presets.rs`:  Canned descriptions (fallbacks and per-genre presets).
// - `fallback.rs`: Seedable random choice among fallbacks.
// - `config.rs`:   JSON config with defaults; output file naming.
// - `pipeline.rs`: `Assistant`, tying record -> transcribe -> interpret -> render.
// - `error.rs`:    `AssistantError`.
//
// The crate ships no network client and no audio capture. Host applications
// implement `ChatBackend`, `AudioRecorder` and `Transcriber` for whatever
// services they use; tests implement them with fixtures.

pub mod collab;
pub mod config;
pub mod error;
pub mod fallback;
pub mod keyword;
pub mod llm;
pub mod pipeline;
pub mod presets;

pub use collab::{AudioRecorder, ChatBackend, PromptParser, Transcriber};
pub use config::{AssistantConfig, RecordingConfig};
pub use error::AssistantError;
pub use keyword::KeywordParser;
pub use llm::LlmPromptParser;
pub use pipeline::{Assistant, RunReport};
