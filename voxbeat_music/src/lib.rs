// voxbeat music renderer
//
// Turns a structured music description (genre, tempo, drum pattern, chord
// progression, melody) into a short Standard MIDI File. The description is
// normally produced by a language model from a spoken request; this crate
// only cares about the JSON shape, and treats every field as optional.
//
// Architecture:
// - description.rs: MusicDescription and its lenient JSON parsing + defaults
// - tables.rs: Static lookup data (beat grid, drum keys, chords, note letters)
// - pitch.rs: Chord-symbol and note-name resolution with fallbacks
// - timeline.rs: Expansion of a description into timed NoteEvents per track
// - midi.rs: SMF encoding and the single-write file output
// - render.rs: Public render entry points (description, bare drum pattern,
//   sequential step melody)
// - error.rs: DescriptionError / RenderError
//
// Rendering is deterministic: the same description always yields the same
// bytes.

pub mod description;
pub mod error;
pub mod midi;
pub mod pitch;
pub mod render;
pub mod tables;
pub mod timeline;

pub use description::{MusicDescription, MusicType};
pub use error::{DescriptionError, RenderError};
pub use render::{MelodyStep, render, render_drum_pattern, render_step_melody};
pub use timeline::{Channel, NoteEvent, Timeline, Track};
