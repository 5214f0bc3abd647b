// Request interpretation through a chat-completion model.
//
// The model is asked (via SYSTEM_PROMPT) to answer with a single JSON object
// in the MusicDescription shape. Replies are handled in three tiers:
// - JSON found and parsed: returned as-is (lenient parsing fills gaps)
// - reply received but no usable JSON: a full fallback description
// - backend error: a drum-only fallback groove
// An unconfigured backend (no credentials) is never called and yields None.
//
// Models often wrap JSON in Markdown fences or add a sentence before it, so
// `extract_json` takes the outermost {...} span of the reply.

use crate::collab::{ChatBackend, PromptParser};
use crate::config::AssistantConfig;
use crate::fallback::FallbackPicker;
use tracing::{debug, info, warn};
use voxbeat_music::MusicDescription;

pub const SYSTEM_PROMPT: &str = r#"You turn natural-language music requests into structured instructions.
Answer with ONLY a JSON object of this shape:
{
  "genre": "string (trap, lo-fi, house, hip-hop, dubstep, techno, jazz, funk, classical, ambient, ...)",
  "bpm": number,
  "music_type": "drums | chords | melody | mixed",
  "pattern": {
    "kick": "comma-separated beat positions, e.g. 1,1.3,2,2.3",
    "snare": "e.g. 2,4",
    "hats": "e.g. 1.2,1.4,2.2,2.4,3.2,3.4,4.2,4.4"
  },
  "chords": ["C", "Am", "F", "G"] or null,
  "melody": ["C4", "E4", "G4", "A4"] or null
}

Beat positions: 1 is beat one, 1.2 / 1.3 / 1.4 are the second, third and fourth
sixteenth of beat one, and so on up to 4.4. Drum voices: kick, snare, hats,
crash, tom, clap.

Pick music_type from the request:
- chords or jazz: "chords", with a chord progression
- melody or piano: "melody", with melody notes
- drums or beat: "drums", with a drum pattern
- mixed: drums plus chords and/or melody

Genre guide:
- Jazz: ii-V-I style progressions, 120-140 BPM
- Lo-fi: simple chords, relaxed, 80-90 BPM
- Trap: heavy sparse drums, 140-150 BPM
- House: four on the floor, 125-130 BPM
- Hip-hop: boom-bap drums, 85-95 BPM
- Classical: melodic lines, 60-120 BPM
- Ambient: sparse and atmospheric, 60-80 BPM"#;

/// The outermost `{...}` span of a model reply, if any.
pub fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

/// Parse a model reply into a description, or `None` if it holds no JSON object.
pub fn parse_reply(reply: &str) -> Option<MusicDescription> {
    let json = extract_json(reply)?;
    match MusicDescription::from_json_str(json) {
        Ok(desc) => Some(desc),
        Err(e) => {
            debug!(error = %e, "reply JSON rejected");
            None
        }
    }
}

/// `PromptParser` backed by a chat model, with canned fallbacks.
pub struct LlmPromptParser<B> {
    backend: B,
    fallbacks: FallbackPicker,
}

impl<B: ChatBackend> LlmPromptParser<B> {
    pub fn new(backend: B, fallback_seed: Option<u64>) -> Self {
        LlmPromptParser {
            backend,
            fallbacks: FallbackPicker::new(fallback_seed),
        }
    }

    /// Seed fallback selection from the config.
    pub fn with_config(backend: B, config: &AssistantConfig) -> Self {
        Self::new(backend, config.fallback_seed)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChatBackend> PromptParser for LlmPromptParser<B> {
    fn parse(&self, text: &str) -> Option<MusicDescription> {
        if !self.backend.is_configured() {
            warn!("chat backend has no credentials; cannot interpret request");
            return None;
        }

        match self.backend.complete(SYSTEM_PROMPT, text) {
            Ok(reply) => match parse_reply(&reply) {
                Some(desc) => {
                    info!(
                        genre = desc.genre.as_str(),
                        bpm = desc.bpm,
                        "model reply parsed"
                    );
                    Some(desc)
                }
                None => {
                    let fallback = self.fallbacks.malformed_reply();
                    warn!(
                        reply = reply.as_str(),
                        fallback = fallback.genre.as_str(),
                        "model reply was not JSON, using fallback"
                    );
                    Some(fallback)
                }
            },
            Err(e) => {
                let fallback = self.fallbacks.call_failed();
                warn!(
                    error = %e,
                    fallback = fallback.genre.as_str(),
                    "chat call failed, using fallback"
                );
                Some(fallback)
            }
        }
    }
}
