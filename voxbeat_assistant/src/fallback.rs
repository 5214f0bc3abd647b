// Random choice among canned descriptions when the chat model fails.
//
// With a seed the sequence of picks is reproducible, which is what tests
// and the `fallback_seed` config option rely on. Without one the picker is
// seeded from OS entropy.

use crate::presets::{call_failed_fallbacks, malformed_reply_fallbacks};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cell::RefCell;
use voxbeat_music::MusicDescription;

pub struct FallbackPicker {
    rng: RefCell<StdRng>,
    malformed: Vec<MusicDescription>,
    failed: Vec<MusicDescription>,
}

impl FallbackPicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        FallbackPicker {
            rng: RefCell::new(rng),
            malformed: malformed_reply_fallbacks(),
            failed: call_failed_fallbacks(),
        }
    }

    /// A full description to use in place of an unparseable reply.
    pub fn malformed_reply(&self) -> MusicDescription {
        self.pick(&self.malformed)
    }

    /// A drum groove to use when the chat call itself failed.
    pub fn call_failed(&self) -> MusicDescription {
        self.pick(&self.failed)
    }

    fn pick(&self, options: &[MusicDescription]) -> MusicDescription {
        let mut rng = self.rng.borrow_mut();
        options.choose(&mut *rng).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_picks_repeat() {
        let a = FallbackPicker::new(Some(7));
        let b = FallbackPicker::new(Some(7));
        for _ in 0..10 {
            assert_eq!(a.malformed_reply(), b.malformed_reply());
            assert_eq!(a.call_failed(), b.call_failed());
        }
    }

    #[test]
    fn test_picks_come_from_the_right_set() {
        let picker = FallbackPicker::new(None);
        let malformed = malformed_reply_fallbacks();
        let failed = call_failed_fallbacks();
        for _ in 0..20 {
            assert!(malformed.contains(&picker.malformed_reply()));
            assert!(failed.contains(&picker.call_failed()));
        }
    }
}
