//! Typing/deleting text cycler.
//!
//! The cycler owns no timer. The caller asks for [`Typewriter::delay_ms`],
//! waits that long, then calls [`Typewriter::tick`] and repeats.

pub const DEFAULT_TYPE_INTERVAL_MS: u32 = 100;
pub const DEFAULT_PAUSE_MS: u32 = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Holding,
    Deleting,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    phrases: Vec<String>,
    index: usize,
    shown: usize,
    phase: Phase,
    type_interval_ms: u32,
    pause_ms: u32,
}

impl Typewriter {
    /// Returns `None` for an empty phrase list.
    pub fn new(phrases: Vec<String>, type_interval_ms: u32, pause_ms: u32) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }

        let mut typewriter = Self {
            phrases,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
            type_interval_ms,
            pause_ms,
        };
        typewriter.skip_empty_phrase();
        Some(typewriter)
    }

    pub fn text(&self) -> &str {
        let phrase = self.phrase();
        let end = phrase
            .char_indices()
            .nth(self.shown)
            .map(|(offset, _)| offset)
            .unwrap_or(phrase.len());
        &phrase[..end]
    }

    pub fn phrase(&self) -> &str {
        &self.phrases[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn delay_ms(&self) -> u32 {
        match self.phase {
            Phase::Typing => self.type_interval_ms,
            Phase::Holding => self.pause_ms,
            Phase::Deleting => self.type_interval_ms / 2,
        }
    }

    pub fn tick(&mut self) {
        match self.phase {
            Phase::Typing => {
                self.shown += 1;
                if self.shown >= self.phrase_len() {
                    self.shown = self.phrase_len();
                    self.phase = Phase::Holding;
                }
            }
            Phase::Holding => self.phase = Phase::Deleting,
            Phase::Deleting => {
                if self.shown > 0 {
                    self.shown -= 1;
                } else {
                    self.index = (self.index + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                    self.skip_empty_phrase();
                }
            }
        }
    }

    fn phrase_len(&self) -> usize {
        self.phrase().chars().count()
    }

    // An empty phrase has nothing to type and goes straight to the pause.
    fn skip_empty_phrase(&mut self) {
        if self.phase == Phase::Typing && self.phrase().is_empty() {
            self.phase = Phase::Holding;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn phrases(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn empty_phrase_list_has_no_cycler() {
        assert!(Typewriter::new(Vec::new(), 100, 2_000).is_none());
    }

    #[test]
    fn types_pauses_deletes_then_advances() {
        let mut typewriter = Typewriter::new(phrases(&["ab", "c"]), 100, 2_000).expect("non-empty");

        assert_eq!(typewriter.text(), "");
        assert_eq!(typewriter.delay_ms(), 100);

        typewriter.tick();
        assert_eq!(typewriter.text(), "a");
        typewriter.tick();
        assert_eq!(typewriter.text(), "ab");
        assert_eq!(typewriter.phase(), Phase::Holding);
        assert_eq!(typewriter.delay_ms(), 2_000);

        typewriter.tick();
        assert_eq!(typewriter.phase(), Phase::Deleting);
        assert_eq!(typewriter.delay_ms(), 50);

        typewriter.tick();
        assert_eq!(typewriter.text(), "a");
        typewriter.tick();
        assert_eq!(typewriter.text(), "");
        typewriter.tick();
        assert_eq!(typewriter.index(), 1);
        assert_eq!(typewriter.phase(), Phase::Typing);
    }

    #[test]
    fn wraps_back_to_first_phrase() {
        let mut typewriter = Typewriter::new(phrases(&["x", "y"]), 10, 20).expect("non-empty");
        let mut visited = vec![typewriter.index()];

        for _ in 0..40 {
            typewriter.tick();
            if visited.last() != Some(&typewriter.index()) {
                visited.push(typewriter.index());
            }
        }

        assert_eq!(&visited[..4], &[0, 1, 0, 1]);
    }

    #[test]
    fn empty_phrase_goes_straight_to_pause() {
        let mut typewriter = Typewriter::new(phrases(&["", "hi"]), 100, 500).expect("non-empty");
        assert_eq!(typewriter.phase(), Phase::Holding);

        typewriter.tick();
        typewriter.tick();
        assert_eq!(typewriter.index(), 1);
        assert_eq!(typewriter.phase(), Phase::Typing);
    }

    #[test]
    fn single_phrase_of_empty_text_never_stalls() {
        let mut typewriter = Typewriter::new(phrases(&[""]), 100, 500).expect("non-empty");

        for _ in 0..10 {
            typewriter.tick();
            assert_eq!(typewriter.text(), "");
        }
        assert_eq!(typewriter.index(), 0);
    }

    #[test]
    fn multibyte_phrases_split_on_char_boundaries() {
        let mut typewriter = Typewriter::new(phrases(&["héllo"]), 100, 500).expect("non-empty");
        typewriter.tick();
        typewriter.tick();
        assert_eq!(typewriter.text(), "hé");
    }

    proptest! {
        #[test]
        fn text_is_always_a_prefix_and_order_is_kept(
            list in prop::collection::vec(".{0,6}", 1..5),
            ticks in 0usize..200,
        ) {
            let mut typewriter = Typewriter::new(list.clone(), 100, 2_000).expect("non-empty");
            let mut previous = typewriter.index();

            for _ in 0..ticks {
                typewriter.tick();
                prop_assert!(typewriter.phrase().starts_with(typewriter.text()));

                let current = typewriter.index();
                if current != previous {
                    prop_assert_eq!(current, (previous + 1) % list.len());
                    previous = current;
                }
            }
        }
    }
}
