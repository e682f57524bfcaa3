//! Scroll-reveal latch driven by intersection callbacks.

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px -100px 0px";

#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
    pub threshold: f64,
    pub root_margin: String,
    pub delay_ms: u32,
    pub freeze_once_visible: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            delay_ms: 0,
            freeze_once_visible: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Unseen,
    /// Intersecting, waiting for the reveal delay.
    Pending,
    Visible,
    /// Was visible, scrolled out again. Only reachable without freeze.
    Hidden,
}

/// What the caller has to do after feeding an observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    None,
    /// Wait `delay_ms`, then call [`RevealState::activate`].
    Schedule { delay_ms: u32 },
    /// Re-render as concealed.
    Conceal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealState {
    phase: Phase,
    seen: bool,
    freeze: bool,
    delay_ms: u32,
}

impl RevealState {
    pub fn new(options: &RevealOptions) -> Self {
        Self {
            phase: Phase::Unseen,
            seen: false,
            freeze: options.freeze_once_visible,
            delay_ms: options.delay_ms,
        }
    }

    /// Used when the browser has no intersection observer.
    pub fn revealed(options: &RevealOptions) -> Self {
        Self {
            phase: Phase::Visible,
            seen: true,
            freeze: options.freeze_once_visible,
            delay_ms: options.delay_ms,
        }
    }

    /// Starts over with new options, as if the element had never been seen.
    pub fn reset(&mut self, options: &RevealOptions) {
        *self = Self::new(options);
    }

    pub fn observe(&mut self, intersecting: bool) -> RevealAction {
        if self.is_frozen() {
            return RevealAction::None;
        }

        match (self.phase, intersecting) {
            (Phase::Unseen | Phase::Hidden, true) => {
                self.phase = Phase::Pending;
                RevealAction::Schedule {
                    delay_ms: self.delay_ms,
                }
            }
            (Phase::Pending, false) => {
                self.phase = if self.seen { Phase::Hidden } else { Phase::Unseen };
                RevealAction::None
            }
            (Phase::Visible, false) => {
                self.phase = Phase::Hidden;
                RevealAction::Conceal
            }
            _ => RevealAction::None,
        }
    }

    /// Completes a scheduled reveal. Returns whether the element became
    /// active; a reveal whose target left the viewport in the meantime is
    /// dropped.
    pub fn activate(&mut self) -> bool {
        if self.phase != Phase::Pending {
            return false;
        }

        self.phase = Phase::Visible;
        self.seen = true;
        true
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Visible
    }

    pub fn has_been_visible(&self) -> bool {
        self.seen
    }

    /// Once frozen, observation can be disconnected.
    pub fn is_frozen(&self) -> bool {
        self.freeze && self.phase == Phase::Visible
    }
}
