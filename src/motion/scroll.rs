//! Scroll offset tracking for the back-to-top button and section highlighting.

pub const DEFAULT_BACK_TO_TOP_THRESHOLD: f64 = 300.0;
pub const DEFAULT_SECTION_PROBE: f64 = 100.0;

/// A section's bounding box relative to the viewport top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds<'a> {
    pub id: &'a str,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBounds<'_> {
    fn straddles(&self, marker: f64) -> bool {
        self.top <= marker && marker < self.bottom
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveSection {
    #[default]
    None,
    Section(String),
}

impl ActiveSection {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Section(id) => Some(id.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollChange {
    pub past_threshold: bool,
    pub active_section: bool,
}

impl ScrollChange {
    pub fn any(self) -> bool {
        self.past_threshold || self.active_section
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    threshold: f64,
    marker: f64,
    past_threshold: bool,
    active: ActiveSection,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(DEFAULT_BACK_TO_TOP_THRESHOLD, DEFAULT_SECTION_PROBE)
    }
}

impl ScrollState {
    pub fn new(threshold: f64, marker: f64) -> Self {
        Self {
            threshold,
            marker,
            past_threshold: false,
            active: ActiveSection::None,
        }
    }

    pub fn past_threshold(&self) -> bool {
        self.past_threshold
    }

    pub fn active(&self) -> &ActiveSection {
        &self.active
    }

    /// Feeds one scroll event. Sections are checked in order and the first
    /// one straddling the marker line wins; when none does, the previous
    /// active section is kept.
    pub fn update(&mut self, offset: f64, sections: &[SectionBounds<'_>]) -> ScrollChange {
        let past_threshold = offset > self.threshold;
        let mut change = ScrollChange {
            past_threshold: past_threshold != self.past_threshold,
            active_section: false,
        };
        self.past_threshold = past_threshold;

        if let Some(hit) = sections.iter().find(|section| section.straddles(self.marker)) {
            if self.active.id() != Some(hit.id) {
                self.active = ActiveSection::Section(hit.id.to_string());
                change.active_section = true;
            }
        }

        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(id: &str, top: f64, bottom: f64) -> SectionBounds<'_> {
        SectionBounds { id, top, bottom }
    }

    #[test]
    fn threshold_toggles_only_at_crossings() {
        let mut state = ScrollState::default();
        let mut toggles = Vec::new();

        for offset in [0.0, 150.0, 300.0, 301.0, 600.0, 450.0, 300.0, 120.0] {
            if state.update(offset, &[]).past_threshold {
                toggles.push((offset, state.past_threshold()));
            }
        }

        assert_eq!(toggles, vec![(301.0, true), (300.0, false)]);
    }

    #[test]
    fn first_straddling_section_wins() {
        let mut state = ScrollState::default();
        let sections = [bounds("a", -50.0, 120.0), bounds("b", 90.0, 400.0)];

        assert!(state.update(0.0, &sections).active_section);
        assert_eq!(state.active().id(), Some("a"));
    }

    #[test]
    fn active_section_is_kept_when_no_section_straddles_the_line() {
        let mut state = ScrollState::default();
        state.update(0.0, &[bounds("a", 200.0, 400.0), bounds("b", 50.0, 300.0)]);
        assert_eq!(state.active().id(), Some("b"));

        let change = state.update(300.0, &[bounds("a", 0.0, 100.0), bounds("b", 150.0, 300.0)]);
        assert!(!change.active_section);
        assert_eq!(state.active().id(), Some("b"));
    }

    #[test]
    fn section_starting_on_the_line_wins_over_one_ending_there() {
        let mut state = ScrollState::default();
        let change = state.update(
            500.0,
            &[bounds("about", -400.0, 100.0), bounds("projects", 100.0, 700.0)],
        );

        assert!(change.active_section);
        assert_eq!(state.active().id(), Some("projects"));
    }

    #[test]
    fn no_section_before_any_match() {
        let mut state = ScrollState::default();
        let change = state.update(0.0, &[bounds("a", 200.0, 400.0)]);

        assert!(!change.any());
        assert_eq!(state.active(), &ActiveSection::None);
    }

    #[test]
    fn moving_into_the_next_section_reports_a_change() {
        let mut state = ScrollState::default();
        state.update(0.0, &[bounds("a", 0.0, 500.0), bounds("b", 500.0, 900.0)]);

        let change = state.update(450.0, &[bounds("a", -450.0, 50.0), bounds("b", 50.0, 450.0)]);
        assert!(change.active_section);
        assert_eq!(state.active().id(), Some("b"));
    }
}
