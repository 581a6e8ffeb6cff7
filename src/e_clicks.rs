//! Tells a single click (select) from a double click (run) on a target row.

/// Two clicks on the same target closer together than this are a double click.
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click, or a click too late or on another target.
    Select,
    /// Second click on the same target inside the window; run it.
    Run(String),
}

/// One pending click for the whole panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTracker {
    last: Option<(String, u64)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a click on `name` at `now_ms` and decides what it means.
    ///
    /// A run resets the tracker, so a third rapid click starts over as a
    /// select.
    pub fn click(&mut self, name: &str, now_ms: u64) -> ClickOutcome {
        match &self.last {
            Some((last_name, last_ms))
                if last_name == name
                    && now_ms.saturating_sub(*last_ms) < DOUBLE_CLICK_WINDOW_MS =>
            {
                self.last = None;
                ClickOutcome::Run(name.to_string())
            }
            _ => {
                self.last = Some((name.to_string(), now_ms));
                ClickOutcome::Select
            }
        }
    }

    pub fn pending(&self) -> Option<(&str, u64)> {
        self.last.as_ref().map(|(name, ms)| (name.as_str(), *ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_inside_window_run_once_and_reset() {
        let mut tracker = ClickTracker::new();
        assert_eq!(tracker.click("build", 0), ClickOutcome::Select);
        assert_eq!(tracker.click("build", 499), ClickOutcome::Run("build".into()));
        assert_eq!(tracker.pending(), None);
    }

    #[test]
    fn clicks_outside_window_only_select() {
        let mut tracker = ClickTracker::new();
        assert_eq!(tracker.click("build", 0), ClickOutcome::Select);
        assert_eq!(tracker.click("build", 501), ClickOutcome::Select);
        assert_eq!(tracker.pending(), Some(("build", 501)));
    }

    #[test]
    fn exactly_at_window_is_not_a_double_click() {
        let mut tracker = ClickTracker::new();
        tracker.click("build", 1000);
        assert_eq!(tracker.click("build", 1500), ClickOutcome::Select);
    }

    #[test]
    fn third_rapid_click_is_a_select() {
        let mut tracker = ClickTracker::new();
        tracker.click("build", 0);
        assert!(matches!(tracker.click("build", 100), ClickOutcome::Run(_)));
        assert_eq!(tracker.click("build", 200), ClickOutcome::Select);
        assert_eq!(tracker.pending(), Some(("build", 200)));
    }

    #[test]
    fn click_on_other_target_supersedes() {
        let mut tracker = ClickTracker::new();
        tracker.click("init", 0);
        assert_eq!(tracker.click("build", 100), ClickOutcome::Select);
        assert_eq!(tracker.click("build", 200), ClickOutcome::Run("build".into()));
    }
}
