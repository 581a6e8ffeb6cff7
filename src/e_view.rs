use crate::e_target::AntTarget;
use crate::prelude::*;

/// Filter state of the panel: the primary-only toggle and the search query.
///
/// Filtering is applied to a freshly parsed list on every request, so the
/// view never holds on to target records itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetView {
    primary_only: bool,
    search_query: String,
}

impl TargetView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary_only(&self) -> bool {
        self.primary_only
    }

    /// The stored (lower-cased, untrimmed) query.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Flips the primary-only toggle and returns the new value.
    pub fn toggle_primary_only(&mut self) -> bool {
        self.primary_only = !self.primary_only;
        info!("Toggle filter: primary_only = {}", self.primary_only);
        self.primary_only
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_lowercase();
    }

    pub fn clear_search(&mut self) {
        self.set_search_query("");
    }

    /// Returns true when any filter would drop targets.
    pub fn is_filtering(&self) -> bool {
        self.primary_only || !self.search_query.trim().is_empty()
    }

    /// Applies primary-only, then search, keeping input order.
    pub fn apply(&self, targets: Vec<AntTarget>) -> Vec<AntTarget> {
        let mut visible = targets;

        if self.primary_only {
            visible.retain(AntTarget::is_primary);
            debug!("Primary targets (with description): {}", visible.len());
        } else {
            debug!("Showing all targets");
        }

        let query = self.search_query.trim();
        if !query.is_empty() {
            visible.retain(|target| matches_query(target, query));
            debug!("Filtered by search '{}': {} targets", query, visible.len());
        }

        visible
    }
}

fn matches_query(target: &AntTarget, query: &str) -> bool {
    target.name.to_lowercase().contains(query)
        || (!target.description.is_empty() && target.description.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e_parser::parse_targets;

    fn scenario() -> Vec<AntTarget> {
        parse_targets(
            "<target name=\"init\" description=\"Initialize\" depends=\"\">\n\
             <target name=\"clean\">\n\
             <target name=\"build\" description=\"Build all\" depends=\"init,clean\">\n",
            "build.xml",
        )
    }

    fn names(targets: &[AntTarget]) -> Vec<&str> {
        targets.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn no_filters_keeps_everything_in_order() {
        let view = TargetView::new();
        assert_eq!(names(&view.apply(scenario())), vec!["init", "clean", "build"]);
    }

    #[test]
    fn primary_only_drops_undocumented_targets() {
        let mut view = TargetView::new();
        assert!(view.toggle_primary_only());
        assert_eq!(names(&view.apply(scenario())), vec!["init", "build"]);
        assert!(!view.toggle_primary_only());
        assert_eq!(view.apply(scenario()).len(), 3);
    }

    #[test]
    fn search_matches_description() {
        let mut view = TargetView::new();
        view.set_search_query("all");
        assert_eq!(names(&view.apply(scenario())), vec!["build"]);
    }

    #[test]
    fn search_is_case_insensitive_and_trimmed() {
        let mut view = TargetView::new();
        view.set_search_query("  INIT ");
        assert_eq!(view.search_query(), "  init ");
        assert_eq!(names(&view.apply(scenario())), vec!["init"]);
    }

    #[test]
    fn whitespace_query_does_not_filter() {
        let mut view = TargetView::new();
        view.set_search_query("   ");
        assert!(!view.is_filtering());
        assert_eq!(view.apply(scenario()).len(), 3);
    }

    #[test]
    fn empty_description_never_matches_via_description() {
        let mut view = TargetView::new();
        view.set_search_query("e");
        // "init" matches through "Initialize", "clean" through its name.
        assert_eq!(names(&view.apply(scenario())), vec!["init", "clean"]);
        view.set_search_query("nitial");
        assert_eq!(names(&view.apply(scenario())), vec!["init"]);
    }

    #[test]
    fn primary_then_search_equals_search_over_primary_subset() {
        let mut both = TargetView::new();
        both.toggle_primary_only();
        both.set_search_query("i");

        let mut primary = TargetView::new();
        primary.toggle_primary_only();
        let mut search = TargetView::new();
        search.set_search_query("i");

        assert_eq!(
            both.apply(scenario()),
            search.apply(primary.apply(scenario()))
        );
    }

    #[test]
    fn clear_search_is_idempotent() {
        let fresh = TargetView::new();
        let mut view = TargetView::new();
        view.set_search_query("build");
        view.clear_search();
        view.clear_search();
        assert_eq!(view, fresh);
        view.set_search_query("");
        assert_eq!(view, fresh);
        assert_eq!(view.apply(scenario()), fresh.apply(scenario()));
    }

    #[test]
    fn classification_survives_toggles() {
        let mut view = TargetView::new();
        for _ in 0..3 {
            view.toggle_primary_only();
            for target in view.apply(scenario()) {
                assert_eq!(target.is_primary(), !target.description.trim().is_empty());
            }
        }
    }
}
