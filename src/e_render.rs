use crate::e_target::{AntTarget, TargetId, TargetKind};
use std::collections::HashMap;

/// Marker shown in front of primary targets.
pub const PRIMARY_ICON: &str = "◎";
/// Marker shown in front of secondary targets.
pub const SECONDARY_ICON: &str = "○";

/// What a panel row looks like. Carries no behavior; actions are looked up by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: TargetId,
    pub label: String,
    /// `— <description>`, or empty for secondary targets.
    pub detail: String,
    pub tooltip: String,
    pub icon: &'static str,
}

impl TreeRow {
    pub fn from_target(target: &AntTarget) -> Self {
        let (detail, tooltip, icon) = match target.kind() {
            TargetKind::Primary => (
                format!("— {}", target.description),
                format!("{}\n\n{}", target.name, target.description),
                PRIMARY_ICON,
            ),
            TargetKind::Secondary => (String::new(), target.name.clone(), SECONDARY_ICON),
        };
        TreeRow {
            id: target.id(),
            label: target.name.clone(),
            detail,
            tooltip,
            icon,
        }
    }
}

/// What happens when a row is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Routed through the double-click tracker.
    Click,
    Open,
    Run,
}

/// Rows for the current refresh plus the records they were built from.
///
/// Rebuilt on every refresh; ids from an older refresh simply stop resolving.
#[derive(Debug, Default)]
pub struct ActionTable {
    rows: Vec<TreeRow>,
    targets: HashMap<TargetId, AntTarget>,
}

impl ActionTable {
    pub fn build(targets: &[AntTarget]) -> Self {
        let rows = targets.iter().map(TreeRow::from_target).collect();
        let targets = targets.iter().map(|t| (t.id(), t.clone())).collect();
        ActionTable { rows, targets }
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn resolve(&self, id: &TargetId) -> Option<&AntTarget> {
        self.targets.get(id)
    }

    pub fn target_at(&self, index: usize) -> Option<&AntTarget> {
        self.rows.get(index).and_then(|row| self.resolve(&row.id))
    }
}
