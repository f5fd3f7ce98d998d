//! Row selection state machine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable identity of a row, independent of its display position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for RowId {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or_else(|_| Self::Text(n.to_string()), Self::Int)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Selection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one row
    Single,
    /// Any subset of rows, with select-all
    #[default]
    Multiple,
}

/// Set of selected row identities.
///
/// Identities are merged: two rows yielding the same [`RowId`] share one
/// entry and are selected together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    mode: SelectionMode,
    selected: BTreeSet<RowId>,
}

impl RowSelection {
    /// Empty selection in `mode`.
    #[must_use]
    pub const fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// Selection mode.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected identities in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    /// Toggle a single row.
    ///
    /// In single mode a selected row is deselected and any other row replaces
    /// the current selection. In multiple mode membership flips.
    pub fn toggle(&mut self, id: RowId) {
        match self.mode {
            SelectionMode::Single => {
                let was_selected = self.selected.contains(&id);
                self.selected.clear();
                if !was_selected {
                    self.selected.insert(id);
                }
            }
            SelectionMode::Multiple => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
        }
    }

    /// Whether every visible row is selected.
    ///
    /// Always false in single mode or with no visible rows.
    #[must_use]
    pub fn is_all_selected(&self, visible: &[RowId]) -> bool {
        self.mode == SelectionMode::Multiple
            && !visible.is_empty()
            && visible.iter().all(|id| self.selected.contains(id))
    }

    /// Select every visible row, or clear if they already all are.
    ///
    /// Only acts in multiple mode with visible rows. Returns whether the
    /// selection changed.
    pub fn toggle_all(&mut self, visible: &[RowId]) -> bool {
        if self.mode != SelectionMode::Multiple || visible.is_empty() {
            return false;
        }
        let before = self.selected.clone();
        if self.is_all_selected(visible) {
            self.selected.clear();
        } else {
            self.selected = visible.iter().cloned().collect();
        }
        before != self.selected
    }

    /// Drop identities that are no longer visible.
    ///
    /// Returns `true` only when something was removed.
    pub fn reconcile(&mut self, visible: &[RowId]) -> bool {
        let visible: BTreeSet<&RowId> = visible.iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| visible.contains(id));
        let pruned = before - self.selected.len();
        if pruned > 0 {
            log::trace!("selection reconcile pruned {pruned} stale ids");
        }
        pruned > 0
    }

    /// Clear the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.selected.is_empty();
        self.selected.clear();
        had_any
    }
}
