//! Render-ready snapshots of the table.
//!
//! These are what `paint` and `to_html` draw from, and what callers can use
//! to drive their own presentation.

use super::cell::Record;
use super::column::TextAlign;
use super::selection::RowId;
use super::{DataTable, SKELETON_ROWS};

/// A header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub header: String,
    pub sortable: bool,
    /// Sort glyph, for sortable columns
    pub indicator: Option<&'static str>,
    /// `aria-sort` value; always "none" for non-sortable columns
    pub aria_sort: &'static str,
    pub width: Option<f32>,
    pub align: TextAlign,
    pub class_name: Option<String>,
}

/// A displayed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    /// Display position, zero-based
    pub position: usize,
    pub selected: bool,
    /// Cell text, one entry per column
    pub cells: Vec<String>,
}

/// What the table body shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Placeholder rows while loading
    Loading { rows: usize },
    /// No rows; carries the empty-state message
    Empty(String),
    Rows(Vec<RowView>),
}

impl<T: Record> DataTable<T> {
    /// Header cells in column order.
    #[must_use]
    pub fn header_views(&self) -> Vec<HeaderView> {
        self.columns
            .iter()
            .map(|column| {
                let direction = self.sort.direction_for(column.id());
                HeaderView {
                    header: column.header.clone(),
                    sortable: column.sortable,
                    indicator: column.sortable.then(|| direction.glyph()),
                    aria_sort: if column.sortable {
                        direction.aria_sort()
                    } else {
                        "none"
                    },
                    width: column.width,
                    align: column.align,
                    class_name: column.class_name.clone(),
                }
            })
            .collect()
    }

    /// Body contents for the current state.
    #[must_use]
    pub fn body(&self) -> TableBody {
        if self.loading {
            return TableBody::Loading {
                rows: SKELETON_ROWS,
            };
        }
        if self.rows.is_empty() {
            return TableBody::Empty(self.empty_state.clone());
        }
        let rows = self
            .order
            .iter()
            .zip(&self.ids)
            .enumerate()
            .map(|(position, (&index, id))| {
                let row = &self.rows[index];
                RowView {
                    id: id.clone(),
                    position,
                    selected: self.selection.contains(id),
                    cells: self.columns.iter().map(|c| c.cell_text(row)).collect(),
                }
            })
            .collect();
        TableBody::Rows(rows)
    }
}
