//! `DataTable` widget: sortable, selectable tabular display.
//!
//! The table owns caller rows and column descriptors and derives everything
//! else from them. Every input change runs the same pipeline:
//!
//! 1. the sort engine derives the display order ([`sort_order`]),
//! 2. row identities are computed over the display order,
//! 3. the selection is reconciled against the visible identities,
//! 4. the selection callback fires if the selected set changed.
//!
//! While `loading` is set, sort and selection transitions are ignored and
//! the body renders as a skeleton; leaving the loading state reruns the
//! pipeline.

mod cell;
mod column;
mod config;
mod selection;
mod sort;
mod view;
mod widget;

pub use cell::{CellValue, Record, TableRow};
pub use column::{CellRenderer, SortAccessor, TableColumn, TextAlign};
pub use config::{ColumnConfig, TableConfig};
pub use selection::{RowId, RowSelection, SelectionMode};
pub use sort::{compare_values, natural_cmp, sort_order, SortDirection, SortState};
pub use view::{HeaderView, RowView, TableBody};

use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tabula_core::{Color, Rect};

/// Message shown when there are no rows.
pub const DEFAULT_EMPTY_STATE: &str = "No records found";

/// Number of placeholder rows rendered while loading.
pub const SKELETON_ROWS: usize = 3;

/// Computes a row's identity from the row and its display position.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> RowId + Send + Sync>;

/// Receives the selected rows, in display order, after each selection change.
pub type SelectCallback<T> = Box<dyn FnMut(&[&T]) + Send + Sync>;

fn debug_assert_unique_ids<T>(columns: &[TableColumn<T>]) {
    debug_assert!(
        {
            let mut seen = BTreeSet::new();
            columns.iter().all(|c| seen.insert(c.id()))
        },
        "duplicate column id in {:?}",
        columns.iter().map(TableColumn::id).collect::<Vec<_>>()
    );
}

/// Message emitted when table sorting changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSortChanged {
    /// Identifier of the activated column
    pub column: String,
    /// Direction after the transition
    pub direction: SortDirection,
}

/// Message emitted when the row selection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSelectionChanged {
    /// Selected identities in display order
    pub selected: Vec<RowId>,
}

/// Sortable, selectable table over caller rows.
pub struct DataTable<T> {
    columns: Vec<TableColumn<T>>,
    rows: Vec<T>,
    /// Display order as indices into `rows`
    order: Vec<usize>,
    /// Identity of each displayed row, by display position
    ids: Vec<RowId>,
    sort: SortState,
    selection: RowSelection,
    selectable: bool,
    loading: bool,
    empty_state: String,
    class_name: Option<String>,
    row_id: RowIdFn<T>,
    on_row_select: Option<SelectCallback<T>>,
    row_height: f32,
    header_height: f32,
    striped: bool,
    bordered: bool,
    header_bg: Color,
    row_bg: Color,
    row_alt_bg: Color,
    selected_bg: Color,
    border_color: Color,
    text_color: Color,
    header_text_color: Color,
    accent_color: Color,
    skeleton_color: Color,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl<T: Record> DataTable<T> {
    /// Create a table with the given columns and no rows.
    ///
    /// Column ids must be unique; see [`TableColumn::id`].
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = TableColumn<T>>) -> Self {
        let columns: Vec<TableColumn<T>> = columns.into_iter().collect();
        debug_assert_unique_ids(&columns);
        Self {
            columns,
            rows: Vec::new(),
            order: Vec::new(),
            ids: Vec::new(),
            sort: SortState::new(),
            selection: RowSelection::new(SelectionMode::Multiple),
            selectable: false,
            loading: false,
            empty_state: DEFAULT_EMPTY_STATE.to_string(),
            class_name: None,
            row_id: Arc::new(|_, position| RowId::from(position)),
            on_row_select: None,
            row_height: 40.0,
            header_height: 44.0,
            striped: true,
            bordered: true,
            header_bg: Color::new(0.95, 0.95, 0.95, 1.0),
            row_bg: Color::WHITE,
            row_alt_bg: Color::new(0.98, 0.98, 0.98, 1.0),
            selected_bg: Color::new(0.9, 0.95, 1.0, 1.0),
            border_color: Color::new(0.85, 0.85, 0.85, 1.0),
            text_color: Color::BLACK,
            header_text_color: Color::new(0.2, 0.2, 0.2, 1.0),
            accent_color: Color::BLUE,
            skeleton_color: Color::new(0.9, 0.9, 0.92, 1.0),
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Build a table from a validated configuration.
    pub fn from_config(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut table = Self::new(config.to_columns())
            .selectable(config.selectable)
            .selection_mode(config.selection_mode)
            .empty_state(config.empty_state.clone())
            .loading(config.loading);
        table.class_name.clone_from(&config.class_name);
        Ok(table)
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn<T>) -> Self {
        self.columns.push(column);
        debug_assert_unique_ids(&self.columns);
        self.refresh();
        self
    }

    /// Replace the rows.
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = T>) -> Self {
        self.set_data(rows);
        self
    }

    /// Set the loading state.
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.set_loading(loading);
        self
    }

    /// Enable row selection.
    #[must_use]
    pub const fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set the selection mode. Clears the current selection.
    #[must_use]
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection = RowSelection::new(mode);
        self
    }

    /// Derive row identities from the row instead of its display position.
    #[must_use]
    pub fn row_id(mut self, f: impl Fn(&T, usize) -> RowId + Send + Sync + 'static) -> Self {
        self.row_id = Arc::new(f);
        self.refresh();
        self
    }

    /// Register the selection callback.
    #[must_use]
    pub fn on_row_select(mut self, f: impl FnMut(&[&T]) + Send + Sync + 'static) -> Self {
        self.on_row_select = Some(Box::new(f));
        self
    }

    /// Set the message shown when there are no rows.
    #[must_use]
    pub fn empty_state(mut self, message: impl Into<String>) -> Self {
        self.empty_state = message.into();
        self
    }

    /// Set the presentation class.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Set row height.
    #[must_use]
    pub fn row_height(mut self, height: f32) -> Self {
        self.row_height = height.max(20.0);
        self
    }

    /// Set header height.
    #[must_use]
    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height.max(20.0);
        self
    }

    /// Enable striped rows.
    #[must_use]
    pub const fn striped(mut self, striped: bool) -> Self {
        self.striped = striped;
        self
    }

    /// Enable borders.
    #[must_use]
    pub const fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Set header background color.
    #[must_use]
    pub const fn header_bg(mut self, color: Color) -> Self {
        self.header_bg = color;
        self
    }

    /// Set row background color.
    #[must_use]
    pub const fn row_bg(mut self, color: Color) -> Self {
        self.row_bg = color;
        self
    }

    /// Set alternate row background color.
    #[must_use]
    pub const fn row_alt_bg(mut self, color: Color) -> Self {
        self.row_alt_bg = color;
        self
    }

    /// Set selected row background color.
    #[must_use]
    pub const fn selected_bg(mut self, color: Color) -> Self {
        self.selected_bg = color;
        self
    }

    /// Set text color.
    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set checkbox accent color.
    #[must_use]
    pub const fn accent_color(mut self, color: Color) -> Self {
        self.accent_color = color;
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // ===== Inputs =====

    /// Replace the rows and rerun the pipeline.
    pub fn set_data(&mut self, rows: impl IntoIterator<Item = T>) {
        self.rows = rows.into_iter().collect();
        self.refresh();
    }

    /// Replace the columns and rerun the pipeline.
    ///
    /// The sort state is kept; if its column is gone the input order shows
    /// until another column is activated.
    pub fn set_columns(&mut self, columns: impl IntoIterator<Item = TableColumn<T>>) {
        self.columns = columns.into_iter().collect();
        debug_assert_unique_ids(&self.columns);
        self.refresh();
    }

    /// Enter or leave the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading == loading {
            return;
        }
        self.loading = loading;
        self.refresh();
    }

    /// Replace the sort state programmatically.
    pub fn set_sort(&mut self, state: SortState) {
        if self.loading {
            return;
        }
        self.sort = state;
        self.refresh();
    }

    // ===== Transitions =====

    /// Activate the header of the column at `index`.
    ///
    /// Returns the new sort state when the column is sortable and the table
    /// is not loading.
    pub fn activate_column(&mut self, index: usize) -> Option<TableSortChanged> {
        if self.loading {
            return None;
        }
        let column = self.columns.get(index)?;
        if !self.sort.activate(column) {
            return None;
        }
        let changed = TableSortChanged {
            column: column.id().to_string(),
            direction: self.sort.direction(),
        };
        self.refresh();
        Some(changed)
    }

    /// Toggle the row at display `position`. Returns whether anything changed.
    pub fn toggle_row(&mut self, position: usize) -> bool {
        if !self.selectable || self.loading {
            return false;
        }
        let Some(id) = self.ids.get(position).cloned() else {
            return false;
        };
        self.selection.toggle(id);
        self.notify();
        true
    }

    /// Select every visible row, or clear if all are selected.
    ///
    /// Only acts in multiple mode. Returns whether anything changed.
    pub fn toggle_all(&mut self) -> bool {
        if !self.selectable || self.loading {
            return false;
        }
        let changed = self.selection.toggle_all(&self.ids);
        if changed {
            self.notify();
        }
        changed
    }

    fn refresh(&mut self) {
        if self.loading {
            self.order = (0..self.rows.len()).collect();
        } else {
            self.order = sort_order(&self.rows, &self.columns, &self.sort);
        }
        let row_id = &self.row_id;
        self.ids = self
            .order
            .iter()
            .enumerate()
            .map(|(position, &index)| row_id(&self.rows[index], position))
            .collect();
        if !self.loading && self.selection.reconcile(&self.ids) {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let selected: Vec<&T> = self
            .order
            .iter()
            .zip(&self.ids)
            .filter(|(_, id)| self.selection.contains(id))
            .map(|(&index, _)| &self.rows[index])
            .collect();
        log::debug!("row selection changed: {} selected", selected.len());
        if let Some(callback) = self.on_row_select.as_mut() {
            callback(selected.as_slice());
        }
    }
}

impl<T> DataTable<T> {
    /// Column descriptors.
    #[must_use]
    pub fn columns(&self) -> &[TableColumn<T>] {
        &self.columns
    }

    /// Rows in input order.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.rows
    }

    /// Get column count.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get row count.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the table is loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether rows can be selected.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Selection mode.
    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Current sort state.
    #[must_use]
    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Selection state.
    #[must_use]
    pub const fn selection(&self) -> &RowSelection {
        &self.selection
    }

    /// Message shown when there are no rows.
    #[must_use]
    pub fn empty_message(&self) -> &str {
        &self.empty_state
    }

    /// Rows in display order.
    #[must_use]
    pub fn display_rows(&self) -> Vec<&T> {
        self.order.iter().map(|&index| &self.rows[index]).collect()
    }

    /// Row identities in display order.
    #[must_use]
    pub fn display_ids(&self) -> &[RowId] {
        &self.ids
    }

    /// Whether the row at display `position` is selected.
    #[must_use]
    pub fn is_selected(&self, position: usize) -> bool {
        self.ids
            .get(position)
            .is_some_and(|id| self.selection.contains(id))
    }

    /// Whether every visible row is selected (multiple mode only).
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.selectable && self.selection.is_all_selected(&self.ids)
    }

    /// Selected identities in display order, each listed once.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut seen = BTreeSet::new();
        self.ids
            .iter()
            .filter(|id| self.selection.contains(id) && seen.insert(*id))
            .cloned()
            .collect()
    }

    /// Selected rows in display order.
    #[must_use]
    pub fn selected_rows(&self) -> Vec<&T> {
        self.order
            .iter()
            .zip(&self.ids)
            .filter(|(_, id)| self.selection.contains(id))
            .map(|(&index, _)| &self.rows[index])
            .collect()
    }

    /// Whether the leading checkbox column is shown.
    #[must_use]
    pub fn shows_checkboxes(&self) -> bool {
        self.selectable && self.selection.mode() == SelectionMode::Multiple
    }

    /// Label of the select-all checkbox, when shown.
    #[must_use]
    pub fn select_all_label(&self) -> Option<&'static str> {
        self.shows_checkboxes().then(|| {
            if self.is_all_selected() {
                "Deselect all rows"
            } else {
                "Select all rows"
            }
        })
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("selectable", &self.selectable)
            .field("loading", &self.loading)
            .field("empty_state", &self.empty_state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn users() -> Vec<TableRow> {
        vec![
            TableRow::new().cell("id", "u1").cell("name", "Ada").cell("age", 22),
            TableRow::new().cell("id", "u2").cell("name", "Bob").cell("age", 28),
            TableRow::new().cell("id", "u3").cell("name", "Cy").cell("age", 25),
        ]
    }

    fn columns() -> Vec<TableColumn<TableRow>> {
        vec![
            TableColumn::new("name", "Name").sortable(),
            TableColumn::new("age", "Age").sortable(),
            TableColumn::new("email", "Email"),
        ]
    }

    fn by_id(row: &TableRow, _: usize) -> RowId {
        RowId::from(row.field("id").display())
    }

    fn names(rows: &[&TableRow]) -> Vec<String> {
        rows.iter().map(|r| r.field("name").display()).collect()
    }

    type Log = Arc<Mutex<Vec<Vec<String>>>>;

    fn recorder() -> (Log, impl FnMut(&[&TableRow]) + Send + Sync + 'static) {
        let log: Log = Arc::default();
        let sink = Arc::clone(&log);
        let callback = move |rows: &[&TableRow]| {
            let ids = rows.iter().map(|r| r.field("id").display()).collect();
            sink.lock().unwrap().push(ids);
        };
        (log, callback)
    }

    #[test]
    fn test_data_table_new() {
        let table = DataTable::new(columns());
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
        assert!(!table.is_selectable());
        assert_eq!(table.mode(), SelectionMode::Multiple);
        assert_eq!(table.empty_message(), "No records found");
    }

    #[test]
    fn test_default_ids_are_positions() {
        let table = DataTable::new(columns()).rows(users());
        assert_eq!(
            table.display_ids(),
            &[RowId::Int(0), RowId::Int(1), RowId::Int(2)]
        );
    }

    #[test]
    fn test_activate_column_cycles_and_reorders() {
        let mut table = DataTable::new(columns()).rows(users());

        let msg = table.activate_column(1).unwrap();
        assert_eq!(msg.column, "age");
        assert_eq!(msg.direction, SortDirection::Ascending);
        assert_eq!(names(&table.display_rows()), ["Ada", "Cy", "Bob"]);

        table.activate_column(1);
        assert_eq!(names(&table.display_rows()), ["Bob", "Cy", "Ada"]);

        let msg = table.activate_column(1).unwrap();
        assert_eq!(msg.direction, SortDirection::None);
        assert_eq!(names(&table.display_rows()), ["Ada", "Bob", "Cy"]);
    }

    #[test]
    fn test_activate_non_sortable_or_missing_column() {
        let mut table = DataTable::new(columns()).rows(users());
        assert!(table.activate_column(2).is_none());
        assert!(table.activate_column(9).is_none());
        assert_eq!(table.sort_state(), &SortState::new());
    }

    #[test]
    fn test_toggle_requires_selectable() {
        let mut table = DataTable::new(columns()).rows(users());
        assert!(!table.toggle_row(0));
        assert!(!table.toggle_all());
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_selection_follows_identity_across_sort() {
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .row_id(by_id);
        assert!(table.toggle_row(1));
        assert_eq!(table.selected_ids(), vec![RowId::from("u2")]);

        table.activate_column(1);
        table.activate_column(1);
        assert_eq!(names(&table.display_rows()), ["Bob", "Cy", "Ada"]);
        assert!(table.is_selected(0));
        assert_eq!(names(&table.selected_rows()), ["Bob"]);
    }

    #[test]
    fn test_positional_ids_follow_position() {
        let mut table = DataTable::new(columns()).rows(users()).selectable(true);
        table.toggle_row(0);
        table.activate_column(1);
        table.activate_column(1);
        assert!(table.is_selected(0));
        assert_eq!(names(&table.selected_rows()), ["Bob"]);
    }

    #[test]
    fn test_callback_fires_on_toggle_with_display_order() {
        let (log, callback) = recorder();
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .row_id(by_id)
            .on_row_select(callback);
        table.activate_column(1);
        assert!(log.lock().unwrap().is_empty());

        table.toggle_row(2);
        table.toggle_row(0);
        assert_eq!(
            *log.lock().unwrap(),
            vec![vec!["u2".to_string()], vec!["u1".to_string(), "u2".to_string()]]
        );
    }

    #[test]
    fn test_pruning_notifies_once() {
        let (log, callback) = recorder();
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .row_id(by_id)
            .on_row_select(callback);
        assert!(table.toggle_all());
        log.lock().unwrap().clear();

        let remaining: Vec<TableRow> = users()
            .into_iter()
            .filter(|r| r.field("id").display() != "u2")
            .collect();
        table.set_data(remaining.clone());
        assert_eq!(
            *log.lock().unwrap(),
            vec![vec!["u1".to_string(), "u3".to_string()]]
        );

        table.set_data(remaining);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_single_mode() {
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .selection_mode(SelectionMode::Single)
            .row_id(by_id);
        assert!(!table.shows_checkboxes());
        assert!(table.select_all_label().is_none());
        assert!(!table.toggle_all());

        table.toggle_row(0);
        table.toggle_row(2);
        assert_eq!(table.selected_ids(), vec![RowId::from("u3")]);
        table.toggle_row(2);
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_select_all_label() {
        let mut table = DataTable::new(columns()).rows(users()).selectable(true);
        assert_eq!(table.select_all_label(), Some("Select all rows"));
        table.toggle_all();
        assert!(table.is_all_selected());
        assert_eq!(table.select_all_label(), Some("Deselect all rows"));
    }

    #[test]
    fn test_is_all_selected_false_when_empty() {
        let mut table: DataTable<TableRow> = DataTable::new(columns()).selectable(true);
        assert!(!table.toggle_all());
        assert!(!table.is_all_selected());
    }

    #[test]
    fn test_loading_bypasses_transitions() {
        let (log, callback) = recorder();
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .row_id(by_id)
            .on_row_select(callback)
            .loading(true);
        assert!(table.is_loading());
        assert!(table.activate_column(1).is_none());
        assert!(!table.toggle_row(0));
        assert!(!table.toggle_all());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_leaving_loading_reruns_pipeline() {
        let (log, callback) = recorder();
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .row_id(by_id)
            .on_row_select(callback);
        table.set_sort(SortState::by("age", SortDirection::Descending));
        table.toggle_row(0);
        table.set_loading(true);
        table.set_data(users().into_iter().skip(2));
        assert_eq!(log.lock().unwrap().len(), 1);

        table.set_loading(false);
        assert_eq!(names(&table.display_rows()), ["Cy"]);
        assert!(table.selection().is_empty());
        assert_eq!(log.lock().unwrap().last().unwrap(), &Vec::<String>::new());
    }

    #[test]
    fn test_set_columns_drops_sort_effect() {
        let mut table = DataTable::new(columns()).rows(users());
        table.activate_column(1);
        table.activate_column(1);
        table.set_columns(vec![TableColumn::new("name", "Name")]);
        assert_eq!(names(&table.display_rows()), ["Ada", "Bob", "Cy"]);
        assert_eq!(table.sort_state().column(), Some("age"));
    }

    #[test]
    fn test_duplicate_ids_select_together() {
        let mut table = DataTable::new(columns())
            .rows(users())
            .selectable(true)
            .row_id(|_, _| RowId::from("same"));
        table.toggle_row(0);
        assert_eq!(table.selected_rows().len(), 3);
        assert_eq!(table.selected_ids(), vec![RowId::from("same")]);
        assert!(table.is_all_selected());
    }

    #[test]
    fn test_selected_ids_dedupe_in_display_order() {
        let rows: Vec<TableRow> = (0..2000_i32)
            .map(|i| TableRow::new().cell("group", i % 500).cell("age", 2000 - i))
            .collect();
        let mut table = DataTable::new(columns())
            .rows(rows)
            .selectable(true)
            .row_id(|r: &TableRow, _| RowId::from(r.field("group").display()));
        table.activate_column(1);
        assert!(table.toggle_all());

        let ids = table.selected_ids();
        assert_eq!(ids.len(), 500);
        assert_eq!(ids[0], RowId::from("499"));
        assert_eq!(ids[499], RowId::from("0"));
        assert_eq!(table.selected_rows().len(), 2000);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "duplicate column id")]
    fn test_duplicate_column_ids_rejected_in_debug() {
        let _ = DataTable::new(vec![
            TableColumn::<TableRow>::computed("Name").sortable(),
            TableColumn::new("Name", "Full name").sortable(),
        ]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "duplicate column id")]
    fn test_duplicate_column_added_by_builder_rejected_in_debug() {
        let _ = DataTable::new(columns()).column(TableColumn::new("age", "Years"));
    }

    #[test]
    fn test_json_rows() {
        let rows = vec![
            serde_json::json!({"id": "a", "score": 3}),
            serde_json::json!({"id": "b", "score": null}),
            serde_json::json!({"id": "c", "score": 1}),
        ];
        let mut table = DataTable::new(vec![TableColumn::new("score", "Score").sortable()])
            .rows(rows)
            .row_id(|r: &serde_json::Value, _| RowId::from(r.field("id").display()));
        table.activate_column(0);
        table.activate_column(0);
        assert_eq!(
            table.display_ids(),
            &[RowId::from("a"), RowId::from("c"), RowId::from("b")]
        );
    }

    #[test]
    fn test_from_config() {
        let config = TableConfig::from_yaml(
            "columns: [{key: name, header: Name, sortable: true}]\nselectable: true\nclass_name: compact\nempty_state: Nobody here",
        )
        .unwrap();
        let table: DataTable<TableRow> = DataTable::from_config(&config).unwrap();
        assert!(table.is_selectable());
        assert_eq!(table.empty_message(), "Nobody here");
        assert_eq!(table.class_name.as_deref(), Some("compact"));
        assert_eq!(table.columns()[0].id(), "name");

        let bad = TableConfig::default();
        assert!(matches!(
            DataTable::<TableRow>::from_config(&bad),
            Err(ConfigError::NoColumns)
        ));
    }

    #[test]
    fn test_debug_output() {
        let table = DataTable::new(columns()).rows(users());
        let dbg = format!("{table:?}");
        assert!(dbg.contains("DataTable"));
        assert!(dbg.contains("rows: 3"));
    }

    #[test]
    fn test_messages() {
        let msg = TableSortChanged {
            column: "age".into(),
            direction: SortDirection::Descending,
        };
        assert_eq!(msg.clone(), msg);
        let sel = TableSelectionChanged { selected: vec![RowId::Int(1)] };
        assert_eq!(sel.selected.len(), 1);
    }
}
