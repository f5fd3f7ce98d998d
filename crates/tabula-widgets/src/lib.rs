//! Widget implementations for the Tabula toolkit.
//!
//! - [`DataTable`]: sortable, selectable table over caller rows
//! - [`InputField`]: labelled text input with helper/error text

pub mod error;

#[cfg(feature = "data-widgets")]
pub mod data_table;
#[cfg(feature = "input-widgets")]
pub mod input_field;

pub use error::{ConfigError, DateParseError};

#[cfg(feature = "data-widgets")]
pub use data_table::{
    compare_values, sort_order, CellValue, ColumnConfig, DataTable, HeaderView, Record, RowId,
    RowSelection, RowView, SelectionMode, SortDirection, SortState, TableBody, TableColumn,
    TableConfig, TableRow, TableSelectionChanged, TableSortChanged, TextAlign,
};
#[cfg(feature = "input-widgets")]
pub use input_field::{
    InputChanged, InputField, InputKind, InputSize, InputSubmitted, InputVariant,
    PasswordVisibilityToggled, SizeMetrics,
};
