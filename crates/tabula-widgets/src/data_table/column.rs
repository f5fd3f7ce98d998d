//! Column descriptors.

use super::cell::{CellValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Computes the value a column sorts by.
pub type SortAccessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Renders the display text of a cell.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Text alignment within a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Column definition for a data table.
///
/// A column shows one facet of a row: either the field named by `key`, or
/// the output of a custom renderer. Sorting reads the custom accessor when
/// present, else the keyed field. A sortable column with neither sorts as a
/// no-op, since every row yields `CellValue::Null`.
pub struct TableColumn<T> {
    /// Field name in the row, if any
    pub key: Option<String>,
    /// Display header
    pub header: String,
    /// Column width (None = auto)
    pub width: Option<f32>,
    /// Text alignment
    pub align: TextAlign,
    /// Whether column is sortable
    pub sortable: bool,
    /// Presentation class passed through to markup
    pub class_name: Option<String>,
    sort_accessor: Option<SortAccessor<T>>,
    renderer: Option<CellRenderer<T>>,
}

impl<T> TableColumn<T> {
    /// Create a column showing the field `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::computed(header)
        }
    }

    /// Create a column with no backing field.
    ///
    /// Give it a renderer and, if it should sort, a sort accessor.
    #[must_use]
    pub fn computed(header: impl Into<String>) -> Self {
        Self {
            key: None,
            header: header.into(),
            width: None,
            align: TextAlign::Left,
            sortable: false,
            class_name: None,
            sort_accessor: None,
            renderer: None,
        }
    }

    /// Set column width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width.max(20.0));
        self
    }

    /// Set text alignment.
    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Make column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the presentation class.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Sort by a computed value instead of the keyed field.
    #[must_use]
    pub fn sort_by(mut self, accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        self.sort_accessor = Some(Arc::new(accessor));
        self
    }

    /// Render cells with a custom function instead of the keyed field.
    #[must_use]
    pub fn render(mut self, renderer: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Identifier used by the sort state: the key, or the header for keyless
    /// columns.
    ///
    /// Ids must be unique within a table. Two columns sharing an id share
    /// one sort state, so activating either one cycles both.
    #[must_use]
    pub fn id(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.header)
    }

    /// Whether sorting can resolve a value for this column.
    #[must_use]
    pub const fn has_sort_source(&self) -> bool {
        self.sort_accessor.is_some() || self.key.is_some()
    }
}

impl<T: Record> TableColumn<T> {
    /// Value used to order `row` by this column.
    #[must_use]
    pub fn sort_value(&self, row: &T) -> CellValue {
        if let Some(accessor) = &self.sort_accessor {
            accessor(row)
        } else if let Some(key) = &self.key {
            row.field(key)
        } else {
            CellValue::Null
        }
    }

    /// Display text of this column's cell for `row`.
    #[must_use]
    pub fn cell_text(&self, row: &T) -> String {
        if let Some(renderer) = &self.renderer {
            renderer(row)
        } else if let Some(key) = &self.key {
            row.field(key).display()
        } else {
            String::new()
        }
    }
}

impl<T> Clone for TableColumn<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            class_name: self.class_name.clone(),
            sort_accessor: self.sort_accessor.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for TableColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("class_name", &self.class_name)
            .field("sort_accessor", &self.sort_accessor.is_some())
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
