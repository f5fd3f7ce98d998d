//! Declarative table configuration (YAML or JSON).

use super::column::{TableColumn, TextAlign};
use super::selection::SelectionMode;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column entry of a [`TableConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub key: Option<String>,
    pub header: String,
    pub sortable: bool,
    pub width: Option<f32>,
    pub align: TextAlign,
    pub class_name: Option<String>,
}

impl ColumnConfig {
    /// Build the column descriptor.
    ///
    /// A keyless column takes its header as identifier and renders empty
    /// cells until a renderer is attached.
    #[must_use]
    pub fn to_column<T>(&self) -> TableColumn<T> {
        let mut column = match &self.key {
            Some(key) => TableColumn::new(key.clone(), self.header.clone()),
            None => TableColumn::computed(self.header.clone()),
        };
        if let Some(width) = self.width {
            column = column.width(width);
        }
        if let Some(class) = &self.class_name {
            column = column.class_name(class.clone());
        }
        if self.sortable {
            column = column.sortable();
        }
        column.align(self.align)
    }

    fn id(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.header)
    }
}

/// Table configuration as loaded from a manifest.
///
/// ```yaml
/// columns:
///   - { key: name, header: Name, sortable: true }
///   - { key: age, header: Age, sortable: true, align: right }
/// selectable: true
/// selection_mode: single
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub columns: Vec<ColumnConfig>,
    pub loading: bool,
    pub selectable: bool,
    pub selection_mode: SelectionMode,
    pub empty_state: String,
    pub class_name: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            loading: false,
            selectable: false,
            selection_mode: SelectionMode::Multiple,
            empty_state: super::DEFAULT_EMPTY_STATE.to_string(),
            class_name: None,
        }
    }
}

impl TableConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check that the column set is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        let mut seen = HashSet::new();
        for (index, column) in self.columns.iter().enumerate() {
            if column.key.is_none() && column.header.is_empty() {
                return Err(ConfigError::UnnamedColumn { index });
            }
            if !seen.insert(column.id()) {
                return Err(ConfigError::DuplicateColumn(column.id().to_string()));
            }
        }
        Ok(())
    }

    /// Column descriptors in declaration order.
    #[must_use]
    pub fn to_columns<T>(&self) -> Vec<TableColumn<T>> {
        self.columns.iter().map(ColumnConfig::to_column::<T>).collect()
    }
}
