//! Row and column model shared by the table store and its hosts.

use serde::{Deserialize, Serialize};

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Bytes,
}

/// One column of a table definition handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    /// Part of the row's unique identity.
    pub key: bool,
}

impl ColumnDefinition {
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::String,
            key: true,
        }
    }

    pub fn payload(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Bytes,
            key: false,
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Column {
    String(String),
    Bytes(Vec<u8>),
}

impl Column {
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::String(_) => ColumnType::String,
            Column::Bytes(_) => ColumnType::Bytes,
        }
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        Column::String(value.to_string())
    }
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Column::String(value)
    }
}

impl From<Vec<u8>> for Column {
    fn from(value: Vec<u8>) -> Self {
        Column::Bytes(value)
    }
}

/// A persisted record: key columns followed by value columns.
///
/// A row with no columns is how a host answers a lookup that matched
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Row {
    pub columns: Vec<Column>,
}

impl Row {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}
