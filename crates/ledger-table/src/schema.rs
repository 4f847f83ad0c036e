//! Schema registry: table name → number of leading key columns.

use std::collections::HashMap;

use crate::types::ColumnDefinition;

/// Name of the single payload column that follows the key columns.
pub const PAYLOAD_COLUMN: &str = "Details";

/// A registered table: its name and how many leading columns are keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub key_arity: usize,
}

impl TableSchema {
    /// Column list handed to the host: `key_arity` string key columns
    /// (`keyName0`, `keyName1`, ...) followed by one bytes payload column.
    pub fn column_definitions(&self) -> Vec<ColumnDefinition> {
        (0..self.key_arity)
            .map(|i| ColumnDefinition::key(format!("keyName{i}")))
            .chain(std::iter::once(ColumnDefinition::payload(PAYLOAD_COLUMN)))
            .collect()
    }
}

/// Fixed mapping from table name to key arity, built once at startup.
///
/// Iteration follows registration order, which is the order tables are
/// created during initialization.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<TableSchema>,
    index: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with `key_arity` key columns. Registering the same
    /// name again replaces its arity and keeps its position.
    pub fn register(mut self, name: impl Into<String>, key_arity: usize) -> Self {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.tables[pos].key_arity = key_arity,
            None => {
                self.index.insert(name.clone(), self.tables.len());
                self.tables.push(TableSchema { name, key_arity });
            }
        }
        self
    }

    /// Number of key columns for `table`; `0` when the table is unknown.
    pub fn key_arity(&self, table: &str) -> usize {
        self.get(table).map_or(0, |schema| schema.key_arity)
    }

    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.index.get(table).map(|&pos| &self.tables[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;

    #[test]
    fn unknown_table_has_zero_arity() {
        let registry = SchemaRegistry::new().register("Item", 1);
        assert_eq!(registry.key_arity("Item"), 1);
        assert_eq!(registry.key_arity("item"), 0);
        assert_eq!(registry.key_arity("Nope"), 0);
    }

    #[test]
    fn iteration_follows_registration_order() {
        let registry = SchemaRegistry::new()
            .register("Purchase", 1)
            .register("Item", 1)
            .register("Bid", 2);
        let names: Vec<&str> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Purchase", "Item", "Bid"]);
    }

    #[test]
    fn re_registering_replaces_arity() {
        let registry = SchemaRegistry::new()
            .register("Bid", 1)
            .register("Item", 1)
            .register("Bid", 2);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.key_arity("Bid"), 2);
        assert_eq!(registry.iter().next().unwrap().name, "Bid");
    }

    #[test]
    fn column_definitions_put_keys_first() {
        let schema = TableSchema {
            name: "Bid".into(),
            key_arity: 2,
        };
        let columns = schema.column_definitions();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].name, "keyName0");
        assert_eq!(columns[1].name, "keyName1");
        assert!(columns[..2].iter().all(|c| c.key && c.column_type == ColumnType::String));
        assert_eq!(columns[2].name, PAYLOAD_COLUMN);
        assert!(!columns[2].key);
        assert_eq!(columns[2].column_type, ColumnType::Bytes);
    }
}
