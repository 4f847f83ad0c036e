//! TableStore — table-agnostic create/insert/lookup over a host.
//!
//! Every operation looks the table up in the [`SchemaRegistry`] first, so
//! the store itself never hardcodes a table. Calls run in a fixed order:
//! schema check, row assembly, one host call. Nothing is retried.

use tracing::debug;

use crate::error::{HostError, TableError, TableResult};
use crate::host::RowStorage;
use crate::schema::SchemaRegistry;
use crate::types::{Column, Row};

/// Borrowed view over a host's row storage and the table schemas.
///
/// Cheap to copy; build one per call from whatever storage handle the
/// host hands over.
#[derive(Clone, Copy)]
pub struct TableStore<'a> {
    storage: &'a dyn RowStorage,
    schemas: &'a SchemaRegistry,
}

impl<'a> TableStore<'a> {
    pub fn new(storage: &'a dyn RowStorage, schemas: &'a SchemaRegistry) -> Self {
        Self { storage, schemas }
    }

    /// Create `table` in the host with its registered key arity.
    ///
    /// Idempotent: an existing table with the same layout is left alone.
    pub fn create_table(&self, table: &str) -> TableResult<()> {
        let schema = self
            .schemas
            .get(table)
            .filter(|schema| schema.key_arity >= 1)
            .ok_or_else(|| TableError::Schema {
                table: table.to_string(),
            })?;

        self.storage
            .create_table(table, &schema.column_definitions())
            .map_err(|e| TableError::storage(table, e))?;
        debug!(table, key_arity = schema.key_arity, "table ready");
        Ok(())
    }

    /// Insert a new row. Fails with [`TableError::DuplicateKey`] if the key
    /// tuple is already taken; the existing row is left untouched.
    pub fn insert_row<K: AsRef<str>>(&self, table: &str, keys: &[K], payload: &[u8]) -> TableResult<()> {
        self.check_keys(table, keys)?;

        let mut columns: Vec<Column> = keys.iter().map(|k| Column::from(k.as_ref())).collect();
        columns.push(Column::Bytes(payload.to_vec()));

        let inserted = self
            .storage
            .insert_row(table, Row::new(columns))
            .map_err(|e| TableError::storage(table, e))?;
        if !inserted {
            debug!(table, key = keys[0].as_ref(), "insert rejected: key exists");
            return Err(TableError::DuplicateKey {
                table: table.to_string(),
                key: keys[0].as_ref().to_string(),
            });
        }

        debug!(table, key = keys[0].as_ref(), bytes = payload.len(), "row inserted");
        Ok(())
    }

    /// Fetch the payload of the row matching the full key tuple.
    pub fn get_row<K: AsRef<str>>(&self, table: &str, keys: &[K]) -> TableResult<Vec<u8>> {
        let key_arity = self.check_keys(table, keys)?;

        let lookup: Vec<Column> = keys.iter().map(|k| Column::from(k.as_ref())).collect();
        let mut row = self
            .storage
            .get_row(table, &lookup)
            .map_err(|e| TableError::storage(table, e))?;
        debug!(table, columns = row.len(), "row lookup");

        if row.is_empty() {
            return Err(TableError::NotFound {
                table: table.to_string(),
                key: display_keys(keys),
            });
        }
        if row.len() != key_arity + 1 {
            return Err(malformed(
                table,
                format!("expected {} columns, host returned {}", key_arity + 1, row.len()),
            ));
        }

        match row.columns.pop() {
            Some(Column::Bytes(payload)) => Ok(payload),
            _ => Err(malformed(table, "payload column is not bytes".to_string())),
        }
    }

    /// Resolve the key arity and make sure `keys` supplies exactly that many.
    fn check_keys<K: AsRef<str>>(&self, table: &str, keys: &[K]) -> TableResult<usize> {
        let key_arity = self.schemas.key_arity(table);
        if key_arity < 1 {
            return Err(TableError::Schema {
                table: table.to_string(),
            });
        }
        if keys.len() != key_arity {
            return Err(TableError::KeyCount {
                table: table.to_string(),
                expected: key_arity,
                actual: keys.len(),
            });
        }
        Ok(key_arity)
    }
}

fn malformed(table: &str, reason: String) -> TableError {
    TableError::storage(
        table,
        HostError::MalformedRow {
            table: table.to_string(),
            reason,
        },
    )
}

/// `a` for a single key, `(a, b)` for a composite one.
fn display_keys<K: AsRef<str>>(keys: &[K]) -> String {
    match keys {
        [single] => single.as_ref().to_string(),
        _ => {
            let joined: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
            format!("({})", joined.join(", "))
        }
    }
}
