//! RedbRowStorage — a redb-backed [`RowStorage`] host.
//!
//! Stands in for the host runtime's ledger when the engine runs outside
//! one (the CLI, tests). Each call runs in its own redb transaction, so a
//! call either commits completely or leaves nothing behind. redb allows a
//! single writer at a time, which makes the key-exists check and the
//! insert in [`RowStorage::insert_row`] atomic across threads.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::error::{HostError, HostResult};
use crate::host::RowStorage;
use crate::tables::{rows, SCHEMAS, SCHEMAS_TABLE};
use crate::types::{Column, ColumnDefinition, Row};

/// Convert any `Display` error into a `HostError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| HostError::$variant(e.to_string())
    };
}

/// Thread-safe row host backed by redb.
#[derive(Clone)]
pub struct RedbRowStorage {
    db: Arc<Database>,
}

impl RedbRowStorage {
    /// Open (or create) a persistent ledger database at the given path.
    pub fn open(path: &Path) -> HostResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let host = Self { db: Arc::new(db) };
        host.ensure_tables()?;
        debug!(?path, "ledger database opened");
        Ok(host)
    }

    /// Create an ephemeral in-memory ledger database.
    pub fn open_in_memory() -> HostResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let host = Self { db: Arc::new(db) };
        host.ensure_tables()?;
        debug!("in-memory ledger database opened");
        Ok(host)
    }

    fn ensure_tables(&self) -> HostResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(SCHEMAS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Stored column definitions for `table`, if it has been created.
    pub fn table_definition(&self, table: &str) -> HostResult<Option<Vec<ColumnDefinition>>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let schemas = txn.open_table(SCHEMAS).map_err(map_err!(Table))?;
        match schemas.get(table).map_err(map_err!(Read))? {
            Some(guard) => Ok(Some(decode_definition(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Names of all created ledger tables.
    pub fn list_tables(&self) -> HostResult<Vec<String>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let schemas = txn.open_table(SCHEMAS).map_err(map_err!(Table))?;
        let mut names = Vec::new();
        for entry in schemas.iter().map_err(map_err!(Read))? {
            let (key, _) = entry.map_err(map_err!(Read))?;
            names.push(key.value().to_string());
        }
        Ok(names)
    }
}

impl RowStorage for RedbRowStorage {
    fn create_table(&self, table: &str, columns: &[ColumnDefinition]) -> HostResult<()> {
        validate_definition(table, columns)?;
        let encoded = serde_json::to_vec(columns).map_err(map_err!(Serialize))?;

        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut schemas = txn.open_table(SCHEMAS).map_err(map_err!(Table))?;
            let existing = schemas
                .get(table)
                .map_err(map_err!(Read))?
                .map(|guard| guard.value().to_vec());

            if let Some(stored) = existing {
                // Dropping the transaction without commit leaves the ledger unchanged.
                if decode_definition(&stored)? != columns {
                    return Err(HostError::SchemaMismatch {
                        table: table.to_string(),
                    });
                }
                debug!(table, "table already exists");
                return Ok(());
            }

            schemas
                .insert(table, encoded.as_slice())
                .map_err(map_err!(Write))?;
            txn.open_table(rows(table)).map_err(map_err!(Table))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(table, columns = columns.len(), "table created");
        Ok(())
    }

    fn insert_row(&self, table: &str, row: Row) -> HostResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let definition = {
            let schemas = txn.open_table(SCHEMAS).map_err(map_err!(Table))?;
            let stored = schemas.get(table).map_err(map_err!(Read))?;
            match stored {
                Some(guard) => decode_definition(guard.value())?,
                None => return Err(HostError::TableNotFound(table.to_string())),
            }
        };
        check_row(table, &definition, &row)?;

        let key_count = definition.iter().filter(|c| c.key).count();
        let mut columns = row.columns;
        let values = columns.split_off(key_count);
        let key = encode_key(&columns)?;
        let value = serde_json::to_vec(&values).map_err(map_err!(Serialize))?;

        {
            let mut rows_table = txn.open_table(rows(table)).map_err(map_err!(Table))?;
            if rows_table.get(key.as_str()).map_err(map_err!(Read))?.is_some() {
                debug!(table, %key, "row exists, insert skipped");
                return Ok(false);
            }
            rows_table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(table, %key, "row stored");
        Ok(true)
    }

    fn get_row(&self, table: &str, keys: &[Column]) -> HostResult<Row> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let definition = {
            let schemas = txn.open_table(SCHEMAS).map_err(map_err!(Table))?;
            let stored = schemas.get(table).map_err(map_err!(Read))?;
            match stored {
                Some(guard) => decode_definition(guard.value())?,
                None => return Err(HostError::TableNotFound(table.to_string())),
            }
        };

        let key_count = definition.iter().filter(|c| c.key).count();
        if keys.len() != key_count {
            return Err(HostError::MalformedRow {
                table: table.to_string(),
                reason: format!("lookup with {} key columns, table has {key_count}", keys.len()),
            });
        }

        let rows_table = match txn.open_table(rows(table)) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => {
                return Err(HostError::TableNotFound(table.to_string()));
            }
            Err(e) => return Err(HostError::Table(e.to_string())),
        };

        let key = encode_key(keys)?;
        match rows_table.get(key.as_str()).map_err(map_err!(Read))? {
            Some(guard) => {
                let values: Vec<Column> =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                let mut columns = keys.to_vec();
                columns.extend(values);
                Ok(Row::new(columns))
            }
            None => Ok(Row::default()),
        }
    }
}

/// A definition needs at least one key column, and keys must lead.
fn validate_definition(table: &str, columns: &[ColumnDefinition]) -> HostResult<()> {
    if table == SCHEMAS_TABLE {
        return Err(HostError::Table(format!("{table} is a reserved table name")));
    }
    let key_count = columns.iter().take_while(|c| c.key).count();
    if key_count == 0 {
        return Err(HostError::Table(format!("{table} needs at least one key column")));
    }
    if columns[key_count..].iter().any(|c| c.key) {
        return Err(HostError::Table(format!("{table} key columns must come first")));
    }
    Ok(())
}

fn check_row(table: &str, definition: &[ColumnDefinition], row: &Row) -> HostResult<()> {
    if row.len() != definition.len() {
        return Err(HostError::MalformedRow {
            table: table.to_string(),
            reason: format!("expected {} columns, got {}", definition.len(), row.len()),
        });
    }
    for (def, col) in definition.iter().zip(&row.columns) {
        if def.column_type != col.column_type() {
            return Err(HostError::MalformedRow {
                table: table.to_string(),
                reason: format!("column {} expects {:?}", def.name, def.column_type),
            });
        }
    }
    Ok(())
}

fn encode_key(keys: &[Column]) -> HostResult<String> {
    serde_json::to_string(keys).map_err(map_err!(Serialize))
}

fn decode_definition(bytes: &[u8]) -> HostResult<Vec<ColumnDefinition>> {
    serde_json::from_slice(bytes).map_err(map_err!(Deserialize))
}
