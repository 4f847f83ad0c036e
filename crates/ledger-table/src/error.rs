//! Error types for ledger tables.

use std::fmt;

use thiserror::Error;

/// Result type alias for host row-storage calls.
pub type HostResult<T> = Result<T, HostError>;

/// Result type alias for table store operations.
pub type TableResult<T> = Result<T, TableError>;

/// Failures reported by a [`RowStorage`](crate::RowStorage) host.
///
/// A duplicate key is *not* a host error: `insert_row` reports it as
/// `Ok(false)`. Likewise a missing row is an empty row, not an error.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("read error: {0}")]
    Read(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("deserialization error: {0}")]
    Deserialize(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table {table} already exists with a different schema")]
    SchemaMismatch { table: String },

    #[error("malformed row for table {table}: {reason}")]
    MalformedRow { table: String, reason: String },
}

/// Coarse classification shared by every layer of the ledger.
///
/// Wrapping errors (query annotation, initialization context) keep the
/// kind of the error they wrap, so callers can always tell a missing
/// record from a storage fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown table or a table without key columns. Misconfiguration.
    Schema,
    /// Wrong argument count or shape.
    Validation,
    /// A row with the same key tuple already exists.
    DuplicateKey,
    /// No row for the key, or no handler for the function name.
    NotFound,
    /// The host storage failed.
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Schema => "schema",
            ErrorKind::Validation => "validation",
            ErrorKind::DuplicateKey => "duplicate_key",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by [`TableStore`](crate::TableStore).
#[derive(Debug, Error)]
pub enum TableError {
    #[error("schema error: table {table} has no registered key columns")]
    Schema { table: String },

    #[error("validation error: table {table} expects {expected} key(s), got {actual}")]
    KeyCount {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate key: table {table} already has a row with key {key}")]
    DuplicateKey { table: String, key: String },

    #[error("not found: table {table} has no row with key {key}")]
    NotFound { table: String, key: String },

    #[error("storage error on table {table}")]
    Storage {
        table: String,
        #[source]
        source: HostError,
    },
}

impl TableError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::Schema { .. } => ErrorKind::Schema,
            TableError::KeyCount { .. } => ErrorKind::Validation,
            TableError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            TableError::NotFound { .. } => ErrorKind::NotFound,
            TableError::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub(crate) fn storage(table: &str, source: HostError) -> Self {
        TableError::Storage {
            table: table.to_string(),
            source,
        }
    }
}
