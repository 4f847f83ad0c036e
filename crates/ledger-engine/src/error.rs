//! Ledger error types.

use ledger_table::{ErrorKind, TableError};
use thiserror::Error;

use crate::dispatch::Namespace;

/// Result type alias for ledger entry points and handlers.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors returned to the host runtime.
///
/// Wrapping variants keep their source, and [`LedgerError::kind`] always
/// reports the kind of the innermost error.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("validation error: {function} expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("not found: unknown {namespace} function {name}")]
    UnknownFunction { namespace: Namespace, name: String },

    #[error("validation error: {function} could not encode its record: {reason}")]
    Payload { function: String, reason: String },

    #[error("initialization failed at table {table}")]
    Initialize {
        table: String,
        #[source]
        source: TableError,
    },

    #[error("{function} failed for key {key}")]
    Query {
        function: String,
        key: String,
        #[source]
        source: Box<LedgerError>,
    },
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Table(e) => e.kind(),
            LedgerError::ArgumentCount { .. } | LedgerError::Payload { .. } => ErrorKind::Validation,
            LedgerError::UnknownFunction { .. } => ErrorKind::NotFound,
            LedgerError::Initialize { source, .. } => source.kind(),
            LedgerError::Query { source, .. } => source.kind(),
        }
    }
}
