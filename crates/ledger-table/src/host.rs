//! The row-storage capability a host runtime lends to the ledger.

use crate::error::HostResult;
use crate::types::{Column, ColumnDefinition, Row};

/// Durable row storage provided by the host for the duration of a call.
///
/// Implementations must make the duplicate-key check and the write of
/// `insert_row` one atomic step: concurrent inserts of the same key tuple
/// yield exactly one `Ok(true)`.
pub trait RowStorage: Send + Sync {
    /// Create `table` with the given columns if it does not exist.
    ///
    /// Succeeds without changes when the table already exists with an
    /// identical definition.
    fn create_table(&self, table: &str, columns: &[ColumnDefinition]) -> HostResult<()>;

    /// Insert `row`. Returns `Ok(false)` and writes nothing when a row with
    /// the same key columns already exists.
    fn insert_row(&self, table: &str, row: Row) -> HostResult<bool>;

    /// Fetch the row whose key columns equal `keys`, or an empty row.
    fn get_row(&self, table: &str, keys: &[Column]) -> HostResult<Row>;
}
