//! redb table definitions for the reference row host.
//!
//! Every ledger table becomes one redb table with `&str` keys (the
//! JSON-encoded key columns) and `&[u8]` values (the JSON-encoded value
//! columns). Column definitions live in [`SCHEMAS`], keyed by table name.

use redb::TableDefinition;

/// Name of the internal table holding column definitions.
pub const SCHEMAS_TABLE: &str = "__schemas";

/// Column definitions keyed by `{table_name}`.
pub const SCHEMAS: TableDefinition<&str, &[u8]> = TableDefinition::new(SCHEMAS_TABLE);

/// Row table for a ledger table named `name`.
pub fn rows(name: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(name)
}
