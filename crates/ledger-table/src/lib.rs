//! ledger-table — keyed tables over a host row-storage capability.
//!
//! A table is a named set of rows whose first `key_arity` columns are
//! string keys and whose last column is an opaque payload. The crate is
//! split along the host boundary:
//!
//! - [`RowStorage`] is the capability the host provides (create, insert,
//!   get). Uniqueness of key tuples is the host's job.
//! - [`SchemaRegistry`] knows how many key columns each table has.
//! - [`TableStore`] turns registry + host into table-agnostic
//!   create/insert/lookup calls with typed errors.
//! - [`RedbRowStorage`] is a reference host backed by
//!   [redb](https://docs.rs/redb), persistent or in-memory.
//!
//! Rows are insert-only. There is no update, delete, or scan.

pub mod error;
pub mod host;
pub mod redb_host;
pub mod schema;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{ErrorKind, HostError, HostResult, TableError, TableResult};
pub use host::RowStorage;
pub use redb_host::RedbRowStorage;
pub use schema::{SchemaRegistry, TableSchema};
pub use store::TableStore;
pub use types::*;
