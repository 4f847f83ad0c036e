//! Per-call host capabilities and the handler-facing context.

use ledger_table::{RowStorage, SchemaRegistry, TableStore};

use crate::clock::Clock;
use crate::error::{LedgerError, LedgerResult};

/// Capabilities the host runtime lends to the ledger for one call.
///
/// The host may hand out a different storage handle per call, so nothing
/// here is cached between calls.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub storage: &'a dyn RowStorage,
    pub clock: &'a dyn Clock,
}

impl<'a> Host<'a> {
    pub fn new(storage: &'a dyn RowStorage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }
}

/// What a handler sees while serving one call.
pub struct Context<'a> {
    function: &'a str,
    tables: TableStore<'a>,
    clock: &'a dyn Clock,
}

impl<'a> Context<'a> {
    pub fn new(host: Host<'a>, schemas: &'a SchemaRegistry, function: &'a str) -> Self {
        Self {
            function,
            tables: TableStore::new(host.storage, schemas),
            clock: host.clock,
        }
    }

    /// Name the call was dispatched under.
    pub fn function(&self) -> &str {
        self.function
    }

    pub fn tables(&self) -> &TableStore<'a> {
        &self.tables
    }

    pub fn now(&self) -> String {
        self.clock.now()
    }

    /// Require exactly `expected` arguments.
    pub fn expect_args(&self, args: &[String], expected: usize) -> LedgerResult<()> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(self.argument_count(expected.to_string(), args.len()))
        }
    }

    /// Require between `min` and `max` arguments, inclusive.
    pub fn expect_args_between(&self, args: &[String], min: usize, max: usize) -> LedgerResult<()> {
        if (min..=max).contains(&args.len()) {
            Ok(())
        } else {
            Err(self.argument_count(format!("{min} to {max}"), args.len()))
        }
    }

    /// Wrap a record-encoding failure for this call's function.
    pub fn payload_error(&self, reason: impl ToString) -> LedgerError {
        LedgerError::Payload {
            function: self.function.to_string(),
            reason: reason.to_string(),
        }
    }

    fn argument_count(&self, expected: String, actual: usize) -> LedgerError {
        LedgerError::ArgumentCount {
            function: self.function.to_string(),
            expected,
            actual,
        }
    }
}
