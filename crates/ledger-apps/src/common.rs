//! Pieces shared by the façade handlers.

use ledger_engine::{Context, LedgerResult};
use serde::Serialize;

/// Read-only handler returning the payload stored under `args[0]` in `table`.
pub(crate) fn lookup(
    table: &'static str,
) -> impl Fn(&Context<'_>, &[String]) -> LedgerResult<Vec<u8>> + Send + Sync + 'static {
    move |ctx: &Context<'_>, args: &[String]| {
        ctx.expect_args(args, 1)?;
        Ok(ctx.tables().get_row(table, args)?)
    }
}

/// JSON-encode a record as a row payload.
pub(crate) fn encode<T: Serialize>(ctx: &Context<'_>, record: &T) -> LedgerResult<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| ctx.payload_error(e))
}
