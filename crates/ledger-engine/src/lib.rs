//! ledger-engine — the three entry points a host runtime calls.
//!
//! A [`Ledger`] bundles a [`SchemaRegistry`](ledger_table::SchemaRegistry)
//! with a [`DispatchRegistry`] and answers `initialize`, `invoke`, and
//! `query`. The host lends its capabilities for one call at a time through
//! [`Host`]; handlers reach them through a [`Context`].
//!
//! ```text
//! host runtime ──(function, args)──▶ Ledger::invoke / Ledger::query
//!   → DispatchRegistry::resolve(namespace, function)
//!     → handler(&Context, args)
//!       → TableStore (create / insert / get)
//!         → RowStorage (host)
//! ```

pub mod clock;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod router;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{Context, Host};
pub use dispatch::{DispatchRegistry, Handler, Namespace};
pub use error::{LedgerError, LedgerResult};
pub use ledger_table::ErrorKind;
pub use router::{Ledger, INIT_FUNCTION};
