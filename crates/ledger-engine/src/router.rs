//! Ledger — the `initialize` / `invoke` / `query` entry points.
//!
//! Each call is a complete unit of work: the router checks arguments,
//! resolves the function name, and hands the call to a handler. The only
//! persistent state is what the host's row storage holds.

use ledger_table::{SchemaRegistry, TableStore};
use tracing::{debug, info, warn};

use crate::context::{Context, Host};
use crate::dispatch::{DispatchRegistry, Handler, Namespace};
use crate::error::{LedgerError, LedgerResult};

/// Reserved `invoke` name that re-runs initialization.
pub const INIT_FUNCTION: &str = "init";

/// A business façade: its tables and its handlers.
#[derive(Debug)]
pub struct Ledger {
    name: String,
    schemas: SchemaRegistry,
    dispatch: DispatchRegistry,
}

impl Ledger {
    pub fn new(name: impl Into<String>, schemas: SchemaRegistry, dispatch: DispatchRegistry) -> Self {
        Self {
            name: name.into(),
            schemas,
            dispatch,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn dispatch(&self) -> &DispatchRegistry {
        &self.dispatch
    }

    /// Create every registered table, in registration order.
    ///
    /// Safe to repeat against an initialized ledger. Stops at the first
    /// table that cannot be created and names it in the error.
    pub fn initialize(&self, host: Host<'_>, args: &[String]) -> LedgerResult<Vec<u8>> {
        info!(ledger = %self.name, tables = self.schemas.len(), ?args, "initializing ledger");

        let tables = TableStore::new(host.storage, &self.schemas);
        for schema in self.schemas.iter() {
            tables.create_table(&schema.name).map_err(|source| {
                warn!(ledger = %self.name, table = %schema.name, error = %source, "table creation failed");
                LedgerError::Initialize {
                    table: schema.name.clone(),
                    source,
                }
            })?;
        }

        info!(ledger = %self.name, "initialization complete");
        Ok(format!("{}: initialization complete ({} tables)", self.name, self.schemas.len()).into_bytes())
    }

    /// Run a mutating function. `"init"` is an alias for [`Ledger::initialize`].
    pub fn invoke(&self, host: Host<'_>, function: &str, args: &[String]) -> LedgerResult<Vec<u8>> {
        if function == INIT_FUNCTION {
            return self.initialize(host, args);
        }

        let handler = self.resolve(Namespace::Mutating, function)?;
        let ctx = Context::new(host, &self.schemas, function);
        match handler(&ctx, args) {
            Ok(payload) => {
                debug!(ledger = %self.name, function, bytes = payload.len(), "invoke succeeded");
                Ok(payload)
            }
            Err(e) => {
                warn!(ledger = %self.name, function, kind = %e.kind(), error = %e, "invoke failed");
                Err(e)
            }
        }
    }

    /// Run a read-only function. At least one argument is required; the
    /// first one is treated as the lookup key when reporting errors.
    pub fn query(&self, host: Host<'_>, function: &str, args: &[String]) -> LedgerResult<Vec<u8>> {
        let Some(key) = args.first() else {
            warn!(ledger = %self.name, function, "query without arguments");
            return Err(LedgerError::ArgumentCount {
                function: function.to_string(),
                expected: "at least 1".to_string(),
                actual: 0,
            });
        };

        let handler = self.resolve(Namespace::ReadOnly, function)?;
        let ctx = Context::new(host, &self.schemas, function);
        match handler(&ctx, args) {
            Ok(payload) => {
                debug!(ledger = %self.name, function, %key, bytes = payload.len(), "query succeeded");
                Ok(payload)
            }
            Err(e) => {
                warn!(ledger = %self.name, function, %key, kind = %e.kind(), error = %e, "query failed");
                Err(LedgerError::Query {
                    function: function.to_string(),
                    key: key.clone(),
                    source: Box::new(e),
                })
            }
        }
    }

    fn resolve(&self, namespace: Namespace, function: &str) -> LedgerResult<&Handler> {
        self.dispatch.resolve(namespace, function).ok_or_else(|| {
            warn!(ledger = %self.name, %namespace, function, "unknown function");
            LedgerError::UnknownFunction {
                namespace,
                name: function.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use ledger_table::{ErrorKind, RedbRowStorage};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn put(ctx: &Context<'_>, args: &[String]) -> LedgerResult<Vec<u8>> {
        ctx.expect_args(args, 2)?;
        ctx.tables().insert_row("Note", &args[..1], args[1].as_bytes())?;
        Ok(args[1].clone().into_bytes())
    }

    fn get(ctx: &Context<'_>, args: &[String]) -> LedgerResult<Vec<u8>> {
        ctx.expect_args(args, 1)?;
        Ok(ctx.tables().get_row("Note", args)?)
    }

    fn stamp(ctx: &Context<'_>, _args: &[String]) -> LedgerResult<Vec<u8>> {
        Ok(ctx.now().into_bytes())
    }

    fn notes() -> Ledger {
        Ledger::new(
            "notes",
            SchemaRegistry::new().register("Note", 1).register("Tag", 2),
            DispatchRegistry::new()
                .mutating("Put", put)
                .mutating("Stamp", stamp)
                .read_only("Get", get),
        )
    }

    struct Fixture {
        storage: RedbRowStorage,
        clock: FixedClock,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                storage: RedbRowStorage::open_in_memory().unwrap(),
                clock: FixedClock::new("2016-06-01T10:00:00Z"),
            }
        }

        fn host(&self) -> Host<'_> {
            Host::new(&self.storage, &self.clock)
        }
    }

    // ── initialize ─────────────────────────────────────────────────

    #[test]
    fn initialize_creates_every_table_and_is_idempotent() {
        let fx = Fixture::new();
        let ledger = notes();

        ledger.initialize(fx.host(), &[]).unwrap();
        ledger.initialize(fx.host(), &args(&["again"])).unwrap();

        assert_eq!(fx.storage.list_tables().unwrap(), ["Note", "Tag"]);
    }

    #[test]
    fn initialize_fails_fast_naming_the_table() {
        let fx = Fixture::new();
        let ledger = Ledger::new(
            "broken",
            SchemaRegistry::new()
                .register("First", 1)
                .register("Keyless", 0)
                .register("Never", 1),
            DispatchRegistry::new(),
        );

        let err = ledger.initialize(fx.host(), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        match &err {
            LedgerError::Initialize { table, .. } => assert_eq!(table, "Keyless"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fx.storage.list_tables().unwrap(), ["First"]);
    }

    #[test]
    fn invoke_init_is_initialize() {
        let fx = Fixture::new();
        let ledger = notes();

        let out = ledger.invoke(fx.host(), INIT_FUNCTION, &[]).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("initialization complete"));
        assert_eq!(fx.storage.list_tables().unwrap().len(), 2);
    }

    // ── invoke ─────────────────────────────────────────────────────

    #[test]
    fn invoke_returns_handler_result_verbatim() {
        let fx = Fixture::new();
        let ledger = notes();
        ledger.initialize(fx.host(), &[]).unwrap();

        let out = ledger.invoke(fx.host(), "Put", &args(&["n1", "hello"])).unwrap();
        assert_eq!(out, b"hello");
        let out = ledger.invoke(fx.host(), "Stamp", &[]).unwrap();
        assert_eq!(out, b"2016-06-01T10:00:00Z");
    }

    #[test]
    fn invoke_unknown_function_is_not_found() {
        let fx = Fixture::new();
        let err = notes().invoke(fx.host(), "unknownName", &args(&["x"])).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownFunction { namespace: Namespace::Mutating, .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn invoke_cannot_reach_query_handlers() {
        let fx = Fixture::new();
        let err = notes().invoke(fx.host(), "Get", &args(&["n1"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn invoke_surfaces_handler_validation() {
        let fx = Fixture::new();
        let err = notes().invoke(fx.host(), "Put", &args(&["only-key"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("expects 2"));
    }

    #[test]
    fn invoke_duplicate_key_is_reported() {
        let fx = Fixture::new();
        let ledger = notes();
        ledger.initialize(fx.host(), &[]).unwrap();

        ledger.invoke(fx.host(), "Put", &args(&["n1", "first"])).unwrap();
        let err = ledger.invoke(fx.host(), "Put", &args(&["n1", "second"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(ledger.query(fx.host(), "Get", &args(&["n1"])).unwrap(), b"first");
    }

    // ── query ──────────────────────────────────────────────────────

    #[test]
    fn query_without_arguments_is_validation_for_any_name() {
        let fx = Fixture::new();
        let ledger = notes();
        for name in ["Get", "unknownName", ""] {
            let err = ledger.query(fx.host(), name, &[]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "function {name:?}");
        }
    }

    #[test]
    fn query_unknown_function_is_not_found() {
        let fx = Fixture::new();
        let err = notes().query(fx.host(), "unknownName", &args(&["x"])).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownFunction { namespace: Namespace::ReadOnly, .. }));
    }

    #[test]
    fn query_missing_row_is_annotated_not_found() {
        let fx = Fixture::new();
        let ledger = notes();
        ledger.initialize(fx.host(), &[]).unwrap();

        let err = ledger.query(fx.host(), "Get", &args(&["ghost"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        match &err {
            LedgerError::Query { key, function, .. } => {
                assert_eq!(key, "ghost");
                assert_eq!(function, "Get");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn query_before_initialize_is_storage_error() {
        let fx = Fixture::new();
        let err = notes().query(fx.host(), "Get", &args(&["n1"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().contains("n1"));
    }
}
