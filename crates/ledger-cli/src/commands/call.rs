//! `ledger init | invoke | query | functions` — one ledger call per process.
//!
//! The CLI stands in for the host runtime: it opens the redb ledger,
//! lends it to the engine for exactly one call, and prints the payload.

use anyhow::{Context as _, Result};
use ledger_core::config::StorageConfig;
use ledger_core::LedgerConfig;
use ledger_engine::{Clock, FixedClock, Host, Ledger, LedgerResult, Namespace, SystemClock, INIT_FUNCTION};
use ledger_table::RedbRowStorage;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One entry-point call as requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Initialize { args: Vec<String> },
    Invoke { function: String, args: Vec<String> },
    Query { function: String, args: Vec<String> },
}

impl Call {
    pub fn function(&self) -> &str {
        match self {
            Call::Initialize { .. } => INIT_FUNCTION,
            Call::Invoke { function, .. } | Call::Query { function, .. } => function,
        }
    }
}

pub fn run(config: &LedgerConfig, timestamp: Option<&str>, format: OutputFormat, call: Call) -> Result<()> {
    let ledger = ledger_apps::ledger_for(config.ledger.app);
    let storage = open_storage(&config.storage)?;
    let clock: Box<dyn Clock> = match timestamp {
        Some(ts) => Box::new(FixedClock::new(ts)),
        None => Box::new(SystemClock::new()),
    };
    let host = Host::new(&storage, clock.as_ref());

    info!(app = %config.ledger.app, function = call.function(), "running ledger call");
    let payload = execute(&ledger, host, &call)
        .with_context(|| format!("{} {} failed", config.ledger.app, call.function()))?;
    println!("{}", render(call.function(), &payload, format)?);
    Ok(())
}

pub fn functions(config: &LedgerConfig, format: OutputFormat) -> Result<()> {
    let ledger = ledger_apps::ledger_for(config.ledger.app);
    println!("{}", render_functions(&ledger, format)?);
    Ok(())
}

/// Route a call to the matching entry point.
pub fn execute(ledger: &Ledger, host: Host<'_>, call: &Call) -> LedgerResult<Vec<u8>> {
    match call {
        Call::Initialize { args } => ledger.initialize(host, args),
        Call::Invoke { function, args } => ledger.invoke(host, function, args),
        Call::Query { function, args } => ledger.query(host, function, args),
    }
}

/// Each call runs in its own process, so state lives only in the redb file.
fn open_storage(storage: &StorageConfig) -> Result<RedbRowStorage> {
    if let Some(parent) = storage.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }
    let host = RedbRowStorage::open(&storage.path)
        .with_context(|| format!("opening ledger at {}", storage.path.display()))?;
    debug!(path = %storage.path.display(), "ledger storage ready");
    Ok(host)
}

fn render(function: &str, payload: &[u8], format: OutputFormat) -> Result<String> {
    let text = String::from_utf8_lossy(payload);
    match format {
        OutputFormat::Text => Ok(text.into_owned()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "function": function,
            "payload": text,
        }))?),
    }
}

fn render_functions(ledger: &Ledger, format: OutputFormat) -> Result<String> {
    let mut invoke = ledger.dispatch().names(Namespace::Mutating);
    invoke.insert(0, INIT_FUNCTION);
    let query = ledger.dispatch().names(Namespace::ReadOnly);
    let tables: Vec<_> = ledger
        .schemas()
        .iter()
        .map(|schema| (schema.name.as_str(), schema.key_arity))
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "ledger": ledger.name(),
            "tables": tables
                .iter()
                .map(|(name, keys)| serde_json::json!({ "name": name, "keys": keys }))
                .collect::<Vec<_>>(),
            "invoke": invoke,
            "query": query,
        }))?),
        OutputFormat::Text => {
            let mut out = format!("{} ledger\n\ntables:\n", ledger.name());
            for (name, keys) in &tables {
                out.push_str(&format!("  {name} ({keys} key column(s))\n"));
            }
            for (namespace, names) in [("invoke", &invoke), ("query", &query)] {
                out.push_str(&format!("\n{namespace}:\n"));
                for name in names.iter() {
                    out.push_str(&format!("  {name}\n"));
                }
            }
            Ok(out.trim_end().to_string())
        }
    }
}
