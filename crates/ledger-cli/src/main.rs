use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ledger_core::config::LoggingConfig;
use ledger_core::{AppKind, LedgerConfig};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::call::{Call, OutputFormat};

#[derive(Parser)]
#[command(
    name = "ledger",
    about = "Keyed ledger tables — catalogue and student record ledgers",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to ledger.toml (defaults apply when the file is missing)
    #[arg(short, long, global = true, default_value = "ledger.toml")]
    config: PathBuf,
    /// Override [ledger].app: catalogue or student
    #[arg(long, global = true)]
    app: Option<AppKind>,
    /// Override [storage].path
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Pin the transaction timestamp instead of reading the system clock
    #[arg(long, global = true)]
    timestamp: Option<String>,
    /// Output format: text or json
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage ledger.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Create every table of the configured ledger (idempotent)
    Init {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a mutating function, e.g. `ledger invoke AddItem 1000 Widget desc 9.99 10`
    Invoke {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run a read-only function, e.g. `ledger query GetItem 1000`
    Query {
        function: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List the functions the configured ledger exposes
    Functions,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a ledger.toml scaffold for the selected application
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = LedgerConfig::load_or_default(&cli.config)?;
    if let Some(app) = cli.app {
        config.ledger.app = app;
    }
    if let Some(data) = cli.data {
        config.storage.path = data;
    }
    init_tracing(&config.logging)?;

    let timestamp = cli.timestamp.as_deref();
    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init { path } => commands::config::init(&path, config.ledger.app),
        },
        Commands::Init { args } => {
            commands::call::run(&config, timestamp, cli.format, Call::Initialize { args })
        }
        Commands::Invoke { function, args } => {
            commands::call::run(&config, timestamp, cli.format, Call::Invoke { function, args })
        }
        Commands::Query { function, args } => {
            commands::call::run(&config, timestamp, cli.format, Call::Query { function, args })
        }
        Commands::Functions => commands::call::functions(&config, cli.format),
    }
}

/// Logs go to stderr so stdout carries only payloads.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.filter))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
