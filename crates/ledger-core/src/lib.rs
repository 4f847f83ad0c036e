pub mod app;
pub mod config;

pub use app::{AppKind, UnknownApp};
pub use config::LedgerConfig;
