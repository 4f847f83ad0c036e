//! Clock capability used by handlers that stamp records.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of human-readable timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

/// Wall clock in RFC 3339 UTC with microseconds.
///
/// Never goes backwards within one process: if the system time steps back,
/// the last issued instant is repeated instead.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_micros: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> String {
        let now = Utc::now().timestamp_micros();
        let previous = self.last_micros.fetch_max(now, Ordering::SeqCst);
        let micros = now.max(previous);
        DateTime::<Utc>::from_timestamp_micros(micros)
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// A clock pinned to one instant, e.g. the transaction time the host
/// runtime assigned to the current call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}
