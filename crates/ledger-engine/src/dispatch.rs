//! Dispatch registry: function name → handler, per namespace.
//!
//! Two independent namespaces exist. `Mutating` handlers serve `invoke`,
//! `ReadOnly` handlers serve `query`. Lookup is an exact string match: no
//! case folding and no prefix matching. The registry never looks at
//! arguments.

use std::collections::HashMap;
use std::fmt;

use crate::context::Context;
use crate::error::LedgerResult;

/// A business operation: arguments in, opaque payload out.
pub type Handler = Box<dyn Fn(&Context<'_>, &[String]) -> LedgerResult<Vec<u8>> + Send + Sync>;

/// Which entry point a handler is reachable from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Mutating,
    ReadOnly,
}

impl Namespace {
    /// Entry point name as the host runtime knows it.
    pub fn entry_point(&self) -> &'static str {
        match self {
            Namespace::Mutating => "invoke",
            Namespace::ReadOnly => "query",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry_point())
    }
}

/// Fixed name → handler tables, built once at startup.
#[derive(Default)]
pub struct DispatchRegistry {
    mutating: HashMap<String, Handler>,
    read_only: HashMap<String, Handler>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name` in `namespace`, replacing any
    /// earlier registration of the same name there.
    pub fn register<F>(mut self, namespace: Namespace, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context<'_>, &[String]) -> LedgerResult<Vec<u8>> + Send + Sync + 'static,
    {
        self.table_mut(namespace).insert(name.into(), Box::new(handler));
        self
    }

    pub fn mutating<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context<'_>, &[String]) -> LedgerResult<Vec<u8>> + Send + Sync + 'static,
    {
        self.register(Namespace::Mutating, name, handler)
    }

    pub fn read_only<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Context<'_>, &[String]) -> LedgerResult<Vec<u8>> + Send + Sync + 'static,
    {
        self.register(Namespace::ReadOnly, name, handler)
    }

    pub fn resolve(&self, namespace: Namespace, name: &str) -> Option<&Handler> {
        self.table(namespace).get(name)
    }

    /// Registered names in `namespace`, sorted.
    pub fn names(&self, namespace: Namespace) -> Vec<&str> {
        let mut names: Vec<&str> = self.table(namespace).keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn table(&self, namespace: Namespace) -> &HashMap<String, Handler> {
        match namespace {
            Namespace::Mutating => &self.mutating,
            Namespace::ReadOnly => &self.read_only,
        }
    }

    fn table_mut(&mut self, namespace: Namespace) -> &mut HashMap<String, Handler> {
        match namespace {
            Namespace::Mutating => &mut self.mutating,
            Namespace::ReadOnly => &mut self.read_only,
        }
    }
}

impl fmt::Debug for DispatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchRegistry")
            .field("mutating", &self.names(Namespace::Mutating))
            .field("read_only", &self.names(Namespace::ReadOnly))
            .finish()
    }
}
