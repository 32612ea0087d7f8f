// src/hooks.rs

//! Named notification hooks.
//!
//! The table is a shared handle: clones point at the same hooks, so a caller
//! that keeps a clone can change behaviour between restores. Dispatch is
//! best-effort; a missing hook is a no-op and a panicking hook is swallowed.

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, RwLock};

use tracing::{trace, warn};

use crate::output::RestoreMessage;

/// Called just before the restore executable is spawned.
pub const ON_START: &str = "on_start";
/// Called whenever a record goes through the log sink.
pub const ON_DATA: &str = "on_data";
/// Called whenever a record goes through the error sink.
pub const ON_ERROR: &str = "on_error";
/// Called when a restore has completed successfully.
pub const ON_DONE: &str = "on_done";

pub type Hook = Arc<dyn Fn(&RestoreMessage) + Send + Sync>;

#[derive(Clone, Default)]
pub struct Hooks {
    table: Arc<RwLock<BTreeMap<String, Hook>>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with<F>(self, name: &str, hook: F) -> Self
    where
        F: Fn(&RestoreMessage) + Send + Sync + 'static,
    {
        self.set(name, hook);
        self
    }

    /// Register or replace a hook. Visible to every clone of this table.
    pub fn set<F>(&self, name: &str, hook: F)
    where
        F: Fn(&RestoreMessage) + Send + Sync + 'static,
    {
        if let Ok(mut table) = self.table.write() {
            table.insert(name.to_string(), Arc::new(hook));
        }
    }

    pub fn remove(&self, name: &str) -> bool {
        self.table
            .write()
            .map(|mut table| table.remove(name).is_some())
            .unwrap_or(false)
    }

    pub fn get(&self, name: &str) -> Option<Hook> {
        self.table.read().ok()?.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.table
            .read()
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// True when both handles share the same underlying table.
    pub fn same_table(&self, other: &Hooks) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    /// Invoke the hook registered under `name`, if any.
    ///
    /// Never fails: unknown names do nothing and panics are caught.
    pub fn run(&self, name: &str, payload: &RestoreMessage) {
        // Clone out so the lock is released before the hook runs.
        let Some(hook) = self.get(name) else {
            trace!(hook = name, "no hook registered");
            return;
        };

        if catch_unwind(AssertUnwindSafe(|| hook(payload))).is_err() {
            warn!(hook = name, "hook panicked; ignoring");
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").field("names", &self.names()).finish()
    }
}
