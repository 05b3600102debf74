//! Host context shared with collaborators
//!
//! A `HostContext` stands in for the object a trigger is attached to. It is
//! handed to every precondition and action so they can read and write
//! host variables without the trigger knowing what they do.

mod config;
mod error;

pub use config::{AppConfigExt, default_definitions_dir};
pub use error::ConfigError;
pub use trigger_types::AppConfig;

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use hashbrown::HashMap;

/// Cheap-to-clone handle to the hosting object.
#[derive(Debug, Clone)]
pub struct HostContext {
    inner: Arc<HostState>,
}

#[derive(Debug, Default)]
struct HostState {
    name: String,
    variables: RwLock<HashMap<String, f64>>,
    /// Ids of executed actions, in execution order
    journal: Mutex<Vec<String>>,
}

impl HostContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(HostState {
                name: name.into(),
                ..Default::default()
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    // ─── Variables ──────────────────────────────────────────────────────────

    pub fn variable(&self, name: &str) -> Option<f64> {
        let vars = self
            .inner
            .variables
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        vars.get(name).copied()
    }

    pub fn set_variable(&self, name: &str, value: f64) {
        let mut vars = self
            .inner
            .variables
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        vars.insert(name.to_string(), value);
    }

    /// Add `amount` to a variable, treating a missing one as 0. Returns the new value.
    pub fn change_variable(&self, name: &str, amount: f64) -> f64 {
        let mut vars = self
            .inner
            .variables
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let slot = vars.entry(name.to_string()).or_insert(0.0);
        *slot += amount;
        *slot
    }

    /// Snapshot of all variables, sorted by name
    pub fn variables(&self) -> Vec<(String, f64)> {
        let vars = self
            .inner
            .variables
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut out: Vec<_> = vars.iter().map(|(k, v)| (k.clone(), *v)).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    // ─── Journal ────────────────────────────────────────────────────────────

    /// Record that an action ran
    pub fn record(&self, entry: &str) {
        self.inner
            .journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.to_string());
    }

    pub fn journal(&self) -> Vec<String> {
        self.inner
            .journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take the journal, leaving it empty
    pub fn drain_journal(&self) -> Vec<String> {
        std::mem::take(
            &mut *self
                .inner
                .journal
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new("host")
    }
}
