// src/pipeline/policy.rs

use std::fmt;
use std::sync::Arc;

use super::{Lifecycle, PipelineHost, RestoreTrigger};

/// Name the restore is registered under by the built-in policies.
pub const RESTORE_TAP_NAME: &str = "NugetRestore";

type RegisterFn = dyn Fn(&mut dyn PipelineHost, RestoreTrigger) + Send + Sync;

/// Strategy deciding when, in the host lifecycle, the restore runs.
///
/// The policy receives the host and a trigger; it may register the trigger
/// on any stage, wrap it, or not register it at all.
#[derive(Clone)]
pub struct RunRestore {
    register: Arc<RegisterFn>,
    label: String,
}

impl RunRestore {
    /// Register the restore on `stage` under [`RESTORE_TAP_NAME`].
    pub fn at(stage: Lifecycle) -> Self {
        Self::labelled(format!("at({stage})"), move |host, run| {
            host.tap(stage, RESTORE_TAP_NAME, run.into_callback());
        })
    }

    /// Caller-defined registration.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut dyn PipelineHost, RestoreTrigger) + Send + Sync + 'static,
    {
        Self::labelled("custom".to_string(), f)
    }

    fn labelled<F>(label: String, f: F) -> Self
    where
        F: Fn(&mut dyn PipelineHost, RestoreTrigger) + Send + Sync + 'static,
    {
        Self {
            register: Arc::new(f),
            label,
        }
    }

    pub fn register(&self, host: &mut dyn PipelineHost, trigger: RestoreTrigger) {
        (self.register)(host, trigger)
    }
}

impl Default for RunRestore {
    fn default() -> Self {
        RunRestore::at(Lifecycle::Compile)
    }
}

impl fmt::Debug for RunRestore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunRestore::{}", self.label)
    }
}
