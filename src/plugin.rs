// src/plugin.rs

//! The restore plugin.
//!
//! [`NugetRestorePlugin`] merges caller options over the defaults, registers
//! itself into a pipeline through its [`RunRestore`](crate::pipeline::RunRestore)
//! policy and, when triggered, runs the restore executable once, reporting
//! progress through the output sinks and hooks.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{PartialOptions, RestoreOptions, check_required};
use crate::errors::{NugetRestoreError, Result};
use crate::exec::{Invocation, ProcessRunner, TokioProcessRunner, settle};
use crate::hooks::{ON_DATA, ON_DONE, ON_ERROR, ON_START};
use crate::output::{FailureCause, RestoreMessage};
use crate::pipeline::{PipelineHost, StageCallback, StageFuture};

/// Announced through `on_start` and the log sink before anything runs.
pub const START_MESSAGE: &str = "Restoring Nuget packages.";

/// Reported when the base argument list is empty.
pub const EMPTY_ARGS_MESSAGE: &str = "options.args is a required argument and must contain at least one argument. Default should be [\"restore\"]";

/// Cheap to clone; clones share options and runner.
#[derive(Clone)]
pub struct NugetRestorePlugin {
    options: Arc<RestoreOptions>,
    runner: Arc<dyn ProcessRunner>,
}

impl NugetRestorePlugin {
    /// Build a plugin that spawns real processes.
    ///
    /// Fails when `solution_path` is missing or empty. The failure goes
    /// through the error sink and `on_error` before it is returned.
    pub fn new(options: PartialOptions) -> Result<Self> {
        Self::with_runner(options, Arc::new(TokioProcessRunner))
    }

    /// Same as [`NugetRestorePlugin::new`] with a caller-chosen runner.
    pub fn with_runner(options: PartialOptions, runner: Arc<dyn ProcessRunner>) -> Result<Self> {
        let options = Arc::new(RestoreOptions::merge(RestoreOptions::default(), options));
        let plugin = Self { options, runner };

        if let Some(msg) = check_required(&plugin.options) {
            return Err(plugin.error(RestoreMessage::error(&plugin.options, msg)));
        }

        Ok(plugin)
    }

    pub fn options(&self) -> &Arc<RestoreOptions> {
        &self.options
    }

    /// Best-effort hook dispatch; never fails and never panics.
    pub fn run_hook(&self, name: &str, payload: &RestoreMessage) {
        self.options.hooks.run(name, payload);
    }

    /// Send a record to the log sink, then fire `on_data`.
    ///
    /// Does nothing at all when the log sink is switched off.
    pub fn log(&self, record: &RestoreMessage) {
        if !self.options.output_console.log.emit(record) {
            return;
        }
        self.run_hook(ON_DATA, record);
    }

    /// The fatal path: send a record to the error sink, fire `on_error`, and
    /// hand back the error the caller must propagate.
    ///
    /// A switched-off error sink skips the notification but still yields the
    /// error.
    #[must_use = "the returned error aborts the current operation"]
    pub fn error(&self, record: RestoreMessage) -> NugetRestoreError {
        debug!(msg = %record.msg, "restore failure");
        if self.options.output_console.error.emit(&record) {
            self.run_hook(ON_ERROR, &record);
        }

        match record.cause {
            Some(FailureCause::Spawn(_)) => NugetRestoreError::SpawnError(record.msg),
            Some(FailureCause::StandardError(_)) => NugetRestoreError::StandardError(record.msg),
            None => NugetRestoreError::ConfigError(record.msg),
        }
    }

    /// Register with a pipeline host through the configured policy.
    pub fn apply(&self, host: &mut dyn PipelineHost) {
        debug!(policy = ?self.options.run_restore, "applying restore plugin");
        self.options.run_restore.register(host, self.trigger());
    }

    /// A handle that runs [`NugetRestorePlugin::restore`] when fired.
    pub fn trigger(&self) -> RestoreTrigger {
        RestoreTrigger {
            plugin: self.clone(),
        }
    }

    /// The command line a restore would run.
    pub fn invocation(&self) -> Invocation {
        Invocation::from_options(&self.options)
    }

    /// Run the restore once.
    ///
    /// Non-blank stdout is logged (trimmed) and `on_done` fires with the
    /// success record. Any failure goes through [`NugetRestorePlugin::error`].
    pub async fn restore(&self) -> Result<RestoreMessage> {
        match self.nuget().await {
            Ok(output) => {
                let text = output.msg.trim();
                if !text.is_empty() {
                    self.log(&RestoreMessage::log(&self.options, text));
                }
                self.run_hook(ON_DONE, &output);
                Ok(output)
            }
            Err(failure) => Err(self.error(failure)),
        }
    }

    /// Spawn the restore executable and settle its result.
    ///
    /// Resolves to the success record or fails with the failure record; see
    /// [`settle`] for the priority of the checks.
    pub async fn nuget(&self) -> std::result::Result<RestoreMessage, RestoreMessage> {
        let start = RestoreMessage::log(&self.options, START_MESSAGE);
        self.run_hook(ON_START, &start);
        self.log(&start);

        if self.options.args.is_empty() {
            return Err(RestoreMessage::error(&self.options, EMPTY_ARGS_MESSAGE));
        }

        self.log(&RestoreMessage::log(
            &self.options,
            format!(
                "Restoring with solution: {}",
                self.options.solution_path.display()
            ),
        ));

        let invocation = self.invocation();
        info!(cmd = %invocation, "running nuget restore");
        let output = self.runner.run(&invocation).await;

        settle(output, &self.options)
    }
}

impl std::fmt::Debug for NugetRestorePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NugetRestorePlugin")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Zero-argument trigger handed to a [`RunRestore`](crate::pipeline::RunRestore)
/// policy.
#[derive(Clone, Debug)]
pub struct RestoreTrigger {
    plugin: NugetRestorePlugin,
}

impl RestoreTrigger {
    /// Run the restore now.
    pub async fn fire(&self) -> Result<RestoreMessage> {
        self.plugin.restore().await
    }

    /// Adapt into a pipeline stage callback. A failed restore fails the stage.
    pub fn into_callback(self) -> StageCallback {
        Box::new(move || -> StageFuture {
            let plugin = self.plugin.clone();
            Box::pin(async move {
                plugin.restore().await?;
                anyhow::Ok(())
            })
        })
    }
}
