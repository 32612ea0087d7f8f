// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::hooks::Hooks;
use crate::output::{OutputConsole, PartialOutputConsole, Sink};
use crate::pipeline::{Lifecycle, RunRestore};

/// Top-level configuration file as read from TOML.
///
/// ```toml
/// [restore]
/// solution_path = "src/MyApp.sln"
///
/// [pipeline]
/// compile = "dotnet build src/MyApp.sln --no-restore"
/// ```
///
/// Both sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Plugin options from `[restore]`.
    #[serde(default)]
    pub restore: PartialOptions,

    /// Shell steps from `[pipeline]`, keyed by stage name.
    #[serde(default)]
    pub pipeline: BTreeMap<String, String>,
}

/// A validated configuration file. Construct through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub restore: PartialOptions,
    pub pipeline: BTreeMap<Lifecycle, String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        restore: PartialOptions,
        pipeline: BTreeMap<Lifecycle, String>,
    ) -> Self {
        Self { restore, pipeline }
    }
}

/// File name of the bundled restore executable.
pub const NUGET_EXE: &str = "nuget.exe";

/// Fully merged plugin configuration.
///
/// Built once per plugin by [`RestoreOptions::merge`]. Everything is owned
/// except `hooks`, which stays a shared handle so callers that kept a clone
/// can still change it.
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    /// The restore executable.
    pub nuget_path: PathBuf,
    /// The solution or manifest handed to the executable as its last argument.
    pub solution_path: PathBuf,
    /// Optional runner used to invoke `nuget_path` (e.g. `mono`).
    pub mono_path: Option<PathBuf>,
    /// Base arguments, `["restore"]` by default.
    pub args: Vec<String>,
    /// Appended after `args`.
    pub additional_args: Vec<String>,
    pub output_console: OutputConsole,
    /// Decides when, in the host pipeline, the restore runs.
    pub run_restore: RunRestore,
    pub hooks: Hooks,
}

impl Default for RestoreOptions {
    /// Defaults are rebuilt on every call; nothing is shared between
    /// two default instances.
    fn default() -> Self {
        Self {
            nuget_path: default_nuget_path(),
            solution_path: PathBuf::new(),
            mono_path: None,
            args: default_args(),
            additional_args: Vec::new(),
            output_console: OutputConsole::default(),
            run_restore: RunRestore::default(),
            hooks: Hooks::new(),
        }
    }
}

impl RestoreOptions {
    /// Deep-merge `partial` over `defaults`; caller values win at every key.
    pub fn merge(defaults: RestoreOptions, partial: PartialOptions) -> RestoreOptions {
        let run_restore = match (partial.run_restore, partial.stage) {
            (Some(policy), _) => policy,
            (None, Some(stage)) => RunRestore::at(stage),
            (None, None) => defaults.run_restore,
        };

        let merged = RestoreOptions {
            nuget_path: partial.nuget_path.unwrap_or(defaults.nuget_path),
            solution_path: partial.solution_path.unwrap_or(defaults.solution_path),
            mono_path: partial.mono_path.or(defaults.mono_path),
            args: partial.args.unwrap_or(defaults.args),
            additional_args: partial.additional_args.unwrap_or(defaults.additional_args),
            output_console: partial.output_console.merge_over(defaults.output_console),
            run_restore,
            hooks: partial.hooks.unwrap_or(defaults.hooks),
        };

        debug!(
            nuget = %merged.nuget_path.display(),
            solution = %merged.solution_path.display(),
            mono = ?merged.mono_path,
            "merged restore options"
        );

        merged
    }

    /// The alternate runner, if one is set to a non-empty path.
    pub fn alternate_runner(&self) -> Option<&Path> {
        self.mono_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Caller-supplied configuration. Every field is optional.
///
/// Path and argument fields can come from the `[restore]` table of a TOML
/// file:
///
/// ```toml
/// [restore]
/// solution_path = "MyApp.sln"
/// mono_path = "/usr/bin/mono"
/// additional_args = ["-NonInteractive"]
/// stage = "before_compile"
///
/// [restore.output_console]
/// log = "stderr"
/// ```
///
/// Closures (custom sinks, hooks, a custom run policy) are set in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialOptions {
    #[serde(default)]
    pub nuget_path: Option<PathBuf>,
    #[serde(default)]
    pub solution_path: Option<PathBuf>,
    #[serde(default)]
    pub mono_path: Option<PathBuf>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub additional_args: Option<Vec<String>>,
    #[serde(default)]
    pub output_console: PartialOutputConsole,

    /// Shorthand for `RunRestore::at(stage)`; ignored when `run_restore`
    /// is set.
    #[serde(default)]
    pub stage: Option<Lifecycle>,

    #[serde(skip)]
    pub run_restore: Option<RunRestore>,
    #[serde(skip)]
    pub hooks: Option<Hooks>,
}

impl PartialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nuget_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.nuget_path = Some(path.into());
        self
    }

    pub fn solution_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solution_path = Some(path.into());
        self
    }

    pub fn mono_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mono_path = Some(path.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn additional_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    pub fn log_sink(mut self, sink: Sink) -> Self {
        self.output_console.log = Some(sink);
        self
    }

    pub fn error_sink(mut self, sink: Sink) -> Self {
        self.output_console.error = Some(sink);
        self
    }

    pub fn stage(mut self, stage: Lifecycle) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn run_restore(mut self, policy: RunRestore) -> Self {
        self.run_restore = Some(policy);
        self
    }

    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Layer `other` on top of `self`: any key set in `other` wins.
    ///
    /// Used to put command-line flags over file values.
    pub fn overlay(self, other: PartialOptions) -> PartialOptions {
        PartialOptions {
            nuget_path: other.nuget_path.or(self.nuget_path),
            solution_path: other.solution_path.or(self.solution_path),
            mono_path: other.mono_path.or(self.mono_path),
            args: other.args.or(self.args),
            additional_args: other.additional_args.or(self.additional_args),
            output_console: self.output_console.overlay(other.output_console),
            stage: other.stage.or(self.stage),
            run_restore: other.run_restore.or(self.run_restore),
            hooks: other.hooks.or(self.hooks),
        }
    }
}

fn default_args() -> Vec<String> {
    vec!["restore".to_string()]
}

/// `nuget.exe` beside the running binary, or a bare `nuget.exe` when the
/// binary's location is unknown.
pub fn default_nuget_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(NUGET_EXE)))
        .unwrap_or_else(|| PathBuf::from(NUGET_EXE))
}
