// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::PartialOptions;
use crate::pipeline::Lifecycle;

/// Command-line arguments for `nuget-restore`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nuget-restore",
    version,
    about = "Restore NuGet packages at a chosen point of a build pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `NugetRestore.toml` in the current working directory. The
    /// default file may be absent; an explicitly given one must exist.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Solution or manifest to restore (overrides `[restore].solution_path`).
    #[arg(long, value_name = "PATH")]
    pub solution: Option<PathBuf>,

    /// Path to the nuget executable.
    #[arg(long, value_name = "PATH")]
    pub nuget: Option<PathBuf>,

    /// Run nuget through this runner, e.g. `/usr/bin/mono`.
    #[arg(long, value_name = "PATH")]
    pub mono: Option<PathBuf>,

    /// Pipeline stage at which the restore runs
    /// (initialize, before_compile, compile, after_compile, done).
    #[arg(long, value_name = "STAGE")]
    pub stage: Option<Lifecycle>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NUGET_RESTORE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the configuration and print the command, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments passed to nuget after the base arguments.
    #[arg(last = true, value_name = "ARGS")]
    pub additional_args: Vec<String>,
}

impl CliArgs {
    /// Options given on the command line, to be laid over the config file.
    pub fn partial_options(&self) -> PartialOptions {
        PartialOptions {
            nuget_path: self.nuget.clone(),
            solution_path: self.solution.clone(),
            mono_path: self.mono.clone(),
            additional_args: (!self.additional_args.is_empty())
                .then(|| self.additional_args.clone()),
            stage: self.stage,
            ..PartialOptions::default()
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
