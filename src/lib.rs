// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod hooks;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod plugin;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, default_config_path, load_and_validate};
use crate::pipeline::{BuildPipeline, Lifecycle, PipelineHost, shell_step};

pub use crate::config::{PartialOptions, RestoreOptions};
pub use crate::errors::{NugetRestoreError, Result as RestoreResult};
pub use crate::hooks::Hooks;
pub use crate::output::{MessageKind, OutputConsole, RestoreMessage, Sink};
pub use crate::pipeline::RunRestore;
pub use crate::plugin::{NugetRestorePlugin, RestoreTrigger};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file values, then CLI flags on top)
/// - plugin construction
/// - a staged build pipeline with the plugin and any `[pipeline]` steps
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let options = cfg.restore.clone().overlay(args.partial_options());

    let plugin = NugetRestorePlugin::new(options).context("constructing restore plugin")?;
    let mut pipeline = build_pipeline(&plugin, &cfg);

    if args.dry_run {
        print_dry_run(&plugin, &pipeline);
        return Ok(());
    }

    info!(solution = %plugin.options().solution_path.display(), "running build pipeline");
    pipeline.run().await
}

/// Load the config file.
///
/// An explicitly given path must exist. The default path is optional; when
/// it is missing an empty config is used and everything comes from flags.
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path)
            .with_context(|| format!("loading config from {}", path.display()));
    }

    let path = default_config_path();
    if !path.exists() {
        debug!(path = %path.display(), "default config file not found; using flags only");
        return Ok(ConfigFile::default());
    }

    load_and_validate(&path).with_context(|| format!("loading config from {}", path.display()))
}

/// Register the plugin first so that, within one stage, the restore runs
/// before the stage's shell step.
pub fn build_pipeline(plugin: &NugetRestorePlugin, cfg: &ConfigFile) -> BuildPipeline {
    let mut pipeline = BuildPipeline::new();
    plugin.apply(&mut pipeline);

    for (stage, cmd) in cfg.pipeline.iter() {
        pipeline.tap(*stage, cmd, shell_step(cmd.clone()));
    }

    pipeline
}

/// Simple dry-run output: print the resolved command and the stage layout.
fn print_dry_run(plugin: &NugetRestorePlugin, pipeline: &BuildPipeline) {
    let options = plugin.options();
    println!("nuget-restore dry-run");
    println!("  solution: {}", options.solution_path.display());
    if let Some(runner) = options.alternate_runner() {
        println!("  runner: {}", runner.display());
    }
    println!("  command: {}", plugin.invocation());
    println!();

    println!("pipeline:");
    for stage in Lifecycle::ALL {
        let names = pipeline.registered(stage);
        if names.is_empty() {
            continue;
        }
        println!("  - {stage}");
        for name in names {
            println!("      {name}");
        }
    }

    debug!("dry-run complete (no execution)");
}
