// src/pipeline/mod.rs

//! Build-pipeline host abstraction.
//!
//! The plugin never talks to a host directly; it hands a [`RestoreTrigger`]
//! to its [`RunRestore`] policy, which decides where in the host lifecycle
//! to register it.
//!
//! - [`lifecycle`] defines the ordered stages.
//! - [`host`] defines the `PipelineHost` registration surface and
//!   `BuildPipeline`, the staged host used by the binary.
//! - [`policy`] holds `RunRestore`, the injectable registration strategy.
//! - [`shell`] turns `[pipeline]` commands into stage callbacks.

pub mod host;
pub mod lifecycle;
pub mod policy;
pub mod shell;

use std::future::Future;
use std::pin::Pin;

pub use host::{BuildPipeline, PipelineHost};
pub use lifecycle::Lifecycle;
pub use policy::{RESTORE_TAP_NAME, RunRestore};
pub use shell::shell_step;

pub use crate::plugin::RestoreTrigger;

/// Future returned by a stage callback.
pub type StageFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Callback registered on a lifecycle stage; invoked each time the stage runs.
pub type StageCallback = Box<dyn FnMut() -> StageFuture + Send>;
