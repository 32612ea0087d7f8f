// src/exec/runner.rs

//! Pluggable process runner.
//!
//! The plugin talks to a `ProcessRunner` instead of spawning directly, so
//! tests can provide canned output without launching anything.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::{debug, info};

use super::{Invocation, ProcessOutput, SpawnFailure};

/// Trait abstracting how the restore executable is run.
///
/// Implementations must always resolve; launch problems and abnormal exits
/// are reported through [`ProcessOutput::failure`].
pub trait ProcessRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = ProcessOutput> + Send + 'a>>;
}

/// Production runner backed by `tokio::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl ProcessRunner for TokioProcessRunner {
    fn run<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = ProcessOutput> + Send + 'a>> {
        Box::pin(run_to_completion(invocation))
    }
}

async fn run_to_completion(invocation: &Invocation) -> ProcessOutput {
    let program = invocation.program_name();
    info!(cmd = %invocation, "starting restore process");

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match cmd.output().await {
        Ok(output) => output,
        Err(err) => {
            debug!(program = %program, error = %err, "failed to launch restore process");
            return ProcessOutput {
                failure: Some(SpawnFailure::Launch {
                    program,
                    source: Arc::new(err),
                }),
                ..ProcessOutput::default()
            };
        }
    };

    let code = output.status.code();
    info!(
        program = %program,
        exit_code = code.unwrap_or(-1),
        success = output.status.success(),
        "restore process exited"
    );

    let failure = (!output.status.success()).then(|| SpawnFailure::Exited { program, code });

    ProcessOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        failure,
    }
}
