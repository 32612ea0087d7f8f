// src/pipeline/shell.rs

//! Shell commands as pipeline steps.

use anyhow::{Context, bail};
use tokio::process::Command;
use tracing::info;

use super::{StageCallback, StageFuture};

/// Wrap `cmd` in a stage callback that runs it through the platform shell.
///
/// Output is inherited so build logs reach the terminal; a non-zero exit
/// fails the stage.
pub fn shell_step(cmd: impl Into<String>) -> StageCallback {
    let cmd = cmd.into();
    Box::new(move || -> StageFuture {
        let cmd = cmd.clone();
        Box::pin(async move {
            info!(cmd = %cmd, "starting pipeline step");

            // Build a shell command appropriate for the platform.
            let mut shell = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(&cmd);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(&cmd);
                c
            };
            shell.kill_on_drop(true);

            let status = shell
                .status()
                .await
                .with_context(|| format!("spawning pipeline step '{cmd}'"))?;

            info!(cmd = %cmd, exit_code = status.code().unwrap_or(-1), "pipeline step exited");
            if !status.success() {
                bail!("pipeline step '{cmd}' exited with {status}");
            }
            anyhow::Ok(())
        })
    })
}
