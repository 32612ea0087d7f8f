// src/exec/outcome.rs

//! Mapping of a finished process onto a success or failure record.

use std::sync::Arc;

use crate::config::RestoreOptions;
use crate::output::{FailureCause, RestoreMessage};

use super::ProcessOutput;

/// Label prepended to stderr text when it alone fails the restore.
pub const STDERR_LABEL: &str = "Nuget standard error: ";

/// Decide the outcome of one process run.
///
/// The checks are priority ordered and only the first match is produced:
/// 1. stderr has text and the process did not otherwise fail;
/// 2. the process failed to launch or exited abnormally;
/// 3. success, carrying stdout as-is.
pub fn settle(
    output: ProcessOutput,
    options: &Arc<RestoreOptions>,
) -> std::result::Result<RestoreMessage, RestoreMessage> {
    let stderr = output.stderr.trim();

    match output.failure {
        None if !stderr.is_empty() => Err(RestoreMessage::error(
            options,
            format!("{STDERR_LABEL}{stderr}"),
        )
        .with_cause(FailureCause::StandardError(stderr.to_string()))),
        Some(failure) => {
            let msg = if stderr.is_empty() {
                failure.to_string()
            } else {
                format!("{failure}\n{stderr}")
            };
            Err(RestoreMessage::error(options, msg).with_cause(FailureCause::Spawn(failure)))
        }
        None => Ok(RestoreMessage::log(options, output.stdout)),
    }
}
