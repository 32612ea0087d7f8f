// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`invocation`] turns the options into a program + argument list.
//! - [`runner`] provides the `ProcessRunner` trait and the tokio-backed
//!   `TokioProcessRunner` used in production; tests swap in a fake.
//! - [`outcome`] maps the raw process result onto success/failure records.

pub mod invocation;
pub mod outcome;
pub mod runner;

use std::sync::Arc;

use thiserror::Error;

pub use invocation::Invocation;
pub use outcome::settle;
pub use runner::{ProcessRunner, TokioProcessRunner};

/// Why a child process counts as failed, independent of its output streams.
#[derive(Debug, Clone, Error)]
pub enum SpawnFailure {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("command failed: '{program}' exited with {}", describe_exit(.code))]
    Exited { program: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Everything one child process produced.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub failure: Option<SpawnFailure>,
}

impl ProcessOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_failure(mut self, failure: SpawnFailure) -> Self {
        self.failure = Some(failure);
        self
    }
}
