// src/output.rs

//! Output sinks and the message record passed to sinks and hooks.
//!
//! Every notification point (start, data, error, done) builds a fresh
//! [`RestoreMessage`]. Console sinks print only the message text; custom
//! sinks receive the whole record.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::RestoreOptions;
use crate::exec::SpawnFailure;

/// Whether a record is informational or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Log,
    Error,
}

/// Underlying reason attached to a failure record.
#[derive(Debug, Clone)]
pub enum FailureCause {
    /// The executable could not be launched or exited abnormally.
    Spawn(SpawnFailure),
    /// The process wrote to stderr without otherwise failing.
    StandardError(String),
}

/// A single notification emitted by the plugin.
#[derive(Debug, Clone)]
pub struct RestoreMessage {
    pub kind: MessageKind,
    /// Snapshot of the configuration active when the record was created.
    pub options: Arc<RestoreOptions>,
    pub msg: String,
    /// Only set on failures coming out of the process layer.
    pub cause: Option<FailureCause>,
}

impl RestoreMessage {
    pub fn log(options: &Arc<RestoreOptions>, msg: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Log,
            options: Arc::clone(options),
            msg: msg.into(),
            cause: None,
        }
    }

    pub fn error(options: &Arc<RestoreOptions>, msg: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            options: Arc::clone(options),
            msg: msg.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: FailureCause) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// Callback type for caller-supplied sinks.
pub type SinkFn = Arc<dyn Fn(&RestoreMessage) + Send + Sync>;

/// Destination for one kind of output.
#[derive(Clone)]
pub enum Sink {
    /// Plain message text on stdout.
    Stdout,
    /// Plain message text on stderr.
    Stderr,
    /// Caller-supplied function receiving the full record.
    Custom(SinkFn),
    /// Not callable: writes nothing and fires no hook.
    Off,
}

impl Sink {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&RestoreMessage) + Send + Sync + 'static,
    {
        Sink::Custom(Arc::new(f))
    }

    pub fn is_callable(&self) -> bool {
        !matches!(self, Sink::Off)
    }

    /// Deliver a record. Returns `false` when the sink is [`Sink::Off`].
    pub fn emit(&self, record: &RestoreMessage) -> bool {
        match self {
            Sink::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = writeln!(out, "{}", record.msg);
                true
            }
            Sink::Stderr => {
                let mut err = std::io::stderr().lock();
                let _ = writeln!(err, "{}", record.msg);
                true
            }
            Sink::Custom(f) => {
                f(record);
                true
            }
            Sink::Off => false,
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Stdout => f.write_str("Stdout"),
            Sink::Stderr => f.write_str("Stderr"),
            Sink::Custom(_) => f.write_str("Custom(..)"),
            Sink::Off => f.write_str("Off"),
        }
    }
}

/// Console sink names accepted in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleSink {
    Stdout,
    Stderr,
    Off,
}

impl From<ConsoleSink> for Sink {
    fn from(value: ConsoleSink) -> Self {
        match value {
            ConsoleSink::Stdout => Sink::Stdout,
            ConsoleSink::Stderr => Sink::Stderr,
            ConsoleSink::Off => Sink::Off,
        }
    }
}

impl<'de> Deserialize<'de> for Sink {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ConsoleSink::deserialize(deserializer).map(Sink::from)
    }
}

/// The pair of sinks used by the plugin.
#[derive(Debug, Clone)]
pub struct OutputConsole {
    pub log: Sink,
    pub error: Sink,
}

impl Default for OutputConsole {
    fn default() -> Self {
        Self {
            log: Sink::Stdout,
            error: Sink::Stderr,
        }
    }
}

/// Caller overrides for [`OutputConsole`]; unset keys keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialOutputConsole {
    #[serde(default)]
    pub log: Option<Sink>,
    #[serde(default)]
    pub error: Option<Sink>,
}

impl PartialOutputConsole {
    pub fn merge_over(&self, defaults: OutputConsole) -> OutputConsole {
        OutputConsole {
            log: self.log.clone().unwrap_or(defaults.log),
            error: self.error.clone().unwrap_or(defaults.error),
        }
    }

    /// Layer `other` on top of `self`, key by key.
    pub fn overlay(self, other: PartialOutputConsole) -> PartialOutputConsole {
        PartialOutputConsole {
            log: other.log.or(self.log),
            error: other.error.or(self.error),
        }
    }
}
