// src/pipeline/lifecycle.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Stages of a build pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Initialize,
    BeforeCompile,
    /// Compilation has started. The default restore point.
    Compile,
    AfterCompile,
    Done,
}

impl Lifecycle {
    pub const ALL: [Lifecycle; 5] = [
        Lifecycle::Initialize,
        Lifecycle::BeforeCompile,
        Lifecycle::Compile,
        Lifecycle::AfterCompile,
        Lifecycle::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Initialize => "initialize",
            Lifecycle::BeforeCompile => "before_compile",
            Lifecycle::Compile => "compile",
            Lifecycle::AfterCompile => "after_compile",
            Lifecycle::Done => "done",
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::Compile
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifecycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('-', "_");
        Lifecycle::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalised)
            .ok_or_else(|| {
                format!(
                    "invalid stage: {s} (expected one of initialize, before_compile, compile, after_compile, done)"
                )
            })
    }
}
