// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NugetRestoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Spawn error: {0}")]
    SpawnError(String),

    #[error("Standard error: {0}")]
    StandardError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NugetRestoreError {
    /// The bare message carried by the error, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            NugetRestoreError::ConfigError(msg)
            | NugetRestoreError::SpawnError(msg)
            | NugetRestoreError::StandardError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, NugetRestoreError>;
