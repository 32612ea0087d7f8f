// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// - Reads TOML.
/// - Leaves every unset `[restore]` key as `None`, so it can be overlaid
///   with command-line values before being merged over the defaults.
/// - Checks that `[pipeline]` steps are not blank.
///
/// `solution_path` is deliberately not checked here: a missing solution is
/// reported by the plugin itself when it is constructed.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `NugetRestore.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("NugetRestore.toml")
}
