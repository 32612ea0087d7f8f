// src/config/mod.rs

//! Configuration for the restore plugin.
//!
//! Responsibilities:
//! - Define the options model and its partial, caller-facing form (`model.rs`).
//! - Load a TOML config file from disk (`loader.rs`).
//! - Validate file contents and required options (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, PartialOptions, RawConfigFile, RestoreOptions, default_nuget_path};
pub use validate::{MISSING_SOLUTION, check_required, validate_config};
