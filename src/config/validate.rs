// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile, RestoreOptions};
use crate::errors::{NugetRestoreError, Result};
use crate::pipeline::Lifecycle;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = NugetRestoreError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        let pipeline = parse_pipeline_steps(&raw.pipeline)?;
        Ok(ConfigFile::new_unchecked(raw.restore, pipeline))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_pipeline_steps(cfg)?;
    validate_paths(cfg)?;
    Ok(())
}

fn validate_pipeline_steps(cfg: &RawConfigFile) -> Result<()> {
    for (stage, cmd) in cfg.pipeline.iter() {
        if cmd.trim().is_empty() {
            return Err(NugetRestoreError::ConfigError(format!(
                "[pipeline].{stage} must be a non-empty command"
            )));
        }
    }
    Ok(())
}

fn parse_pipeline_steps(
    steps: &BTreeMap<String, String>,
) -> Result<BTreeMap<Lifecycle, String>> {
    steps
        .iter()
        .map(|(stage, cmd)| {
            let stage = stage.parse::<Lifecycle>().map_err(|e| {
                NugetRestoreError::ConfigError(format!("[pipeline]: {e}"))
            })?;
            Ok((stage, cmd.trim().to_string()))
        })
        .collect()
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    if let Some(path) = cfg.restore.nuget_path.as_deref() {
        if is_blank(path) {
            return Err(NugetRestoreError::ConfigError(
                "[restore].nuget_path must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Message used when the solution is missing; shared by the plugin's
/// construction check.
pub const MISSING_SOLUTION: &str = "options.solution_path must be specified.";

/// Check the merged options' required fields, returning the failure message.
pub fn check_required(options: &RestoreOptions) -> Option<&'static str> {
    if is_blank(&options.solution_path) {
        return Some(MISSING_SOLUTION);
    }
    None
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
