// src/pipeline/host.rs

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{Lifecycle, StageCallback};

/// Registration surface of a build pipeline.
///
/// Anything that can run callbacks at lifecycle points can host the plugin.
pub trait PipelineHost {
    /// Register `callback` to run whenever `stage` is reached.
    fn tap(&mut self, stage: Lifecycle, name: &str, callback: StageCallback);
}

/// A simple staged pipeline.
///
/// Stages run in [`Lifecycle`] order, callbacks within a stage in
/// registration order. The first failing callback aborts the run.
#[derive(Default)]
pub struct BuildPipeline {
    taps: BTreeMap<Lifecycle, Vec<(String, StageCallback)>>,
}

impl BuildPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names registered on `stage`, in order.
    pub fn registered(&self, stage: Lifecycle) -> Vec<String> {
        self.taps
            .get(&stage)
            .map(|taps| taps.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.values().all(Vec::is_empty)
    }

    /// Run every stage once.
    pub async fn run(&mut self) -> Result<()> {
        for stage in Lifecycle::ALL {
            let Some(taps) = self.taps.get_mut(&stage) else {
                debug!(%stage, "no callbacks registered; skipping stage");
                continue;
            };

            info!(%stage, callbacks = taps.len(), "entering stage");
            for (name, callback) in taps.iter_mut() {
                debug!(%stage, tap = %name, "running callback");
                callback()
                    .await
                    .with_context(|| format!("'{name}' failed during stage '{stage}'"))?;
            }
        }

        info!("pipeline finished");
        Ok(())
    }
}

impl PipelineHost for BuildPipeline {
    fn tap(&mut self, stage: Lifecycle, name: &str, callback: StageCallback) {
        debug!(%stage, tap = name, "registering callback");
        self.taps
            .entry(stage)
            .or_default()
            .push((name.to_string(), callback));
    }
}
