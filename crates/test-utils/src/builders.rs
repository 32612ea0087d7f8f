#![allow(dead_code)]

use std::sync::Arc;

use nuget_restore::errors::Result;
use nuget_restore::exec::ProcessOutput;
use nuget_restore::{NugetRestorePlugin, PartialOptions};

use crate::fake_runner::FakeRunner;
use crate::recorder::Recorder;

/// Builder for a plugin wired to a `FakeRunner` and a `Recorder`.
///
/// By default the recorder is installed as both sinks and as every hook, so
/// tests can assert on the full notification sequence.
pub struct PluginBuilder {
    options: PartialOptions,
    runner: FakeRunner,
    recorder: Recorder,
}

impl PluginBuilder {
    pub fn new() -> Self {
        let recorder = Recorder::new();
        let options = PartialOptions::new()
            .nuget_path("/opt/nuget.exe")
            .solution_path("App.sln")
            .log_sink(recorder.sink("log"))
            .error_sink(recorder.sink("error"))
            .hooks(recorder.hooks());

        Self {
            options,
            runner: FakeRunner::new(),
            recorder,
        }
    }

    pub fn options(mut self, f: impl FnOnce(PartialOptions) -> PartialOptions) -> Self {
        self.options = f(self.options);
        self
    }

    pub fn respond(mut self, output: ProcessOutput) -> Self {
        self.runner = self.runner.respond(output);
        self
    }

    pub fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }

    pub fn runner(&self) -> FakeRunner {
        self.runner.clone()
    }

    pub fn try_build(self) -> (Result<NugetRestorePlugin>, FakeRunner, Recorder) {
        let plugin = NugetRestorePlugin::with_runner(self.options, Arc::new(self.runner.clone()));
        (plugin, self.runner, self.recorder)
    }

    pub fn build(self) -> (NugetRestorePlugin, FakeRunner, Recorder) {
        let (plugin, runner, recorder) = self.try_build();
        (
            plugin.expect("Failed to build plugin from builder"),
            runner,
            recorder,
        )
    }
}

impl Default for PluginBuilder {
    fn default() -> Self {
        Self::new()
    }
}
