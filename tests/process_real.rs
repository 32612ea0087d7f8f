// tests/process_real.rs
//
// Runs real child processes. The "nuget" here is a shell script executed
// through `sh`, configured as the alternate runner.

#![cfg(unix)]

mod common;
use crate::common::{Recorder, init_tracing, with_timeout};

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use nuget_restore::exec::{Invocation, ProcessRunner, TokioProcessRunner};
use nuget_restore::hooks::ON_DONE;
use nuget_restore::{NugetRestoreError, NugetRestorePlugin, PartialOptions};

fn script(body: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".sh").tempfile().unwrap();
    writeln!(file, "{body}").unwrap();
    file
}

fn plugin_for(script: &NamedTempFile, recorder: &Recorder) -> NugetRestorePlugin {
    NugetRestorePlugin::with_runner(
        PartialOptions::new()
            .mono_path("sh")
            .nuget_path(script.path())
            .solution_path("App.sln")
            .log_sink(recorder.sink("log"))
            .error_sink(recorder.sink("error"))
            .hooks(recorder.hooks()),
        Arc::new(TokioProcessRunner),
    )
    .unwrap()
}

#[tokio::test]
async fn script_output_is_logged() {
    init_tracing();
    let script = script(r#"echo "restored 3 packages for $2 via $1""#);
    let recorder = Recorder::new();
    let plugin = plugin_for(&script, &recorder);

    let done = with_timeout(plugin.restore()).await.unwrap();

    assert_eq!(done.msg.trim(), "restored 3 packages for App.sln via restore");
    assert_eq!(
        recorder.messages("sink:log").last().map(String::as_str),
        Some("restored 3 packages for App.sln via restore")
    );
    assert_eq!(recorder.count(ON_DONE), 1);
}

#[tokio::test]
async fn script_stderr_fails_the_restore() {
    let script = script("echo 'Unable to find version 1.2.3 of package Foo' >&2");
    let recorder = Recorder::new();
    let plugin = plugin_for(&script, &recorder);

    let err = with_timeout(plugin.restore()).await.unwrap_err();

    assert!(matches!(err, NugetRestoreError::StandardError(_)));
    assert!(err.to_string().contains("Unable to find version 1.2.3 of package Foo"));
    assert_eq!(recorder.count("sink:error"), 1);
}

#[tokio::test]
async fn non_zero_exit_is_a_spawn_error() {
    let script = script("exit 3");
    let recorder = Recorder::new();
    let plugin = plugin_for(&script, &recorder);

    let err = with_timeout(plugin.restore()).await.unwrap_err();

    match err {
        NugetRestoreError::SpawnError(msg) => assert!(msg.contains("status 3"), "{msg}"),
        e => panic!("Expected SpawnError, got: {e:?}"),
    }
}

#[tokio::test]
async fn missing_executable_reports_launch_failure() {
    let invocation = Invocation {
        program: "/definitely/not/a/nuget.exe".into(),
        args: vec!["restore".into(), "App.sln".into()],
    };

    let output = with_timeout(TokioProcessRunner.run(&invocation)).await;

    let failure = output.failure.expect("launch must fail");
    assert!(failure.to_string().contains("failed to launch"));
    assert!(output.stdout.is_empty());
}
