// tests/config_file.rs

mod common;
use crate::common::temp_config;

use std::path::PathBuf;

use clap::Parser;
use nuget_restore::cli::CliArgs;
use nuget_restore::config::load_and_validate;
use nuget_restore::errors::NugetRestoreError;
use nuget_restore::pipeline::{Lifecycle, RESTORE_TAP_NAME};
use nuget_restore::{NugetRestorePlugin, RestoreOptions, Sink, build_pipeline};

#[test]
fn restore_table_maps_onto_partial_options() {
    let file = temp_config(
        r#"
[restore]
nuget_path = "/opt/nuget.exe"
solution_path = "src/App.sln"
mono_path = "/usr/bin/mono"
additional_args = ["-NonInteractive"]
stage = "before_compile"

[restore.output_console]
log = "stderr"
error = "off"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let restore = &cfg.restore;

    assert_eq!(restore.solution_path, Some(PathBuf::from("src/App.sln")));
    assert_eq!(restore.mono_path, Some(PathBuf::from("/usr/bin/mono")));
    assert_eq!(restore.args, None);
    assert_eq!(restore.stage, Some(Lifecycle::BeforeCompile));

    let merged = RestoreOptions::merge(RestoreOptions::default(), cfg.restore.clone());
    assert_eq!(merged.args, vec!["restore"]);
    assert_eq!(merged.additional_args, vec!["-NonInteractive"]);
    assert!(matches!(merged.output_console.log, Sink::Stderr));
    assert!(matches!(merged.output_console.error, Sink::Off));
}

#[test]
fn pipeline_table_is_keyed_by_stage() {
    let file = temp_config(
        r#"
[restore]
solution_path = "App.sln"

[pipeline]
compile = "dotnet build App.sln --no-restore"
after-compile = "dotnet test"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(
        cfg.pipeline.get(&Lifecycle::Compile).map(String::as_str),
        Some("dotnet build App.sln --no-restore")
    );
    assert_eq!(
        cfg.pipeline.get(&Lifecycle::AfterCompile).map(String::as_str),
        Some("dotnet test")
    );

    // The restore is registered ahead of the stage's own step.
    let plugin = NugetRestorePlugin::new(cfg.restore.clone()).unwrap();
    let pipeline = build_pipeline(&plugin, &cfg);
    assert_eq!(
        pipeline.registered(Lifecycle::Compile),
        vec![RESTORE_TAP_NAME, "dotnet build App.sln --no-restore"]
    );
}

#[test]
fn unknown_stage_is_a_config_error() {
    let file = temp_config(
        r#"
[pipeline]
link = "ld"
"#,
    );

    match load_and_validate(file.path()) {
        Err(NugetRestoreError::ConfigError(msg)) => assert!(msg.contains("invalid stage: link")),
        Err(e) => panic!("Expected ConfigError, got: {e:?}"),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn blank_pipeline_step_is_a_config_error() {
    let file = temp_config(
        r#"
[pipeline]
compile = "   "
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(NugetRestoreError::ConfigError(_))
    ));
}

#[test]
fn unknown_sink_name_is_rejected() {
    let file = temp_config(
        r#"
[restore.output_console]
log = "syslog"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(NugetRestoreError::TomlError(_))
    ));
}

#[test]
fn unknown_restore_key_is_rejected() {
    let file = temp_config(
        r#"
[restore]
solutionPath = "App.sln"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(NugetRestoreError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/NugetRestore.toml");
    assert!(matches!(result, Err(NugetRestoreError::IoError(_))));
}

#[test]
fn cli_flags_overlay_file_values() {
    let file = temp_config(
        r#"
[restore]
solution_path = "FromFile.sln"
nuget_path = "/opt/nuget.exe"
additional_args = ["-Verbosity", "quiet"]
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    let args = CliArgs::parse_from([
        "nuget-restore",
        "--solution",
        "FromFlag.sln",
        "--stage",
        "after_compile",
        "--",
        "-NoCache",
    ]);
    let merged = RestoreOptions::merge(
        RestoreOptions::default(),
        cfg.restore.clone().overlay(args.partial_options()),
    );

    assert_eq!(merged.solution_path, PathBuf::from("FromFlag.sln"));
    assert_eq!(merged.nuget_path, PathBuf::from("/opt/nuget.exe"));
    assert_eq!(merged.additional_args, vec!["-NoCache"]);
    assert_eq!(format!("{:?}", merged.run_restore), "RunRestore::at(after_compile)");
}

#[test]
fn cli_without_extra_args_keeps_file_args() {
    let args = CliArgs::parse_from(["nuget-restore", "--dry-run"]);
    let partial = args.partial_options();

    assert!(args.dry_run);
    assert_eq!(partial.additional_args, None);
    assert_eq!(partial.solution_path, None);
}
