// tests/config_merge.rs

mod common;
use crate::common::{PluginBuilder, init_tracing};

use std::path::PathBuf;

use nuget_restore::config::{MISSING_SOLUTION, default_nuget_path};
use nuget_restore::hooks::{ON_DONE, ON_ERROR};
use nuget_restore::{
    Hooks, MessageKind, NugetRestoreError, NugetRestorePlugin, PartialOptions, RestoreOptions,
    Sink,
};

#[test]
fn defaults_fill_every_unset_key() {
    let merged = RestoreOptions::merge(
        RestoreOptions::default(),
        PartialOptions::new().solution_path("App.sln"),
    );

    assert_eq!(merged.solution_path, PathBuf::from("App.sln"));
    assert_eq!(merged.nuget_path, default_nuget_path());
    assert!(merged.nuget_path.ends_with("nuget.exe"));
    assert_eq!(merged.mono_path, None);
    assert_eq!(merged.args, vec!["restore".to_string()]);
    assert!(merged.additional_args.is_empty());
    assert!(matches!(merged.output_console.log, Sink::Stdout));
    assert!(matches!(merged.output_console.error, Sink::Stderr));
    assert!(merged.hooks.names().is_empty());
}

#[test]
fn caller_values_win_per_nested_key() {
    let merged = RestoreOptions::merge(
        RestoreOptions::default(),
        PartialOptions::new()
            .solution_path("App.sln")
            .nuget_path("/opt/nuget.exe")
            .args(["install"])
            .log_sink(Sink::Off),
    );

    assert_eq!(merged.nuget_path, PathBuf::from("/opt/nuget.exe"));
    assert_eq!(merged.args, vec!["install".to_string()]);
    // Only `log` was overridden; `error` keeps its default.
    assert!(matches!(merged.output_console.log, Sink::Off));
    assert!(matches!(merged.output_console.error, Sink::Stderr));
}

#[test]
fn separately_constructed_plugins_do_not_share_hook_tables() {
    init_tracing();

    let first = NugetRestorePlugin::new(
        PartialOptions::new()
            .solution_path("First.sln")
            .hooks(Hooks::new().with(ON_DONE, |_| {})),
    )
    .unwrap();
    let second = NugetRestorePlugin::new(
        PartialOptions::new()
            .solution_path("Second.sln")
            .hooks(Hooks::new().with(ON_ERROR, |_| {})),
    )
    .unwrap();

    assert!(!first.options().hooks.same_table(&second.options().hooks));
    assert_eq!(first.options().hooks.names(), vec![ON_DONE.to_string()]);
    assert_eq!(second.options().hooks.names(), vec![ON_ERROR.to_string()]);

    first.options().hooks.set("on_data", |_| {});
    assert!(second.options().hooks.get("on_data").is_none());
}

#[test]
fn default_hook_tables_are_fresh_per_construction() {
    let a = NugetRestorePlugin::new(PartialOptions::new().solution_path("A.sln")).unwrap();
    let b = NugetRestorePlugin::new(PartialOptions::new().solution_path("B.sln")).unwrap();

    assert!(!a.options().hooks.same_table(&b.options().hooks));
    a.options().hooks.set(ON_DONE, |_| {});
    assert!(b.options().hooks.get(ON_DONE).is_none());
}

#[test]
fn caller_hook_table_is_kept_by_reference() {
    let hooks = Hooks::new();
    let plugin = NugetRestorePlugin::new(
        PartialOptions::new()
            .solution_path("App.sln")
            .hooks(hooks.clone()),
    )
    .unwrap();

    assert!(plugin.options().hooks.same_table(&hooks));
}

#[test]
fn missing_solution_fails_construction_and_notifies() {
    init_tracing();

    let cases: [fn(PartialOptions) -> PartialOptions; 2] = [
        |o| PartialOptions {
            solution_path: None,
            ..o
        },
        |o| o.solution_path(""),
    ];

    for options in cases {
        let builder = PluginBuilder::new().options(options);
        let (result, runner, recorder) = builder.try_build();

        match result {
            Err(NugetRestoreError::ConfigError(msg)) => assert_eq!(msg, MISSING_SOLUTION),
            Err(e) => panic!("Expected ConfigError, got: {e:?}"),
            Ok(_) => panic!("Expected error, got Ok"),
        }

        assert_eq!(runner.run_count(), 0, "no process may be spawned");
        assert_eq!(recorder.messages("sink:error"), vec![MISSING_SOLUTION]);
        let on_error = recorder.on(ON_ERROR);
        assert_eq!(on_error.len(), 1);
        assert_eq!(on_error[0].kind, MessageKind::Error);
    }
}

#[test]
fn missing_solution_fails_even_with_error_sink_off() {
    let (result, runner, recorder) = PluginBuilder::new()
        .options(|o| o.solution_path("").error_sink(Sink::Off))
        .try_build();

    assert!(matches!(result, Err(NugetRestoreError::ConfigError(_))));
    assert_eq!(runner.run_count(), 0);
    assert!(recorder.events().is_empty(), "off sink fires no hook");
}

#[test]
fn overlay_prefers_the_upper_layer() {
    let file = PartialOptions::new()
        .solution_path("FromFile.sln")
        .mono_path("/usr/bin/mono")
        .additional_args(["-Verbosity", "quiet"]);
    let flags = PartialOptions::new().solution_path("FromFlag.sln");

    let merged = RestoreOptions::merge(RestoreOptions::default(), file.overlay(flags));

    assert_eq!(merged.solution_path, PathBuf::from("FromFlag.sln"));
    assert_eq!(merged.mono_path, Some(PathBuf::from("/usr/bin/mono")));
    assert_eq!(merged.additional_args, vec!["-Verbosity", "quiet"]);
}
