#![allow(dead_code)]

pub use nuget_restore_test_utils::builders::PluginBuilder;
pub use nuget_restore_test_utils::fake_runner::FakeRunner;
pub use nuget_restore_test_utils::recorder::{Recorded, Recorder};
pub use nuget_restore_test_utils::{init_tracing, with_timeout};

use std::io::Write;
use tempfile::NamedTempFile;

/// Write `contents` to a temporary `.toml` file that lives as long as the handle.
pub fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    write!(file, "{contents}").unwrap();
    file
}
