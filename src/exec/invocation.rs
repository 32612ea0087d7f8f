// src/exec/invocation.rs

//! Resolution of the program and argument list for one restore.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::config::RestoreOptions;

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Build the command line for `options`.
    ///
    /// Arguments are `args ++ additional_args ++ [solution_path]`. When an
    /// alternate runner is configured it becomes the program and the nuget
    /// executable is prepended to the arguments ("run nuget via mono").
    pub fn from_options(options: &RestoreOptions) -> Self {
        let mut args: Vec<OsString> = options
            .args
            .iter()
            .chain(options.additional_args.iter())
            .map(OsString::from)
            .collect();
        args.push(options.solution_path.clone().into_os_string());

        match options.alternate_runner() {
            Some(runner) => {
                args.insert(0, options.nuget_path.clone().into_os_string());
                Self {
                    program: runner.to_path_buf(),
                    args,
                }
            }
            None => Self {
                program: options.nuget_path.clone(),
                args,
            },
        }
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
