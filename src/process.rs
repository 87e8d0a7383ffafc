//! External process execution behind a narrow, substitutable interface.
//!
//! Both the log command and the rendering engine go through [`CommandRunner`],
//! so tests can swap in canned output instead of spawning real tools.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

/// A single external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name, resolved through the search path.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<OsString>,
    /// Directory prepended to the child's `PATH` for this invocation only.
    pub search_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            search_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets the directory searched first for the executable.
    pub fn search_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.search_dir = dir;
        self
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited successfully.
    pub success: bool,
    /// Exit code, absent when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Builds a successful output with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Builds a failed output with the given exit code and stderr.
    pub fn failure(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Describes how the process exited.
    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_string(),
        }
    }

    /// Returns standard error decoded lossily and trimmed.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Capability to run an external command to completion.
///
/// Implementations block until the command exits. A spawn failure is reported
/// as `Err`; a non-zero exit is reported through [`CommandOutput::success`].
pub trait CommandRunner {
    /// Runs the invocation and captures its output.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        (**self).run(invocation)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        if let Some(dir) = &invocation.search_dir {
            command.env("PATH", prepend_search_dir(dir.clone())?);
        }

        debug!(program = %invocation.program, args = ?invocation.args, "Running command");
        let output = command.output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Returns the current `PATH` with `dir` placed in front.
fn prepend_search_dir(dir: PathBuf) -> io::Result<OsString> {
    let current = env::var_os("PATH").unwrap_or_default();
    let paths = std::iter::once(dir).chain(env::split_paths(&current));
    env::join_paths(paths).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}
