//! Error types for the external tools the pipeline drives.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the version-control log invocation.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The log command could not be started at all.
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The log command ran but reported a non-zero exit status.
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Human-readable exit status.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

/// Failures of the external rendering engine.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The graph source could not be written next to the output.
    #[error("Failed to write graph source to {}: {source}", path.display())]
    WriteSource {
        /// Intermediate source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rendering engine is not installed or not on the search path.
    #[error("Rendering engine `{program}` is unavailable: {source}")]
    EngineUnavailable {
        /// Engine executable name.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The rendering engine exited abnormally.
    #[error("Rendering engine `{program}` exited with {status}: {stderr}")]
    EngineFailed {
        /// Engine executable name.
        program: String,
        /// Human-readable exit status.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

// Note: anyhow already has a blanket impl for thiserror::Error types
