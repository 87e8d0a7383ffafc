//! Commit records parsed from the log command.

use chrono::{Local, TimeZone};

/// Display format for commit timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One commit as reported by the log command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit hash.
    pub hash: String,
    /// Commit time in seconds since the Unix epoch.
    pub epoch_seconds: i64,
    /// Commit time rendered in the local time zone as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Author name.
    pub author: String,
    /// Subject line, kept whole.
    pub message: String,
}

impl CommitRecord {
    /// Creates a record, deriving the display timestamp from `epoch_seconds`.
    ///
    /// Returns `None` when the epoch cannot be represented as a local date.
    pub fn new(
        hash: impl Into<String>,
        epoch_seconds: i64,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Option<Self> {
        Some(Self {
            hash: hash.into(),
            epoch_seconds,
            timestamp: format_epoch(epoch_seconds)?,
            author: author.into(),
            message: message.into(),
        })
    }
}

/// Formats epoch seconds as a local `YYYY-MM-DD HH:MM:SS` string.
pub fn format_epoch(epoch_seconds: i64) -> Option<String> {
    Local
        .timestamp_opt(epoch_seconds, 0)
        .earliest()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}
