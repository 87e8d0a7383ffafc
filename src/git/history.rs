//! Commit history extraction via `git log`.

use std::path::Path;

use tracing::debug;

use crate::error::CommandError;
use crate::git::CommitRecord;
use crate::process::{CommandRunner, Invocation};

/// Pretty format requesting hash, commit epoch, author name and subject.
pub const LOG_FORMAT: &str = "--pretty=format:%H %ct %an %s";

/// Number of fields on each log line; the last one takes the remainder.
const FIELD_COUNT: usize = 4;

/// Why a log line was left out of the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than four whitespace-separated fields.
    TooFewFields(usize),
    /// The second field is not an integer epoch.
    InvalidTimestamp(String),
    /// The epoch parsed but has no local date representation.
    TimestampOutOfRange(i64),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewFields(n) => {
                write!(f, "expected {FIELD_COUNT} fields, found {n}")
            }
            SkipReason::InvalidTimestamp(raw) => write!(f, "invalid timestamp '{raw}'"),
            SkipReason::TimestampOutOfRange(ts) => write!(f, "timestamp {ts} out of range"),
        }
    }
}

/// A log line that was skipped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// Zero-based line number in the command output.
    pub line_number: usize,
    /// The raw line text.
    pub line: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Parsed history, oldest commit first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    /// Commits in chronological order.
    pub commits: Vec<CommitRecord>,
    /// Lines that could not be parsed, in output order.
    pub skipped: Vec<SkippedLine>,
}

/// Reads commit history from a repository through a [`CommandRunner`].
pub struct HistoryExtractor<R> {
    runner: R,
}

impl<R: CommandRunner> HistoryExtractor<R> {
    /// Creates an extractor using the given runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the log invocation for `repo_path`.
    pub fn log_invocation(repo_path: &Path) -> Invocation {
        Invocation::new("git")
            .arg("-C")
            .arg(repo_path)
            .args(["log", LOG_FORMAT])
    }

    /// Runs the log command and returns the history oldest first.
    ///
    /// Malformed lines are skipped and reported in [`History::skipped`]. A
    /// failure to run the command, or a non-zero exit, is an error and no
    /// partial history is returned.
    pub fn extract(&self, repo_path: &Path) -> Result<History, CommandError> {
        let invocation = Self::log_invocation(repo_path);
        let output = self
            .runner
            .run(&invocation)
            .map_err(|source| CommandError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if !output.success {
            return Err(CommandError::Failed {
                program: invocation.program,
                status: output.status_label(),
                stderr: output.stderr_text(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let history = parse_log(&stdout);
        debug!(
            repo = %repo_path.display(),
            commits = history.commits.len(),
            skipped = history.skipped.len(),
            "Extracted commit history"
        );
        Ok(history)
    }
}

/// Parses newest-first log output into a chronological [`History`].
pub fn parse_log(output: &str) -> History {
    let mut history = History::default();

    for (line_number, line) in output.lines().enumerate() {
        match parse_log_line(line) {
            Ok(record) => history.commits.push(record),
            Err(reason) => {
                debug!(line_number, %reason, "Skipping log line");
                history.skipped.push(SkippedLine {
                    line_number,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }

    // git log lists newest first
    history.commits.reverse();
    history
}

/// Parses one `<hash> <epoch> <author> <message>` line.
pub fn parse_log_line(line: &str) -> Result<CommitRecord, SkipReason> {
    let fields = split_fields(line, FIELD_COUNT);
    let &[hash, raw_epoch, author, message] = fields.as_slice() else {
        return Err(SkipReason::TooFewFields(fields.len()));
    };

    let epoch: i64 = raw_epoch
        .parse()
        .map_err(|_| SkipReason::InvalidTimestamp(raw_epoch.to_string()))?;

    CommitRecord::new(hash, epoch, author, message).ok_or(SkipReason::TimestampOutOfRange(epoch))
}

/// Splits on whitespace runs into at most `max` fields.
///
/// Leading whitespace is ignored and the final field keeps the rest of the
/// line, including any inner whitespace.
fn split_fields(line: &str, max: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(max);
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        if fields.len() + 1 == max {
            fields.push(rest);
            break;
        }
        match rest.split_once(char::is_whitespace) {
            Some((field, tail)) => {
                fields.push(field);
                rest = tail.trim_start();
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }

    fields
}
