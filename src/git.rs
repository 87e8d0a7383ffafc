//! Git history extraction.

pub mod commit;
pub mod history;

pub use commit::CommitRecord;
pub use history::{History, HistoryExtractor, SkipReason, SkippedLine};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
