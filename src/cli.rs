//! CLI interface for commit-chain.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::git::{SkippedLine, SHORT_HASH_LEN};
use crate::graph::Cleanup;
use crate::pipeline::{ChainPipeline, RunOutcome};
use crate::process::SystemRunner;
use crate::utils::Settings;

/// commit-chain: renders a repository's history as a chronological chain.
#[derive(Parser, Debug)]
#[command(name = "commit-chain")]
#[command(
    about = "Renders the commit history of a local Git repository as a chain diagram",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Directory containing the Graphviz `dot` executable. Defaults to
    /// COMMIT_CHAIN_DOT_DIR, then to the inherited PATH.
    #[arg(long = "dot", value_name = "DIR")]
    pub dot_dir: Option<PathBuf>,

    /// Path to the repository to analyze.
    #[arg(long, value_name = "PATH")]
    pub repo: PathBuf,

    /// Output file name without extension; the image is written to <NAME>.png.
    #[arg(long, value_name = "NAME")]
    pub output: PathBuf,

    /// Font family for node labels; must cover the scripts used in commits.
    #[arg(long, value_name = "FONT")]
    pub font: Option<String>,

    /// Font size in points.
    #[arg(long, value_name = "PT")]
    pub font_size: Option<f32>,
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load_or_default();
        let pipeline = ChainPipeline::new(SystemRunner)
            .with_engine_dir(settings.engine_dir(self.dot_dir))
            .with_style(settings.dot_style(self.font, self.font_size));

        let outcome = pipeline.run(&self.repo, &self.output)?;
        println!("{}", format_outcome(&outcome));
        Ok(())
    }
}

/// Formats the status report printed after a run.
pub(crate) fn format_outcome(outcome: &RunOutcome) -> String {
    let mut lines = Vec::new();

    match outcome {
        RunOutcome::RepositoryMissing { reason, .. } => {
            lines.push(format!("Error: {reason}."));
        }
        RunOutcome::NoCommits { skipped } => {
            lines.extend(skipped.iter().map(format_skipped));
            lines.push("No commits found.".to_string());
        }
        RunOutcome::Rendered {
            commits,
            output,
            skipped,
            ..
        } => {
            lines.extend(skipped.iter().map(format_skipped));

            let range = match (commits.first(), commits.last()) {
                (Some(first), Some(last)) => format!(
                    " ({}..{})",
                    truncate_hash(&first.hash),
                    truncate_hash(&last.hash)
                ),
                _ => String::new(),
            };
            let skipped_note = match skipped.len() {
                0 => String::new(),
                n => format!(", {n} line(s) skipped"),
            };
            lines.push(format!(
                "Success! Graph of {} commit(s){range} saved to {}{skipped_note}.",
                commits.len(),
                output.image.display()
            ));

            match &output.cleanup {
                Cleanup::Removed => lines.push(format!(
                    "Intermediate file '{}' removed.",
                    output.source.display()
                )),
                Cleanup::AlreadyAbsent => {}
                Cleanup::Failed(e) => lines.push(format!(
                    "Failed to remove intermediate file '{}': {e}",
                    output.source.display()
                )),
            }
        }
    }

    lines.join("\n")
}

fn format_skipped(skipped: &SkippedLine) -> String {
    format!(
        "Skipped log line {}: {} ({})",
        skipped.line_number + 1,
        skipped.reason,
        skipped.line
    )
}

/// Truncates a commit hash to [`SHORT_HASH_LEN`] characters.
pub(crate) fn truncate_hash(hash: &str) -> &str {
    match hash.char_indices().nth(SHORT_HASH_LEN) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}
