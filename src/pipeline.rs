//! The one-shot run: check the repository, extract history, build the chain
//! and render it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::git::{CommitRecord, HistoryExtractor, SkippedLine};
use crate::graph::{build_chain, DotStyle, GraphDescription, RenderOutput, Renderer};
use crate::process::CommandRunner;
use crate::utils::check_repository_path;

/// How a run ended when no fatal error occurred.
#[derive(Debug)]
pub enum RunOutcome {
    /// The repository path does not exist; nothing was run.
    RepositoryMissing {
        /// The path that was checked.
        path: PathBuf,
        /// Human-readable explanation.
        reason: String,
    },
    /// The log contained no usable commits; no image was produced.
    NoCommits {
        /// Lines that were skipped while parsing.
        skipped: Vec<SkippedLine>,
    },
    /// The image was rendered.
    Rendered {
        /// Commits in the diagram, oldest first.
        commits: Vec<CommitRecord>,
        /// The graph handed to the renderer.
        graph: GraphDescription,
        /// Rendered image and cleanup outcome.
        output: RenderOutput,
        /// Lines that were skipped while parsing.
        skipped: Vec<SkippedLine>,
    },
}

/// Runs the extract, build and render stages with a shared command runner.
pub struct ChainPipeline<R> {
    runner: R,
    engine_dir: Option<PathBuf>,
    style: DotStyle,
}

impl<R: CommandRunner> ChainPipeline<R> {
    /// Creates a pipeline with the default font and inherited search path.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            engine_dir: None,
            style: DotStyle::default(),
        }
    }

    /// Sets the directory searched first for the `dot` engine.
    pub fn with_engine_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.engine_dir = dir;
        self
    }

    /// Sets the diagram font.
    pub fn with_style(mut self, style: DotStyle) -> Self {
        self.style = style;
        self
    }

    /// Renders the history of `repo` to `<stem>.png`.
    ///
    /// Returns `Err` only when the log command or the rendering engine fails.
    pub fn run(&self, repo: &Path, stem: &Path) -> Result<RunOutcome> {
        if let Err(e) = check_repository_path(repo) {
            return Ok(RunOutcome::RepositoryMissing {
                path: repo.to_path_buf(),
                reason: e.to_string(),
            });
        }

        let history = HistoryExtractor::new(&self.runner)
            .extract(repo)
            .with_context(|| format!("Failed to read commit history of {}", repo.display()))?;

        if history.commits.is_empty() {
            info!(repo = %repo.display(), "No commits found");
            return Ok(RunOutcome::NoCommits {
                skipped: history.skipped,
            });
        }

        let graph = build_chain(&history.commits);
        let output = Renderer::new(&self.runner)
            .with_engine_dir(self.engine_dir.clone())
            .with_style(self.style.clone())
            .render(&graph, stem)
            .context("Failed to render commit graph")?;

        Ok(RunOutcome::Rendered {
            commits: history.commits,
            graph,
            output,
            skipped: history.skipped,
        })
    }
}
