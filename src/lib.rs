//! # commit-chain
//!
//! Renders the commit history of a local Git repository as a chronological
//! chain diagram.
//!
//! The run has three stages: [`git::HistoryExtractor`] reads `git log`,
//! [`graph::build_chain`] links consecutive commits, and [`graph::Renderer`]
//! hands the result to Graphviz `dot`. External commands go through
//! [`process::CommandRunner`] so each stage can be driven by fixtures.
//!
//! The chain follows commit time only; it is not an ancestry graph.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod error;
pub mod git;
pub mod graph;
pub mod pipeline;
pub mod process;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::pipeline::{ChainPipeline, RunOutcome};

/// The current version of commit-chain.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
