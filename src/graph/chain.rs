//! Chronological chain graph over commit records.
//!
//! The chain links each commit to the next one in time. It does not follow
//! parent links, so merges and branches are flattened into a single path.

use crate::git::CommitRecord;

/// A graph node for one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Position of the commit in the input sequence.
    pub index: usize,
    /// Multi-line label shown in the rendered diagram.
    pub label: String,
}

/// A directed edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Source node index.
    pub from: usize,
    /// Target node index.
    pub to: usize,
}

/// Nodes and edges of a chain graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDescription {
    /// One node per commit, indexed `0..n`.
    pub nodes: Vec<Node>,
    /// Edges `i - 1 -> i` for every `i >= 1`.
    pub edges: Vec<Edge>,
}

impl GraphDescription {
    /// Returns `true` when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the chain graph for commits ordered oldest first.
pub fn build_chain(commits: &[CommitRecord]) -> GraphDescription {
    let nodes = commits
        .iter()
        .enumerate()
        .map(|(index, record)| Node {
            index,
            label: node_label(record),
        })
        .collect();

    let edges = (1..commits.len())
        .map(|to| Edge { from: to - 1, to })
        .collect();

    GraphDescription { nodes, edges }
}

/// Formats the label for a commit node.
pub fn node_label(record: &CommitRecord) -> String {
    format!(
        "Commit: {}\nAuthor: {}\nDate: {}\nMessage: {}",
        record.hash, record.author, record.timestamp, record.message
    )
}
