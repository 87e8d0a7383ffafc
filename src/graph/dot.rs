//! DOT source emission.

use crate::graph::GraphDescription;

/// Font settings applied to the whole diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DotStyle {
    /// Font family; must cover the scripts used in author names and messages.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f32,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size: 12.0,
        }
    }
}

/// Renders the graph as DOT source.
pub fn to_dot(graph: &GraphDescription, style: &DotStyle) -> String {
    let font = format!(
        "fontname={} fontsize={}",
        quote(&style.font_name),
        style.font_size
    );

    let mut out = String::new();
    out.push_str("// Git commit chain\n");
    out.push_str("digraph commits {\n");
    out.push_str(&format!("    graph [{font}]\n"));
    out.push_str(&format!("    node [{font}]\n"));
    out.push_str(&format!("    edge [{font}]\n"));

    for node in &graph.nodes {
        out.push_str(&format!("    {} [label={}]\n", node.index, quote(&node.label)));
    }
    for edge in &graph.edges {
        out.push_str(&format!("    {} -> {}\n", edge.from, edge.to));
    }

    out.push_str("}\n");
    out
}

/// Quotes a string as a DOT identifier, escaping quotes, backslashes and newlines.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
