//! Format snapshot listings as text.

use crate::tree::Node;
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// One row of `statics inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct NodeRow {
    pub path: String,
    pub kind: &'static str,
    pub size: u64,
    pub mode: String,
    pub modified: String,
}

impl NodeRow {
    pub fn from_node(node: &Node) -> Self {
        Self {
            path: node.path.clone(),
            kind: if node.is_dir { "dir" } else { "file" },
            size: node.size,
            mode: node.mode.to_string(),
            modified: format_mod_time(node.mod_time),
        }
    }
}

/// Every node of `tree` in pre-order.
pub fn node_rows(tree: &Node) -> Vec<NodeRow> {
    tree.iter().map(NodeRow::from_node).collect()
}

fn format_mod_time(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a snapshot as a heading, a node table, and totals.
pub fn format_snapshot_text(source: &str, tree: &Node) -> String {
    let rows = node_rows(tree);
    let files = rows.iter().filter(|r| r.kind == "file").count();
    let bytes: u64 = rows.iter().map(|r| r.size).sum();

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Snapshot")));
    out.push_str(&format!("  Source: {}\n", source));
    out.push_str(&format!("  Root: {}\n\n", tree.path));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Kind", "Size", "Mode", "Modified"]);
    for row in &rows {
        table.add_row(vec![
            row.path.clone(),
            row.kind.to_string(),
            row.size.to_string(),
            row.mode.clone(),
            row.modified.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "  {} nodes, {} files, {} bytes\n",
        rows.len(),
        files,
        bytes
    ));
    out
}
