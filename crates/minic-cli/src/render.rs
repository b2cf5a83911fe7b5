// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Text rendering of a typed syntax tree.
//!
//! Walks the core's fixed-width child interface positionally: every node
//! prints its kind, optional value, and type tag, indented by depth.
//! Absent child slots before an occupied one print as an explicit `·`
//! marker rather than being skipped, so slot positions stay readable.

use minic_core::Node;

/// Renders the tree as one indented line per node.
pub fn render_tree(root: &Node) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &Node, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push_str(&node.kind().to_string());
    if let Some(value) = node.value() {
        out.push('=');
        out.push_str(value);
    }
    if let Some(tag) = node.type_tag() {
        out.push_str(&format!(" : {tag:?}"));
    }
    out.push('\n');

    let children = node.children();
    let Some(last) = children.iter().rposition(Option::is_some) else {
        return;
    };
    for child in &children[..=last] {
        match child {
            Some(child) => render_node(child, depth + 1, out),
            None => {
                indent(depth + 1, out);
                out.push_str("·\n");
            }
        }
    }
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
