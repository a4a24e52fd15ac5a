// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Indented text view of a value tree.
//!
//! One line per node. A record prints its name, a leaf prints
//! `<type> <value>`, and children sit one level deeper than their parent.

use crate::config::RenderConfig;
use crate::value::{Record, ValueNode};

/// Render `node` at nesting level `indent` with the default config.
pub fn render(node: &ValueNode, indent: usize) -> String {
    render_with(node, indent, &RenderConfig::default())
}

/// Render `node` at nesting level `indent`.
pub fn render_with(node: &ValueNode, indent: usize, config: &RenderConfig) -> String {
    let mut out = String::new();
    write_node(&mut out, node, indent, config);
    out
}

/// Render each top-level record of `document` at level 0, trimming the
/// trailing newlines and spaces of the whole text.
pub fn render_document(document: &Record, config: &RenderConfig) -> String {
    let mut out = String::new();
    for child in &document.children {
        write_node(&mut out, child, 0, config);
    }
    let trimmed = out.trim_end_matches(|c| c == '\n' || c == ' ').len();
    out.truncate(trimmed);
    out
}

fn write_node(out: &mut String, node: &ValueNode, level: usize, config: &RenderConfig) {
    out.push_str(&" ".repeat(level * config.indent_width));
    match node {
        ValueNode::Leaf(leaf) => {
            out.push_str(&leaf.type_name);
            out.push(' ');
            out.push_str(&leaf.value);
            out.push('\n');
        }
        ValueNode::Record(rec) => {
            out.push_str(&rec.name);
            out.push('\n');
            for child in &rec.children {
                write_node(out, child, level + 1, config);
            }
        }
    }
}
