//! Internal module for rendering a node tree as an ASCII diagram.

use crate::types::{Node, NodeKind};

/// Builds a visual tree string from a completed node tree.
///
/// The root renders as `<name>/`; every descendant gets one line in sorted
/// depth-first order, prefixed with `├── ` or `└── ` and one indentation
/// column per ancestor (`│   ` while the ancestor has later siblings, blank
/// padding once it is the last child). Directories carry a trailing `/`,
/// files and symlinks render as plain leaf names.
pub(crate) fn build_tree_string(root: &Node) -> String {
    let mut lines = vec![format!("{}/", root.name)];
    append_children(root, &mut lines, "");
    lines.join("\n")
}

fn append_children(node: &Node, lines: &mut Vec<String>, prefix: &str) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        if child.kind == NodeKind::Directory {
            lines.push(format!("{prefix}{connector}{}/", child.name));
            let extension = if is_last { "    " } else { "│   " };
            append_children(child, lines, &format!("{prefix}{extension}"));
        } else {
            lines.push(format!("{prefix}{connector}{}", child.name));
        }
    }
}
