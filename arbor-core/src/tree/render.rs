//! Tree rendering for debugging and shrink inspection.

use super::{Node, ShrinkTree};

impl<T> ShrinkTree<T>
where
    T: std::fmt::Display,
{
    /// Render the tree as an indented diagram, one node per line.
    pub fn render(&self) -> String {
        self.render_lines().join("\n")
    }

    /// Render the tree as individual lines.
    ///
    /// Children carry a branch glyph on their first line; continuation lines
    /// of non-last children are padded with a vertical bar so sibling
    /// branches stay readable. A truncated subtree renders as an ellipsis
    /// leaf.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![match &self.node {
            Node::Value(value) => value.to_string(),
            Node::Truncated => "\u{2026}".to_string(),
        }];
        for (index, child) in self.children.iter().enumerate() {
            let is_last = index == self.children.len() - 1;
            let first_prefix = if is_last { "└> " } else { "├> " };
            let other_prefix = if is_last { "   " } else { "|  " };
            for (line_index, line) in child.render_lines().into_iter().enumerate() {
                if line_index == 0 {
                    lines.push(format!("{first_prefix}{line}"));
                } else {
                    lines.push(format!("{other_prefix}{line}"));
                }
            }
        }
        lines
    }
}
