//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - [`TextTree`], a small formatter for hierarchical debug dumps
//!
//! # Tracing Integration
//!
//! Trellis uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("trellis::dispatch=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```

use std::fmt::{self, Write as FmtWrite};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Handler setup, reloads and render-time resolution.
    pub const HANDLER: &str = "trellis::handler";
    /// Selection and cell event routing.
    pub const DISPATCH: &str = "trellis::dispatch";
    /// Cell class and callback registries.
    pub const REGISTRY: &str = "trellis::registry";
    /// Section payload loading and configuration.
    pub const PAYLOAD: &str = "trellis::payload";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options that only show the top level.
    pub fn shallow() -> Self {
        Self {
            max_depth: Some(0),
            ..Default::default()
        }
    }

    /// Create options using plain ASCII connectors.
    pub fn ascii() -> Self {
        Self {
            style: TreeStyle::Ascii,
            ..Default::default()
        }
    }
}

/// Identifies a node inside a [`TextTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNodeId(usize);

#[derive(Debug, Clone)]
struct TreeNode {
    label: String,
    children: Vec<usize>,
}

/// A labelled tree that formats itself as indented text.
///
/// Nodes are appended in display order; there is no removal.
#[derive(Debug, Clone)]
pub struct TextTree {
    title: String,
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
}

impl TextTree {
    /// Create an empty tree with a title line.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Append a top-level node.
    pub fn push_root(&mut self, label: impl Into<String>) -> TreeNodeId {
        let id = self.push_node(label.into());
        self.roots.push(id);
        TreeNodeId(id)
    }

    /// Append a child under `parent`.
    pub fn push_child(&mut self, parent: TreeNodeId, label: impl Into<String>) -> TreeNodeId {
        let id = self.push_node(label.into());
        self.nodes[parent.0].children.push(id);
        TreeNodeId(id)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_node(&mut self, label: String) -> usize {
        self.nodes.push(TreeNode {
            label,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Format the tree with the given options.
    pub fn format(&self, options: &TreeFormatOptions) -> String {
        let mut output = String::new();
        writeln!(output, "{} ({} nodes):", self.title, self.nodes.len()).expect("write to String");

        if self.roots.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
            return output;
        }

        let root_count = self.roots.len();
        for (i, &root) in self.roots.iter().enumerate() {
            self.format_node_into(root, 0, i == root_count - 1, options, &mut output);
        }
        output
    }

    fn format_node_into(
        &self,
        id: usize,
        depth: usize,
        is_last: bool,
        options: &TreeFormatOptions,
        output: &mut String,
    ) {
        if let Some(max) = options.max_depth {
            if depth > max {
                return;
            }
        }

        let node = &self.nodes[id];
        output.push_str(&build_prefix(options, depth, is_last));
        output.push_str(&node.label);
        output.push('\n');

        let child_count = node.children.len();
        for (i, &child) in node.children.iter().enumerate() {
            self.format_node_into(child, depth + 1, i == child_count - 1, options, output);
        }
    }
}

/// Build the prefix string for a tree node.
fn build_prefix(options: &TreeFormatOptions, depth: usize, is_last: bool) -> String {
    if depth == 0 {
        return String::new();
    }

    let (branch, corner, last) = match options.style {
        TreeStyle::Ascii => ("|", "+--", "`--"),
        TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
        TreeStyle::Compact => ("", "-", "-"),
    };

    let mut prefix = String::new();
    for _ in 0..(depth - 1) {
        prefix.push_str(branch);
        for _ in 0..options.indent_size {
            prefix.push(' ');
        }
    }
    prefix.push_str(if is_last { last } else { corner });
    prefix.push(' ');
    prefix
}

impl fmt::Display for TextTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(&TreeFormatOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_format_empty() {
        let tree = TextTree::new("Sections");
        let output = tree.format(&TreeFormatOptions::default());
        assert!(output.contains("Sections (0 nodes)"));
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_tree_format_hierarchy() {
        let mut tree = TextTree::new("Sections");
        let section = tree.push_root("section 0");
        tree.push_child(section, "row 0");
        tree.push_child(section, "row 1");

        let output = tree.format(&TreeFormatOptions::ascii());
        assert_eq!(output, "Sections (3 nodes):\nsection 0\n+-- row 0\n`-- row 1\n");
    }

    #[test]
    fn test_tree_format_max_depth() {
        let mut tree = TextTree::new("Sections");
        let section = tree.push_root("section 0");
        tree.push_child(section, "row 0");

        let output = tree.format(&TreeFormatOptions::shallow());
        assert!(output.contains("section 0"));
        assert!(!output.contains("row 0"));
    }

    #[test]
    fn test_tree_display_uses_unicode() {
        let mut tree = TextTree::new("Sections");
        let section = tree.push_root("section 0");
        tree.push_child(section, "row 0");
        assert_eq!(tree.len(), 2);
        assert!(tree.to_string().contains("\u{2514}\u{2500}\u{2500} row 0"));
    }
}
