//! Outline rendering
//!
//! The outline is a depth-first rendering of a [`Node`] tree:
//!
//! ```text
//! # Root title
//!
//! ## directory
//!
//! - [Document](./directory/document.md)
//! - nested
//!   - [Deeper](./directory/nested/deeper.md)
//!
//! ## [Top level document](./top.md)
//!
//! ```
//!
//! The root becomes a level-1 heading, depth-1 nodes become level-2 headings,
//! and everything deeper becomes a list item indented by one unit per level
//! below 2. Siblings are ordered by their raw filesystem name, never by
//! title.

use std::fmt;

use crate::domain::{Node, NodeKind};

/// The default indentation unit for nested list items.
pub const DEFAULT_INDENT: &str = "  ";

/// The order in which siblings are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Lexicographically ascending by raw name.
    #[default]
    Ascending,

    /// Lexicographically descending by raw name.
    Descending,
}

impl From<bool> for SortOrder {
    /// Converts an "ascending" flag.
    fn from(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// A renderable view of a document tree.
///
/// The [`Display`](fmt::Display) implementation produces the outline text.
#[derive(Debug, Clone, Copy)]
pub struct Outline<'a> {
    root: &'a Node,
    order: SortOrder,
    indent: &'a str,
}

impl<'a> Outline<'a> {
    /// Creates an outline of the given tree using the default indentation.
    #[must_use]
    pub const fn new(root: &'a Node, order: SortOrder) -> Self {
        Self {
            root,
            order,
            indent: DEFAULT_INDENT,
        }
    }

    /// Sets the indentation unit used for nested list items.
    #[must_use]
    pub const fn with_indent(mut self, indent: &'a str) -> Self {
        self.indent = indent;
        self
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
        let title = node.title();
        let target = node.link_target();

        match (node.depth(), node.kind()) {
            (0, _) => writeln!(f, "# {title}")?,
            (1, NodeKind::Directory { .. }) => write!(f, "\n## {title}\n\n")?,
            (1, NodeKind::Document) => write!(f, "\n## [{title}]({target})\n\n")?,
            (depth, kind) => {
                for _ in 2..depth {
                    f.write_str(self.indent)?;
                }
                match kind {
                    NodeKind::Directory { .. } => writeln!(f, "- {title}")?,
                    NodeKind::Document => writeln!(f, "- [{title}]({target})")?,
                }
            }
        }

        for child in sorted_children(node, self.order) {
            self.write_node(f, child)?;
        }
        Ok(())
    }
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root)
    }
}

/// Renders the tree rooted at `root` into outline text.
///
/// This is a pure function of its arguments: rendering the same tree twice
/// yields identical output.
#[must_use]
pub fn render(root: &Node, order: SortOrder, indent: &str) -> String {
    Outline::new(root, order).with_indent(indent).to_string()
}

fn sorted_children(node: &Node, order: SortOrder) -> Vec<&Node> {
    let mut children: Vec<_> = node.children().collect();
    match order {
        SortOrder::Ascending => children.sort_unstable_by(|(a, _), (b, _)| a.cmp(b)),
        SortOrder::Descending => children.sort_unstable_by(|(a, _), (b, _)| b.cmp(a)),
    }
    children.into_iter().map(|(_, child)| child).collect()
}
