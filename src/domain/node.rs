//! In-memory document hierarchy
//!
//! A [`Node`] knows nothing about the filesystem. The
//! [`Directory`](crate::Directory) walks the disk and feeds every eligible
//! document into the tree through [`Node::insert_document`], which creates the
//! intermediate directories on the way down. Directories therefore only exist
//! if at least one document lives somewhere beneath them.

use std::collections::{HashMap, hash_map::Entry};

use crate::domain::link;

/// Whether a [`Node`] is a directory or a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A directory, holding its children keyed by raw filesystem entry name.
    ///
    /// The map has no intrinsic order. Consumers that need a stable order
    /// must sort the keys themselves.
    Directory {
        /// The child nodes.
        children: HashMap<String, Node>,
    },

    /// A markdown document.
    Document,
}

/// A directory or document in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,

    /// The display title.
    ///
    /// For documents this is the first level-1 heading, or empty. For
    /// directories it is the directory name.
    title: String,

    /// Distance from the root. The root is at depth 0.
    depth: usize,

    /// The escaped relative path of this node, starting with `./`.
    ///
    /// Only documents are rendered as links, but directories carry their
    /// target too.
    link_target: String,
}

impl Node {
    /// Creates an empty root directory with no title.
    #[must_use]
    pub fn root() -> Self {
        Self::directory(String::new(), 0, link::ROOT.to_string())
    }

    fn directory(title: String, depth: usize, link_target: String) -> Self {
        Self {
            kind: NodeKind::Directory {
                children: HashMap::new(),
            },
            title,
            depth,
            link_target,
        }
    }

    const fn document(title: String, depth: usize, link_target: String) -> Self {
        Self {
            kind: NodeKind::Document,
            title,
            depth,
            link_target,
        }
    }

    /// Whether this node is a directory or a document.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` if this node is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// The display title of this node.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the display title.
    ///
    /// This is how the root receives its title once the tree is built.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Distance from the root.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The escaped relative path of this node.
    #[must_use]
    pub fn link_target(&self) -> &str {
        &self.link_target
    }

    /// Iterates over the children of a directory, in no particular order.
    ///
    /// Documents have no children.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        let children = match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::Document => None,
        };
        children
            .into_iter()
            .flatten()
            .map(|(name, child)| (name.as_str(), child))
    }

    /// Looks up a direct child by its raw name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        match &self.kind {
            NodeKind::Directory { children } => children.get(name),
            NodeKind::Document => None,
        }
    }

    /// Counts the documents at or beneath this node.
    #[must_use]
    pub fn document_count(&self) -> usize {
        match &self.kind {
            NodeKind::Directory { children } => children.values().map(Self::document_count).sum(),
            NodeKind::Document => 1,
        }
    }

    /// Inserts a document beneath this directory.
    ///
    /// `dirs` are the raw names of the directories between this node and the
    /// document. Missing directories are created along the way, each one
    /// level deeper than its parent.
    ///
    /// Keys are unique within a directory and the last insertion wins: a
    /// document replaces any existing entry of the same name, and a directory
    /// segment that collides with an existing document replaces that document.
    ///
    /// Returns `false`, leaving the tree untouched, if this node is a
    /// document.
    pub fn insert_document<S: AsRef<str>>(
        &mut self,
        dirs: &[S],
        name: &str,
        title: String,
    ) -> bool {
        let depth = self.depth + 1;
        let NodeKind::Directory { children } = &mut self.kind else {
            return false;
        };
        let parent_target = &self.link_target;

        let Some((dir, rest)) = dirs.split_first() else {
            let document = Self::document(title, depth, link::join(parent_target, name));
            if children.insert(name.to_string(), document).is_some() {
                tracing::debug!("replaced existing entry '{name}' in '{parent_target}'");
            }
            return true;
        };

        let dir = dir.as_ref();
        let new_directory =
            || Self::directory(dir.to_string(), depth, link::join(parent_target, dir));
        let child = match children.entry(dir.to_string()) {
            Entry::Occupied(entry) if entry.get().is_directory() => entry.into_mut(),
            Entry::Occupied(mut entry) => {
                tracing::debug!("replaced document '{dir}' in '{parent_target}' with a directory");
                entry.insert(new_directory());
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(new_directory()),
        };

        child.insert_document(rest, name, title)
    }
}
