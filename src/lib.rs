//! Markdown table of contents generation
//!
//! Documents are markdown files stored in a directory tree. The tree is
//! scanned once into a [`Node`] hierarchy, which is then rendered as a nested
//! outline of links.

pub mod domain;
pub use domain::{Config, Node, NodeKind, Outline, SortOrder, render};

/// Filesystem scanning and document title extraction.
pub mod storage;
pub use storage::{BuildError, Directory};
