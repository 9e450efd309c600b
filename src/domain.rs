//! Domain models for table of contents generation.
//!
//! This module contains the document hierarchy, link target escaping, outline
//! rendering and configuration. None of it touches the filesystem.

/// The document hierarchy.
pub mod node;
pub use node::{Node, NodeKind};

/// Escaping of relative paths into link targets.
pub mod link;

/// Rendering of a document hierarchy into a nested outline.
pub mod outline;
pub use outline::{DEFAULT_INDENT, Outline, SortOrder, render};

mod config;
pub use config::{Config, ConfigError, FILE_NAME as CONFIG_FILE_NAME};
