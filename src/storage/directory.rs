//! A filesystem backed tree of markdown documents
//!
//! The [`Directory`] walks a directory on disk and builds the filesystem
//! agnostic [`Node`] hierarchy from every eligible markdown file it finds.

use std::{
    borrow::Cow,
    path::{Component, Path, PathBuf},
};

use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

use crate::{Node, storage::markdown::title_from_path};

/// Files with this name are never part of the table of contents.
const README: &str = "README.md";

/// A directory of markdown documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    /// The root of the directory documents are stored in.
    root: PathBuf,
}

impl Directory {
    /// Opens a directory at the given path.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walks the directory and builds the document tree.
    ///
    /// Every file whose name ends in `.md`, other than `README.md`, becomes a
    /// document node. Its title is the first level-1 heading in the file; a
    /// file that cannot be read gets an empty title but is still included.
    ///
    /// The root of the returned tree has no title. A symbolic link given as the
    /// root is followed; links beneath it are not.
    ///
    /// # Errors
    ///
    /// This method fails, without returning a partial tree, if:
    ///
    /// - the root does not exist or cannot be read
    /// - the root is not a directory
    /// - any directory beneath the root cannot be read
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self) -> Result<Node, BuildError> {
        let mut tree = Node::root();
        let mut skipped = 0_usize;

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;

            if entry.depth() == 0 {
                // The root link is followed, but its entry still reports the link's own type.
                if !entry.path().is_dir() {
                    return Err(BuildError::NotADirectory(self.root.clone()));
                }
                continue;
            }
            if entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !is_eligible(&name) {
                tracing::trace!("skipping {}", entry.path().display());
                skipped += 1;
                continue;
            }

            let dirs = self.parent_segments(&entry);
            let title = title_from_path(entry.path());
            tracing::debug!("found '{title}' at {}", entry.path().display());
            tree.insert_document(&dirs, &name, title);
        }

        tracing::info!(
            "found {} documents, skipped {skipped} other files",
            tree.document_count()
        );
        Ok(tree)
    }

    /// The raw names of the directories between the root and `entry`.
    fn parent_segments<'a>(&self, entry: &'a DirEntry) -> Vec<Cow<'a, str>> {
        entry
            .path()
            .strip_prefix(&self.root)
            .ok()
            .and_then(Path::parent)
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|component| match component {
                        Component::Normal(segment) => Some(segment.to_string_lossy()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Whether a file with this name belongs in the table of contents.
fn is_eligible(name: &str) -> bool {
    name.ends_with(".md") && name != README
}

/// Errors that can occur while building the document tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The directory tree could not be walked.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// The root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
