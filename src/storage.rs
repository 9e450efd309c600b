mod directory;
/// Extraction of document titles from markdown.
pub mod markdown;

pub use directory::{BuildError, Directory};
pub use markdown::{extract_title, title_from_path};
