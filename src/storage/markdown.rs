//! Markdown title extraction
//!
//! The title of a document is the text of its first level-1 ATX heading: a
//! line starting with exactly one `#`, followed by whitespace. Nothing else
//! about the document is parsed.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::LazyLock,
};

use regex::Regex;

/// Only ASCII whitespace separates the `#` from the heading text.
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[\t\n\x0C\r ]+(.*)$").expect("heading pattern is valid"));

/// Returns the text of the first level-1 heading in `reader`.
///
/// Lines are scanned from the start and scanning stops at the first match.
/// The captured text is returned as-is. Lines that are not valid UTF-8 are
/// decoded lossily.
///
/// An empty string is returned if there is no level-1 heading, or if the
/// reader fails before one is found.
pub fn extract_title<R: BufRead>(mut reader: R) -> String {
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => return String::new(),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("stopped reading before a title was found: {e}");
                return String::new();
            }
        }

        let text = String::from_utf8_lossy(strip_line_ending(&line));
        if let Some(captures) = H1.captures(&text) {
            return captures[1].to_string();
        }
    }
}

/// Returns the title of the markdown file at `path`.
///
/// A file that cannot be opened has no title.
pub fn title_from_path(path: &Path) -> String {
    match File::open(path) {
        Ok(file) => extract_title(BufReader::new(file)),
        Err(e) => {
            tracing::debug!("failed to open {}: {e}", path.display());
            String::new()
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
