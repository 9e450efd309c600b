//! Link targets are relative paths from the scanned root, starting with `./`.
//!
//! Each path segment is percent-escaped on its own and the escaped segments
//! are joined with `/`, so separators are never escaped:
//!
//! - `docs/guide.md` → `./docs/guide.md`
//! - `user guide/intro.md` → `./user%20guide/intro.md`

/// The link target of the scanned root.
pub const ROOT: &str = ".";

/// Appends a single raw path segment to an already escaped link target.
#[must_use]
pub fn join(parent: &str, segment: &str) -> String {
    format!("{parent}/{}", urlencoding::encode(segment))
}

/// Builds the link target for a relative path given as raw segments.
///
/// An empty sequence of segments yields the root target, `.`.
#[must_use]
pub fn from_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .fold(ROOT.to_string(), |target, segment| {
            join(&target, segment.as_ref())
        })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(&["guide.md"], "./guide.md"; "top level document")]
    #[test_case(&["docs", "guide.md"], "./docs/guide.md"; "nested document")]
    #[test_case(&["user guide", "intro.md"], "./user%20guide/intro.md"; "space")]
    #[test_case(&["a?b#c.md"], "./a%3Fb%23c.md"; "query and fragment characters")]
    #[test_case(&["café.md"], "./caf%C3%A9.md"; "non ascii")]
    #[test_case(&["a/b.md"], "./a%2Fb.md"; "separator inside a segment")]
    fn escapes_each_segment(segments: &[&str], expected: &str) {
        assert_eq!(from_segments(segments), expected);
    }

    #[test]
    fn empty_path_is_root() {
        assert_eq!(from_segments(Vec::<String>::new()), ROOT);
    }

    #[test]
    fn join_keeps_parent_escaping() {
        let parent = from_segments(["my docs"]);
        assert_eq!(join(&parent, "x y.md"), "./my%20docs/x%20y.md");
    }
}
