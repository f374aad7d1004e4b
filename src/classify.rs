//! Line classification for outline markup.
//!
//! A line is inspected for a leading run of a marker character after its
//! leading whitespace is stripped. The outline marker is checked first;
//! the block marker is only consulted when the outline run is empty, so a
//! line belongs to at most one kind.

/// Default marker for numbered outline lines.
pub const DEFAULT_OUTLINE_MARKER: char = '*';
/// Default marker for outline block lines.
pub const DEFAULT_BLOCK_MARKER: char = '.';

/// A raw line split into its marker depth and the text after the marker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    /// Number of consecutive marker characters, 0 when the marker is absent.
    pub depth: usize,
    /// Text after the whitespace and marker run, terminator included.
    pub remainder: &'a str,
}

/// Strip leading whitespace, then count and strip the leading run of `marker`.
///
/// When the marker does not start the stripped line the depth is 0 and the
/// remainder is the stripped line itself.
pub fn classify(line: &str, marker: char) -> Classified<'_> {
    let stripped = line.trim_start();
    let remainder = stripped.trim_start_matches(marker);
    let depth = (stripped.len() - remainder.len()) / marker.len_utf8();
    Classified { depth, remainder }
}

/// What a single input line means to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only; skipped entirely.
    Empty,
    Outline(Classified<'a>),
    Block(Classified<'a>),
    /// Unmarked text, leading whitespace stripped.
    Plain(&'a str),
}

/// The pair of marker characters a formatter recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub outline: char,
    pub block: char,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            outline: DEFAULT_OUTLINE_MARKER,
            block: DEFAULT_BLOCK_MARKER,
        }
    }
}

impl Markers {
    pub fn kind<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.trim().is_empty() {
            return LineKind::Empty;
        }
        let outline = classify(line, self.outline);
        if outline.depth > 0 {
            return LineKind::Outline(outline);
        }
        let block = classify(line, self.block);
        if block.depth > 0 {
            return LineKind::Block(block);
        }
        LineKind::Plain(block.remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_marker_run() {
        let c = classify("*** Deep\n", '*');
        assert_eq!(c.depth, 3);
        assert_eq!(c.remainder, " Deep\n");
    }

    #[test]
    fn strips_leading_whitespace_first() {
        let c = classify("  \t.. child\n", '.');
        assert_eq!(c.depth, 2);
        assert_eq!(c.remainder, " child\n");
    }

    #[test]
    fn absent_marker_returns_stripped_line() {
        let c = classify("   hello *world*\n", '*');
        assert_eq!(c.depth, 0);
        assert_eq!(c.remainder, "hello *world*\n");
    }

    #[test]
    fn marker_only_in_middle_is_not_counted() {
        let c = classify("a.b.c\n", '.');
        assert_eq!(c.depth, 0);
        assert_eq!(c.remainder, "a.b.c\n");
    }

    #[test]
    fn reclassifying_unmarked_remainder_is_identity() {
        for line in ["plain text\n", "x * y\n", "tail", "- item\n"] {
            let first = classify(line, '*');
            assert_eq!(first.depth, 0);
            let again = classify(first.remainder, '*');
            assert_eq!(again, first, "line: {line:?}");
        }
    }

    #[test]
    fn multibyte_marker_depth_counts_chars() {
        let c = classify("§§ Section\n", '§');
        assert_eq!(c.depth, 2);
        assert_eq!(c.remainder, " Section\n");
    }

    #[test]
    fn outline_marker_takes_priority() {
        let markers = Markers::default();
        assert!(matches!(
            markers.kind("*. mixed\n"),
            LineKind::Outline(Classified { depth: 1, .. })
        ));
        assert!(matches!(
            markers.kind(".* mixed\n"),
            LineKind::Block(Classified { depth: 1, .. })
        ));
    }

    #[test]
    fn blank_lines_are_empty() {
        let markers = Markers::default();
        assert_eq!(markers.kind(""), LineKind::Empty);
        assert_eq!(markers.kind("\n"), LineKind::Empty);
        assert_eq!(markers.kind("  \t \r\n"), LineKind::Empty);
    }

    #[test]
    fn unmarked_line_is_plain() {
        let markers = Markers::default();
        assert_eq!(markers.kind("   just text\n"), LineKind::Plain("just text\n"));
    }

    #[test]
    fn custom_markers() {
        let markers = Markers {
            outline: '#',
            block: '>',
        };
        assert!(matches!(markers.kind("## Two\n"), LineKind::Outline(_)));
        assert!(matches!(markers.kind(">>> Three\n"), LineKind::Block(_)));
        assert_eq!(markers.kind("* star\n"), LineKind::Plain("* star\n"));
    }
}
