//! Outline formatter: a line transducer with one line of lookahead.
//!
//! Outline lines are numbered and emitted immediately. Block lines are held
//! back as the *pending* line until the next block line, outline line, or
//! end of stream shows whether they were the last of their group; only then
//! is the open glyph rewritten and the line emitted. Plain lines are folded
//! into the pending line as indented continuation text.

use crate::classify::{Classified, LineKind, Markers};
use crate::numbering::Numbering;
use std::collections::BTreeSet;

const OPEN: &str = "+";
const CLOSED: &str = "-";
/// Extra indentation of continuation text past the block's depth.
const CONTINUATION_PAD: usize = 3;

/// How a pending block line is closed when the next block line arrives.
///
/// Outline lines and end of stream always close the pending line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClosePolicy {
    /// Every flushed block line gets `-`.
    #[default]
    AlwaysClose,
    /// A block line followed by one at a depth not yet seen in its group
    /// keeps `+`, marking it as a parent.
    MarkParents,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub markers: Markers,
    pub close_policy: ClosePolicy,
}

/// A formatted block line waiting to learn whether it is last in its group.
#[derive(Debug)]
struct PendingLine {
    text: String,
    /// Byte offset of the open glyph; `None` for text accumulated before any
    /// block line was opened.
    glyph_at: Option<usize>,
}

impl PendingLine {
    fn open(depth: usize, remainder: &str) -> Self {
        let mut text = " ".repeat(depth + 1);
        let glyph_at = text.len();
        text.push_str(OPEN);
        text.push_str(remainder);
        Self {
            text,
            glyph_at: Some(glyph_at),
        }
    }

    fn bare() -> Self {
        Self {
            text: String::new(),
            glyph_at: None,
        }
    }

    fn append_continuation(&mut self, indent: usize, text: &str) {
        self.text.push_str(&" ".repeat(indent));
        self.text.push_str(text);
    }

    fn close(mut self) -> String {
        if let Some(at) = self.glyph_at {
            self.text.replace_range(at..at + OPEN.len(), CLOSED);
        }
        self.text
    }

    fn keep_open(self) -> String {
        self.text
    }
}

/// Lines produced by a single [`Formatter::step`], in output order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Emitted {
    /// A previously pending block line, released by this step.
    pub flushed: Option<String>,
    /// A line emitted directly by this step (outline lines only).
    pub line: Option<String>,
}

impl Emitted {
    fn from_flush(flushed: Option<String>) -> Self {
        Self {
            flushed,
            line: None,
        }
    }
}

impl IntoIterator for Emitted {
    type Item = String;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<String>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        [self.flushed, self.line].into_iter().flatten()
    }
}

/// Streaming formatter state. Feed every input line to [`step`](Self::step),
/// then call [`finish`](Self::finish) once.
#[derive(Debug)]
pub struct Formatter {
    markers: Markers,
    close_policy: ClosePolicy,
    numbering: Numbering,
    pending: Option<PendingLine>,
    /// Block depths seen since the last outline line.
    seen_depths: BTreeSet<usize>,
    /// Depth of the most recent block line; survives group resets.
    continuation_width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Formatter {
    pub fn new(options: Options) -> Self {
        Self {
            markers: options.markers,
            close_policy: options.close_policy,
            numbering: Numbering::new(),
            pending: None,
            seen_depths: BTreeSet::new(),
            continuation_width: 0,
        }
    }

    /// Process one input line (terminator included) and return what it releases.
    pub fn step(&mut self, line: &str) -> Emitted {
        match self.markers.kind(line) {
            LineKind::Empty => Emitted::default(),
            LineKind::Outline(outline) => self.outline(outline),
            LineKind::Block(block) => Emitted::from_flush(self.block(block)),
            LineKind::Plain(text) => {
                self.continuation(text);
                Emitted::default()
            }
        }
    }

    /// Release the pending block line, closed, at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        self.close_group()
    }

    fn outline(&mut self, outline: Classified<'_>) -> Emitted {
        let flushed = self.close_group();
        self.numbering.advance(outline.depth);
        let number = self.numbering.render();
        log::trace!(
            "outline depth {} numbered {} ({} active levels)",
            outline.depth,
            number,
            self.numbering.depth()
        );
        Emitted {
            flushed,
            line: Some(format!("{number}{}", outline.remainder)),
        }
    }

    fn block(&mut self, block: Classified<'_>) -> Option<String> {
        let depth = block.depth;
        self.continuation_width = depth;
        let seen = self.seen_depths.contains(&depth);
        let flushed = self.pending.take().map(|prev| match self.close_policy {
            ClosePolicy::MarkParents if !seen => prev.keep_open(),
            _ => prev.close(),
        });
        log::trace!("block depth {depth} (seen before: {seen})");
        self.pending = Some(PendingLine::open(depth, block.remainder));
        self.seen_depths.insert(depth);
        flushed
    }

    fn continuation(&mut self, text: &str) {
        let indent = self.continuation_width + CONTINUATION_PAD;
        let pending = self.pending.get_or_insert_with(|| {
            log::debug!("continuation text with no open block");
            PendingLine::bare()
        });
        pending.append_continuation(indent, text);
    }

    fn close_group(&mut self) -> Option<String> {
        if !self.seen_depths.is_empty() {
            log::debug!("closing block group at depths {:?}", self.seen_depths);
            self.seen_depths.clear();
        }
        self.pending.take().map(PendingLine::close)
    }
}
