//! Dotted hierarchical numbering for outline lines.

/// One counter per active outline depth; index 0 is depth 1.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Numbering {
    counters: Vec<u64>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `depth` (1-based).
    ///
    /// Re-entering an active depth discards deeper counters and advances the
    /// one at `depth`. Going deeper appends a single `1`, however many
    /// levels the jump skips.
    pub fn advance(&mut self, depth: usize) {
        debug_assert!(depth > 0, "outline depth is 1-based");
        if self.counters.is_empty() {
            self.counters.push(1);
        } else if self.counters.len() >= depth {
            self.counters.truncate(depth);
            self.counters[depth - 1] += 1;
        } else {
            self.counters.push(1);
        }
    }

    /// Dot-joined counters, e.g. `1.2.1`.
    pub fn render(&self) -> String {
        self.counters
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn depth(&self) -> usize {
        self.counters.len()
    }
}
