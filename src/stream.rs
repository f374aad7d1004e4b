//! Drives a [`Formatter`] over buffered readers and writes what it emits.
//!
//! Lines are read with `read_line` so each keeps its terminator; emitted
//! units are written verbatim. An input whose last line has no terminator
//! gets one only if another input follows it. I/O errors are returned
//! untouched.

use crate::formatter::{Formatter, Options};
use std::io::{self, BufRead, Write};

/// Counters reported once the stream is finished.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines_read: usize,
    pub units_written: usize,
}

/// One formatter shared by every input fed to it, writing into `writer`.
pub struct Session<W: Write> {
    formatter: Formatter,
    writer: W,
    summary: Summary,
    /// Unterminated last line of the previous input, not yet stepped.
    carry: Option<String>,
}

impl<W: Write> Session<W> {
    pub fn new(writer: W, options: Options) -> Self {
        Self {
            formatter: Formatter::new(options),
            writer,
            summary: Summary::default(),
            carry: None,
        }
    }

    /// Format every line of `reader`. Block state carries over to the next input.
    pub fn feed<R: BufRead>(&mut self, mut reader: R) -> io::Result<()> {
        if let Some(mut last) = self.carry.take() {
            last.push('\n');
            self.step(&last)?;
        }
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Ok(());
            }
            self.summary.lines_read += 1;
            if !line.ends_with('\n') {
                // Only the last line can lack one; hold it until we know
                // whether another input follows.
                self.carry = Some(std::mem::take(&mut line));
                return Ok(());
            }
            self.step(&line)?;
        }
    }

    /// Flush the pending block line and the writer.
    pub fn finish(mut self) -> io::Result<Summary> {
        if let Some(last) = self.carry.take() {
            self.step(&last)?;
        }
        if let Some(unit) = self.formatter.finish() {
            self.write_unit(&unit)?;
        }
        self.writer.flush()?;
        Ok(self.summary)
    }

    fn step(&mut self, line: &str) -> io::Result<()> {
        for unit in self.formatter.step(line) {
            self.write_unit(&unit)?;
        }
        Ok(())
    }

    fn write_unit(&mut self, unit: &str) -> io::Result<()> {
        self.writer.write_all(unit.as_bytes())?;
        self.summary.units_written += 1;
        Ok(())
    }
}

/// Format a single reader into `writer`.
pub fn run<R: BufRead, W: Write>(reader: R, writer: W, options: Options) -> io::Result<Summary> {
    let mut session = Session::new(writer, options);
    session.feed(reader)?;
    session.finish()
}
