//! outliner: renumber outline lines and group outline blocks in plain text.
//!
//! Reads text line by line and rewrites two kinds of markup:
//!
//! - **Outline lines** (`*`, `**`, ...) get dotted numbering: `1`, `1.1`, `2`
//! - **Block lines** (`.`, `..`, ...) are indented by depth and prefixed with
//!   `+` while open, `-` once the next line shows they are closed
//!
//! Unmarked lines are continuation text of the open block. Input comes from
//! the given files (glob patterns supported) or stdin; output goes to stdout
//! or `-o FILE`.

mod classify;
mod formatter;
mod input;
mod numbering;
mod stream;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use classify::{Markers, DEFAULT_BLOCK_MARKER, DEFAULT_OUTLINE_MARKER};
use formatter::{ClosePolicy, Options};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use stream::Session;

#[derive(Parser)]
#[command(
    name = "outliner",
    about = "Renumber outline lines and group outline blocks from a text stream"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Prefix character for numbered outline lines
    #[arg(short = 'm', long, default_value_t = DEFAULT_OUTLINE_MARKER)]
    outline_marker: char,

    /// Prefix character for outline block lines
    #[arg(short = 'b', long, default_value_t = DEFAULT_BLOCK_MARKER)]
    block_marker: char,

    /// Keep `+` on a block line whose next block opens a new depth
    #[arg(long)]
    mark_parents: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let markers = Markers {
            outline: self.outline_marker,
            block: self.block_marker,
        };
        if markers.outline == markers.block {
            bail!(
                "outline and block markers must differ (both are '{}')",
                markers.outline
            );
        }
        for marker in [markers.outline, markers.block] {
            if marker.is_whitespace() {
                bail!("marker must not be whitespace: {:?}", marker);
            }
        }
        let close_policy = if self.mark_parents {
            ClosePolicy::MarkParents
        } else {
            ClosePolicy::AlwaysClose
        };
        Ok(Options {
            markers,
            close_policy,
        })
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Create the output sink. Called only once the inputs are known to be usable.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to write {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Refuse to truncate a file that is about to be read.
fn ensure_output_not_input(output: &Path, inputs: &[PathBuf]) -> Result<()> {
    // A missing output file cannot be one of the inputs.
    let Ok(output_real) = fs::canonicalize(output) else {
        return Ok(());
    };
    for input in inputs {
        if fs::canonicalize(input).is_ok_and(|p| p == output_real) {
            bail!(
                "output file {} is also an input; refusing to overwrite it",
                output.display()
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = cli.options()?;

    if cli.files.is_empty() {
        // stdin mode
        let writer = open_output(cli.output.as_deref())?;
        let summary = stream::run(io::stdin().lock(), writer, options)
            .context("failed to format stdin")?;
        log::info!(
            "stdin: {} lines read, {} written",
            summary.lines_read,
            summary.units_written
        );
        return Ok(());
    }

    let files = input::expand_globs(&cli.files)?;
    if let Some(output) = cli.output.as_deref() {
        ensure_output_not_input(output, &files)?;
    }
    let mut session = Session::new(open_output(cli.output.as_deref())?, options);
    for path in &files {
        let file =
            File::open(path).with_context(|| format!("failed to read {}", path.display()))?;
        log::info!("formatting {}", path.display());
        session
            .feed(BufReader::new(file))
            .with_context(|| format!("failed to format {}", path.display()))?;
    }
    let summary = session.finish().context("failed to write output")?;
    log::info!(
        "{} files, {} lines read, {} written",
        files.len(),
        summary.lines_read,
        summary.units_written
    );
    Ok(())
}
