//! Input file resolution.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Expand command-line patterns into a list of real file paths.
///
/// Plain paths are taken as-is; anything else is treated as a glob. Order
/// follows the command line, and each glob's matches are sorted.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            bail!("{} is a directory; pass files or a glob pattern", path.display());
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            log::warn!("no files matched: {}", pattern);
        }
        matches.sort();
        files.extend(matches);
    }
    if files.is_empty() {
        bail!("no input files found");
    }
    Ok(files)
}
