//! Candidate env file loading.
//!
//! Tier 1 of the precedence chain. An ordered list of candidate paths is
//! resolved against the project root, filtered to the files that exist,
//! then read and parsed concurrently. The parsed configurations are
//! applied to the shared [`EnvMap`] strictly in list order, so precedence
//! between candidate files is deterministic even though their reads
//! interleave.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EnvError, Result};
use crate::format::SourceFormat;
use crate::source::{EnvMap, SourceConfig};

/// Load an ordered list of candidate env files into the map.
///
/// Paths resolve against `root`; absolute entries pass through unchanged.
/// Entries that do not exist are skipped silently. Later entries override
/// earlier ones for overlapping mode+key pairs, regardless of which file
/// finishes reading first.
///
/// `None` means no candidate list was given and the whole step is a
/// no-op. A file that exists but cannot be read or parsed, or whose name
/// matches no registered [`SourceFormat`], is a hard error.
pub fn load_path_sources(
    map: &mut EnvMap,
    root: &Path,
    load_path: Option<&[PathBuf]>,
) -> Result<()> {
    let load_path = match load_path {
        Some(paths) => paths,
        None => return Ok(()),
    };

    let existing: Vec<PathBuf> = load_path
        .iter()
        .map(|path| root.join(path))
        .filter(|path| {
            if path.exists() {
                true
            } else {
                tracing::debug!("Skipping missing env source: {}", path.display());
                false
            }
        })
        .collect();

    for source in &read_sources(&existing)? {
        map.apply(Some(source));
    }

    Ok(())
}

/// Read and parse every file concurrently, collecting results in input
/// order. A panicking reader is re-raised on the calling thread.
fn read_sources(paths: &[PathBuf]) -> Result<Vec<SourceConfig>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || load_source_file(path)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// Read and parse a single env source file.
pub fn load_source_file(path: &Path) -> Result<SourceConfig> {
    let format = SourceFormat::for_path(path).ok_or_else(|| EnvError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path).map_err(|e| EnvError::SourceRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    format.parse(&content, path)
}
