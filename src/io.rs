//! Trace file loading (`trace-io` feature).
//!
//! Trace files are whitespace/newline-delimited floating depth samples as
//! exported by the profilometer; values are scaled to integers on load.

use std::fs;
use std::path::{Path, PathBuf};

use crate::trace::Trace;
use crate::util::{TraceMatchError, TraceMatchResult};

fn io_error(path: &Path, err: impl std::fmt::Display) -> TraceMatchError {
    TraceMatchError::TraceIo {
        reason: format!("{}: {err}", path.display()),
    }
}

/// Reads one trace file into a scaled [`Trace`].
pub fn read_trace<P: AsRef<Path>>(path: P) -> TraceMatchResult<Trace> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| io_error(path, err))?;

    let mut depths = Vec::new();
    for token in text.split_whitespace() {
        let value: f64 = token
            .parse()
            .map_err(|_| io_error(path, format!("not a number: `{token}`")))?;
        depths.push(value);
    }
    Ok(Trace::from_depths(&depths))
}

/// Lists the regular files of a trace directory, sorted by file name.
pub fn list_trace_files<P: AsRef<Path>>(dir: P) -> TraceMatchResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| io_error(dir, err))? {
        let entry = entry.map_err(|err| io_error(dir, err))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
