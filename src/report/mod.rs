//! Delimited report files exchanged with rendering and storage collaborators.
//!
//! - per-year match reports: `index,distinct,total,cai,<json match detail>`
//! - yearly summary reports: `year,aware_count,cumulative_cai,total_processed`
//! - candidate reports: `term,mean_tf_idf,document_count`
//!
//! Every writer goes through [`write_atomically`], so a report path either
//! holds a complete file or nothing new.

mod candidates;
mod error;
mod matches;
mod summary;

pub use candidates::{read_candidate_report, write_candidate_report};
pub use error::ReportError;
pub use matches::{MatchRecord, read_match_report, write_match_report};
pub use summary::{read_summary_report, write_summary_report};

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::Utf8Error;

use tracing::debug;

/// Suffix of the sibling file a report is staged in before the rename.
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Writes `path` through a `.partial` sibling that is renamed into place once
/// `write` and the flush succeed.
///
/// Parent directories are created as needed. On any failure the partial
/// file is removed and the error returned.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(path);
    let result = File::create(&partial)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush()
        })
        .and_then(|()| fs::rename(&partial, path));

    if let Err(err) = result {
        // Best-effort cleanup so a half-written report never lingers.
        let _ = fs::remove_file(&partial);
        return Err(err);
    }
    debug!(path = %path.display(), "report written");
    Ok(())
}

/// Reads a report row by row.
///
/// Every non-blank row reaches `on_row` with its 1-based line number, as
/// text or, for a row that is not valid UTF-8, as the decoding error. A bad
/// row never ends the read; only I/O failures and errors from `on_row` do.
pub(crate) fn for_each_row<F>(path: &Path, mut on_row: F) -> Result<(), ReportError>
where
    F: FnMut(usize, Result<&str, Utf8Error>) -> Result<(), ReportError>,
{
    let file = File::open(path).map_err(|source| ReportError::read(path, source))?;
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::new();
    let mut line = 0;
    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|source| ReportError::read(path, source))?;
        if read == 0 {
            return Ok(());
        }
        line += 1;
        let row = std::str::from_utf8(&buffer).map(|row| row.trim_end_matches(['\n', '\r']));
        if matches!(row, Ok(text) if text.trim().is_empty()) {
            continue;
        }
        on_row(line, row)?;
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}
