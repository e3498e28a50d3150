use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use super::record::{has_open_quote, RecordError};

/// Outcome of reading one roster file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records that made it into the roster.
    pub loaded: usize,
    /// Records dropped because they were malformed or rejected.
    pub skipped: usize,
}

/// Feed every record of `path` to `apply`. A first record equal to `header`
/// is skipped, as are blank lines. A quoted field may span physical lines.
/// Records that `apply` rejects are logged and counted instead of aborting
/// the read; only I/O failures are fatal.
///
/// A missing file reads as empty.
pub(crate) fn read_records<F>(path: &Path, header: &str, mut apply: F) -> Result<LoadReport>
where
    F: FnMut(&str) -> Result<(), RecordError>,
{
    let mut report = LoadReport::default();
    if !path.exists() {
        return Ok(report);
    }

    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut record = String::new();
    let mut line_no = 0;
    let mut start_line = 1;
    let mut first = true;

    loop {
        let read = reader.read_line(&mut record).with_context(|| {
            format!("failed to read line {} of {}", line_no + 1, path.display())
        })?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if has_open_quote(&record) {
            continue;
        }

        let line = record.trim_end_matches(['\n', '\r']);
        if !line.trim().is_empty() {
            if !(first && is_header(line, header)) {
                apply_record(&mut apply, &mut report, path, start_line, line);
            }
            first = false;
        }
        record.clear();
        start_line = line_no + 1;
    }

    // The file ended inside a quoted field.
    if !record.is_empty() {
        apply_record(&mut apply, &mut report, path, start_line, &record);
    }

    Ok(report)
}

fn apply_record<F>(
    apply: &mut F,
    report: &mut LoadReport,
    path: &Path,
    line_no: usize,
    line: &str,
) where
    F: FnMut(&str) -> Result<(), RecordError>,
{
    match apply(line) {
        Ok(()) => report.loaded += 1,
        Err(err) => {
            report.skipped += 1;
            warn!(path = %path.display(), line = line_no, error = %err, "skipping record");
        }
    }
}

/// Write `header` followed by one line per row, returning the row count. The
/// file handle is flushed and closed before this returns.
pub(crate) fn write_records<I>(path: &Path, header: &str, rows: I) -> Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{header}").with_context(|| format!("failed to write {}", path.display()))?;
    let mut written = 0;
    for row in rows {
        writeln!(writer, "{row}").with_context(|| format!("failed to write {}", path.display()))?;
        written += 1;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    Ok(written)
}

fn is_header(line: &str, header: &str) -> bool {
    line.trim().eq_ignore_ascii_case(header)
}
