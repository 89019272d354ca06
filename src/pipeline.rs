//! The filter and report phases.
//!
//! The filter phase copies every accepted access-log line, verbatim and in
//! input order, into the combined store. The report phase turns the combined
//! store into the CSV report. A failure on a single line is logged and counted
//! and the run goes on with the next line.

use crate::classifier::Classifier;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::reader::LineReader;
use crate::record::RecordExtractor;
use crate::report;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

const COMBINED_STORE: &str = "combined file";
const REPORT_STORE: &str = "CSV report";

/// Counters of a filter run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    /// Log files processed.
    pub files: usize,
    /// Lines read from all inputs.
    pub lines_read: usize,
    /// Lines appended to the combined store.
    pub lines_kept: usize,
    /// Lines or files that could not be read or written.
    pub failures: usize,
}

impl FilterStats {
    /// Add the counters of another run to this one.
    pub fn merge(&mut self, other: &FilterStats) {
        self.files += other.files;
        self.lines_read += other.lines_read;
        self.lines_kept += other.lines_kept;
        self.failures += other.failures;
    }
}

/// Counters of a report run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
    /// Lines read from the combined store.
    pub lines_read: usize,
    /// Rows appended to the report.
    pub rows_written: usize,
    /// Lines that produced no row.
    pub lines_skipped: usize,
    /// Lines that could not be read or written.
    pub failures: usize,
}

/// Copy accepted lines from `input` to `out`.
///
/// Each accepted line is written on its own, newline-terminated, and flushed.
/// An I/O error that ends the input is returned; everything else is counted
/// in [`FilterStats::failures`].
pub fn filter_lines<R: Read, W: Write>(
    parser: &Parser,
    classifier: &Classifier,
    input: R,
    out: &mut W,
) -> Result<FilterStats> {
    let mut stats = FilterStats::default();
    filter_into(parser, classifier, input, out, &mut stats)?;
    Ok(stats)
}

/// Like [`filter_lines`], counting into `stats` so an aborted input keeps
/// the counts of the lines handled before the error.
fn filter_into<R: Read, W: Write>(
    parser: &Parser,
    classifier: &Classifier,
    input: R,
    out: &mut W,
    stats: &mut FilterStats,
) -> Result<()> {
    let mut reader = LineReader::new(input);

    while let Some(line) = reader.read() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.is_line_local() => {
                warn!(line = reader.line_number(), error = %e, "skipping unreadable line");
                stats.failures += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        stats.lines_read += 1;

        if !parser.filter_line(&line, classifier) {
            continue;
        }

        match append_line(out, &line) {
            Ok(()) => {
                debug!(line = %line, "accepted");
                stats.lines_kept += 1;
            }
            Err(e) => {
                warn!(line = reader.line_number(), error = %e, "failed to append line");
                stats.failures += 1;
            }
        }
    }

    Ok(())
}

/// Append report rows for the lines of `input` to `out`.
///
/// The header is not written here; see [`report::header`].
pub fn report_lines<R: Read, W: Write>(
    extractor: &RecordExtractor<'_>,
    input: R,
    out: &mut W,
) -> Result<ReportStats> {
    let mut stats = ReportStats::default();
    let mut reader = LineReader::new(input);

    while let Some(line) = reader.read() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.is_line_local() => {
                warn!(line = reader.line_number(), error = %e, "skipping unreadable line");
                stats.failures += 1;
                continue;
            }
            Err(e) => return Err(e),
        };
        stats.lines_read += 1;

        let Some(row) = extractor.extract(&line) else {
            stats.lines_skipped += 1;
            continue;
        };

        let rendered = report::render_row(&row);
        match write_flushed(out, &rendered) {
            Ok(()) => {
                debug!(row = rendered.trim_end(), "row written");
                stats.rows_written += 1;
            }
            Err(e) => {
                warn!(line = reader.line_number(), error = %e, "failed to write row");
                stats.failures += 1;
            }
        }
    }

    Ok(stats)
}

/// Run the filter phase: every log file of the log directory into a fresh combined store.
///
/// Fails before doing any work when the combined store already exists or the
/// log directory cannot be listed. A log file that cannot be read is logged
/// and skipped.
pub fn parse_logs(config: &Config, parser: &Parser, classifier: &Classifier) -> Result<FilterStats> {
    let combined = config.combined_path();
    if combined.exists() {
        return Err(Error::store_exists(COMBINED_STORE, &combined));
    }

    let files = log_files(config)?;

    fs::create_dir_all(&config.out_dir)?;
    let mut store = OpenOptions::new()
        .append(true)
        .create_new(true)
        .open(&combined)?;

    let mut stats = FilterStats::default();
    for path in files {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot open log file");
                stats.failures += 1;
                continue;
            }
        };

        let mut file_stats = FilterStats {
            files: 1,
            ..Default::default()
        };
        match filter_into(parser, classifier, file, &mut store, &mut file_stats) {
            Ok(()) => info!(
                file = %path.display(),
                read = file_stats.lines_read,
                kept = file_stats.lines_kept,
                "log file filtered"
            ),
            Err(e) => {
                warn!(
                    file = %path.display(),
                    read = file_stats.lines_read,
                    kept = file_stats.lines_kept,
                    error = %e,
                    "log file aborted"
                );
                file_stats.failures += 1;
            }
        }
        stats.merge(&file_stats);
    }

    info!(
        store = %combined.display(),
        files = stats.files,
        kept = stats.lines_kept,
        failures = stats.failures,
        "filter phase finished"
    );
    Ok(stats)
}

/// Run the report phase: the combined store into a fresh CSV report.
///
/// Fails before doing any work when the combined store is missing or the
/// report already exists. Rows are written one at a time, so a report cut
/// short by a failure keeps every row written before it.
pub fn create_report(config: &Config, extractor: &RecordExtractor<'_>) -> Result<ReportStats> {
    let combined = config.combined_path();
    if !combined.exists() {
        return Err(Error::store_missing(COMBINED_STORE, &combined));
    }

    let report_path = config.report_path();
    if report_path.exists() {
        return Err(Error::store_exists(REPORT_STORE, &report_path));
    }

    let input = File::open(&combined)?;
    let mut out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&report_path)?;

    write_flushed(&mut out, &report::header())?;
    let stats = report_lines(extractor, input, &mut out)?;

    info!(
        report = %report_path.display(),
        rows = stats.rows_written,
        skipped = stats.lines_skipped,
        failures = stats.failures,
        "report phase finished"
    );
    Ok(stats)
}

/// Regular files directly inside the log directory, sorted by path.
fn log_files(config: &Config) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(&config.logs_dir).map_err(|e| Error::log_directory(&config.logs_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| Error::log_directory(&config.logs_dir, e))?
            .path();
        if path.is_file() && !config.is_store(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn append_line<W: Write>(out: &mut W, line: &str) -> std::io::Result<()> {
    let mut entry = String::with_capacity(line.len() + 1);
    entry.push_str(line);
    entry.push('\n');
    write_flushed(out, &entry)
}

fn write_flushed<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// A writer that fails every n-th write.
    struct FlakyWriter {
        written: Vec<u8>,
        calls: usize,
        fail_every: usize,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls % self.fail_every == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A reader that hands out its data, then fails.
    struct BrokenReader {
        data: Cursor<&'static [u8]>,
    }

    impl Read for BrokenReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device gone")),
                n => Ok(n),
            }
        }
    }

    const LOG: &str = r#"1.2.3.4 - - [10/Oct/2023:13:55:36] "GET /oel/pkw/bmw HTTP/1.1" 200 1024
1.2.3.4 - - [10/Oct/2023:13:55:37] "GET /index.html HTTP/1.1" 200 10
not a log line
1.2.3.4 - - [10/Oct/2023:13:55:38] "GET /felgen/bmw/bmw--felgen.html HTTP/1.1" 200 10
1.2.3.4 - - [10/Oct/2023:13:55:39] "POST /felgen/audi-felgen.html HTTP/1.1" 301 0
"#;

    #[test]
    fn test_filter_lines() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let mut out = Vec::new();

        let stats = filter_lines(&parser, &classifier, Cursor::new(LOG), &mut out).unwrap();

        assert_eq!(stats.lines_read, 5);
        assert_eq!(stats.lines_kept, 2);
        assert_eq!(stats.failures, 0);

        let kept = String::from_utf8(out).unwrap();
        let lines: Vec<_> = kept.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("/oel/pkw/bmw"));
        assert!(lines[1].contains("/felgen/audi-felgen.html"));
    }

    #[test]
    fn test_filter_lines_survives_write_failure() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let mut out = FlakyWriter {
            written: Vec::new(),
            calls: 0,
            fail_every: 2,
        };

        let stats = filter_lines(&parser, &classifier, Cursor::new(LOG), &mut out).unwrap();

        assert_eq!(stats.lines_kept, 1);
        assert_eq!(stats.failures, 1);
        assert!(String::from_utf8(out.written).unwrap().contains("/oel/pkw/bmw"));
    }

    #[test]
    fn test_aborted_input_keeps_partial_counts() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let mut out = Vec::new();
        let mut stats = FilterStats::default();
        let input = BrokenReader {
            data: Cursor::new(LOG.as_bytes()),
        };

        let result = filter_into(&parser, &classifier, input, &mut out, &mut stats);

        assert!(result.is_err());
        assert_eq!(stats.lines_read, 5);
        assert_eq!(stats.lines_kept, 2);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_report_lines() {
        let parser = Parser::new().unwrap();
        let classifier = Classifier::standard().unwrap();
        let extractor = RecordExtractor::new(&parser, &classifier);
        let mut out = Vec::new();

        let stats = report_lines(&extractor, Cursor::new(LOG), &mut out).unwrap();

        assert_eq!(stats.lines_read, 5);
        assert_eq!(stats.rows_written, 2);
        assert_eq!(stats.lines_skipped, 3);

        let report = String::from_utf8(out).unwrap();
        assert_eq!(
            report.lines().nth(1).unwrap(),
            r#""10/Oct/2023:13:55:39","301","/felgen/audi-felgen.html","RIM","audi","","","","","","","""#
        );
    }

    #[test]
    fn test_filter_stats_merge() {
        let mut total = FilterStats::default();
        total.merge(&FilterStats {
            files: 1,
            lines_read: 3,
            lines_kept: 2,
            failures: 0,
        });
        total.merge(&FilterStats {
            files: 1,
            lines_read: 1,
            lines_kept: 0,
            failures: 1,
        });
        assert_eq!(
            total,
            FilterStats {
                files: 2,
                lines_read: 4,
                lines_kept: 2,
                failures: 1,
            }
        );
    }
}
