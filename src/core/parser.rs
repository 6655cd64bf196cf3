//! Line parsing and accumulation of the make-model index.
//!
//! Each line is `<model>, <make>[, <ignored>...]`. Fields are split on every comma with no
//! quoting rules, so a comma inside a model or make name shifts the columns.

use crate::domain::model::{LineDiagnostic, MakeModelIndex, ParseMode, ParseReport, RawRecord};
use crate::utils::error::{IndexError, Result};

/// Parses a single line. `Ok(None)` means the line was skipped.
///
/// Only the literal empty string is skipped; a whitespace-only line is parsed like any
/// other and fails for lack of a comma.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<RawRecord>> {
    if line.is_empty() {
        return Ok(None);
    }

    let mut fields = line.split(',');
    let model = fields.next().unwrap_or_default();
    let make = fields.next().ok_or_else(|| IndexError::MalformedRecord {
        line_number,
        content: line.to_string(),
    })?;

    Ok(Some(RawRecord {
        line_number,
        model: model.trim().to_string(),
        make: make.trim().to_string(),
        ignored_fields: fields.count(),
    }))
}

/// Appends the record's model to its make, creating the make on first sight.
pub fn insert_record(index: &mut MakeModelIndex, record: RawRecord) {
    index.entry(record.make).or_default().push(record.model);
}

/// Builds the index from raw lines, aborting on the first malformed line.
pub fn build_index<I, S>(lines: I) -> Result<MakeModelIndex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index = MakeModelIndex::new();
    for (i, line) in lines.into_iter().enumerate() {
        if let Some(record) = parse_line(i + 1, line.as_ref())? {
            insert_record(&mut index, record);
        }
    }
    Ok(index)
}

/// Single pass that keeps going past malformed lines (in `Collect` mode) and records them.
///
/// In `FailFast` mode the scan stops after the first diagnostic.
pub fn scan_lines<I, S>(lines: I, mode: ParseMode) -> ParseReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ParseReport::default();

    for (i, line) in lines.into_iter().enumerate() {
        let line_number = i + 1;
        let line = line.as_ref();

        match parse_line(line_number, line) {
            Ok(Some(record)) => {
                if record.ignored_fields > 0 {
                    tracing::debug!(
                        "Line {}: ignoring {} extra field(s) after make '{}'",
                        line_number,
                        record.ignored_fields,
                        record.make
                    );
                }
                report.records += 1;
                insert_record(&mut report.index, record);
            }
            Ok(None) => report.skipped_empty += 1,
            Err(_) => {
                tracing::warn!("Malformed record on line {}: {:?}", line_number, line);
                report
                    .diagnostics
                    .push(LineDiagnostic::missing_make(line_number, line));
                if mode == ParseMode::FailFast {
                    break;
                }
            }
        }
    }

    report
}

/// Turns a scan into the all-or-nothing result the pipeline needs.
pub fn into_index(report: ParseReport, mode: ParseMode) -> Result<MakeModelIndex> {
    if report.is_clean() {
        return Ok(report.index);
    }

    match mode {
        ParseMode::FailFast => {
            let first = report
                .diagnostics
                .into_iter()
                .next()
                .map(|d| (d.line_number, d.content))
                .unwrap_or_default();
            Err(IndexError::MalformedRecord {
                line_number: first.0,
                content: first.1,
            })
        }
        ParseMode::Collect => Err(IndexError::MalformedRecords {
            diagnostics: report.diagnostics,
        }),
    }
}

/// Splits decoded input into lines. Line terminators are dropped; a final line without a
/// trailing newline is kept.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
