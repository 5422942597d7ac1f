//! Batch renaming of the `name` column in CSV files
//!
//! Every data row gets a name rendered from a template and a running
//! number. When a whole directory is processed the number carries on from
//! one file to the next, so a collection split across several CSVs ends up
//! numbered continuously.

use crate::error::{Error, Result};
use crate::scanner::{is_csv, scan_csv_files};
use crate::table::Records;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Header of the column that gets rewritten
pub const NAME_COLUMN: &str = "name";

/// Name template: `{0}` is replaced by the prefix, `{1}` by the number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameFormat {
    pub template: String,
    pub prefix: String,
}

impl NameFormat {
    pub fn new(template: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            prefix: prefix.into(),
        }
    }

    /// Render the name for `number`
    pub fn render(&self, number: u64) -> String {
        self.template
            .replace("{0}", &self.prefix)
            .replace("{1}", &number.to_string())
    }
}

/// Rewrite the `name` cell of every data row, numbering from `start`.
///
/// Returns the number of rows updated; the next free number is
/// `start + returned`. `source` is only used in error messages.
pub fn rename_records(
    records: &mut Records,
    format: &NameFormat,
    start: u64,
    source: &Path,
) -> Result<u64> {
    if records.data_row_count() == 0 {
        return Err(Error::NoDataRows(source.to_path_buf()));
    }

    let name_index = records
        .find_column(NAME_COLUMN)
        .ok_or_else(|| Error::MissingNameColumn(source.to_path_buf()))?;

    let mut number = start;
    for row in records.rows.iter_mut().skip(1) {
        if let Some(cell) = row.get_mut(name_index) {
            *cell = format.render(number);
        }
        number += 1;
    }

    Ok(number - start)
}

/// Rename one CSV file into `output`, returning the number of rows updated.
///
/// Nothing is written if the file cannot be renamed.
pub fn rename_file(input: &Path, output: &Path, format: &NameFormat, start: u64) -> Result<u64> {
    let mut records = Records::read(input)?;
    let count = rename_records(&mut records, format, start, input)?;
    records.write(output)?;

    debug!(
        input = %input.display(),
        output = %output.display(),
        rows = count,
        "renamed file"
    );

    Ok(count)
}

/// One successfully renamed file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Path shown in reports (relative to the input root in directory mode)
    pub display_path: PathBuf,
    pub first_number: u64,
    pub rows: u64,
}

/// Result of a rename run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameSummary {
    /// Files renamed, in processing order
    pub files: Vec<RenamedFile>,
    /// Files skipped because they could not be renamed (path, reason)
    pub failures: Vec<(PathBuf, String)>,
    /// Number the run started from
    pub start_number: u64,
    /// Number the next row would have received
    pub next_number: u64,
}

impl RenameSummary {
    fn new(start: u64) -> Self {
        Self {
            files: Vec::new(),
            failures: Vec::new(),
            start_number: start,
            next_number: start,
        }
    }

    /// Number of files renamed
    pub fn files_processed(&self) -> usize {
        self.files.len()
    }

    /// Total data rows renamed across all files
    pub fn rows_updated(&self) -> u64 {
        self.next_number - self.start_number
    }

    /// Last number handed out, if any row was renamed
    pub fn last_number(&self) -> Option<u64> {
        (self.rows_updated() > 0).then(|| self.next_number - 1)
    }

    fn record(&mut self, file: RenamedFile) {
        self.next_number = file.first_number + file.rows;
        self.files.push(file);
    }
}

/// Rename a single CSV file or every CSV file under a directory.
///
/// A directory is processed recursively and its layout mirrored under
/// `output`; a file that fails is logged, listed in
/// [`RenameSummary::failures`] and skipped. A single input file must be a
/// `.csv` and any failure on it is returned as an error.
pub fn rename_path(
    input: &Path,
    output: &Path,
    format: &NameFormat,
    start: u64,
) -> Result<RenameSummary> {
    let metadata = fs::metadata(input).map_err(|e| Error::InputPathUnreadable {
        path: input.to_path_buf(),
        source: e,
    })?;

    if metadata.is_dir() {
        return rename_directory(input, output, format, start);
    }

    if !is_csv(input) {
        return Err(Error::UnsupportedInput(input.to_path_buf()));
    }

    // An existing directory as output receives the file under its own name
    let destination = match input.file_name() {
        Some(name) if output.is_dir() => output.join(name),
        _ => output.to_path_buf(),
    };

    let rows = rename_file(input, &destination, format, start)?;

    let mut summary = RenameSummary::new(start);
    summary.record(RenamedFile {
        input: input.to_path_buf(),
        output: destination,
        display_path: input.to_path_buf(),
        first_number: start,
        rows,
    });
    Ok(summary)
}

fn rename_directory(
    input: &Path,
    output: &Path,
    format: &NameFormat,
    start: u64,
) -> Result<RenameSummary> {
    let mut summary = RenameSummary::new(start);
    let nested = nested_output(input, output);

    for file in scan_csv_files(input)? {
        if nested.as_ref().is_some_and(|n| file.relative.starts_with(n)) {
            debug!(path = %file.path.display(), "skipping file under output directory");
            continue;
        }

        let destination = file.output_path(output);
        let first_number = summary.next_number;

        match rename_file(&file.path, &destination, format, first_number) {
            Ok(rows) => summary.record(RenamedFile {
                input: file.path,
                output: destination,
                display_path: file.relative,
                first_number,
                rows,
            }),
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "skipping file");
                summary.failures.push((file.path, e.to_string()));
            }
        }
    }

    Ok(summary)
}

/// Output root relative to the input root, when it lies strictly inside it.
///
/// Files there were written by an earlier run and must not be renamed again.
fn nested_output(input: &Path, output: &Path) -> Option<PathBuf> {
    let input = fs::canonicalize(input).ok()?;
    let output = fs::canonicalize(output).ok()?;
    output
        .strip_prefix(&input)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
