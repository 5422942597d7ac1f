//! In-memory CSV records
//!
//! The rename tool rewrites a single column and must leave every other cell
//! untouched, so files are kept as a plain rows×columns matrix of strings
//! with no type detection.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// All records of a CSV file, header first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    pub rows: Vec<Vec<String>>,
}

impl Records {
    /// Wrap an existing matrix
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Read every record of a CSV file.
    ///
    /// Rows must all have the same number of fields as the first one.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| Error::Csv {
                path: path.to_path_buf(),
                source: e,
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { rows })
    }

    /// Parse records from a string (useful for testing)
    pub fn parse_str(content: &str, source_name: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| Error::Csv {
                path: source_name.into(),
                source: e,
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { rows })
    }

    /// Header row, if any
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of records after the header
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Find a header cell by exact name
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header()?.iter().position(|h| h == name)
    }

    /// Serialize all records to CSV text
    pub fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row).map_err(|e| Error::Csv {
                path: "<memory>".into(),
                source: e,
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write all records, creating parent directories as needed
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        write_rows(path, &self.rows)
    }
}

/// CSV writer configured the same way for every output file
pub(crate) fn csv_writer<W: std::io::Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(inner)
}

/// Write rows to `path`, creating missing parent directories
pub(crate) fn write_rows<R, I, S>(path: &Path, rows: R) -> Result<()>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let write_err = |e: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let file = File::create(path).map_err(write_err)?;
    let mut writer = csv_writer(file);

    for row in rows {
        writer.write_record(row).map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    writer.flush().map_err(write_err)?;

    Ok(())
}
