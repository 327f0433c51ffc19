//! CSV sink for the tabular export layout.
//!
//! ```ignore
//! let mut sink = CsvSink::new(File::create(path)?);
//! sink.write_rows(&report.to_export_rows())?;
//! sink.finish()?;
//! ```

use super::ExportRow;
use std::io::Write;
use std::path::PathBuf;

/// File name used when the caller gives none.
pub const DEFAULT_EXPORT_FILE: &str = "dc_lines.csv";

/// Resolves the export path: default name when empty, `.csv` appended when
/// missing.
pub fn export_path(requested: Option<&str>) -> PathBuf {
    let name = requested.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return PathBuf::from(DEFAULT_EXPORT_FILE);
    }
    if name.ends_with(".csv") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.csv"))
    }
}

/// Writes [`ExportRow`]s as CSV; the header comes from the first row.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            rows_written: 0,
        }
    }

    pub fn write_rows(&mut self, rows: &[ExportRow]) -> csv::Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
            self.rows_written += 1;
        }
        Ok(())
    }

    /// Flush and return how many data rows were written.
    pub fn finish(mut self) -> csv::Result<usize> {
        self.writer.flush()?;
        Ok(self.rows_written)
    }
}
