use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::error::SweepError;
use crate::metrics::SweepRow;

pub const REPORT_FILE_NAME: &str = "blend_sweep.csv";
pub const REPORT_HEADER: [&str; 4] = ["blend", "indra_index", "rim_mean", "coherence_mean"];

/// CSV sink for sweep rows.
///
/// The header is written on creation and every row is flushed as it is
/// appended, so rows from completed points survive an aborted sweep.
pub struct SweepReport<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl SweepReport<File> {
    /// Create (or truncate) the report file, creating parent directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SweepError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| SweepError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_writer(file)
    }
}

impl<W: Write> SweepReport<W> {
    pub fn from_writer(writer: W) -> Result<Self, SweepError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(REPORT_HEADER)?;
        writer.flush().map_err(csv::Error::from)?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn append(&mut self, row: &SweepRow) -> Result<(), SweepError> {
        self.writer.serialize(row)?;
        self.writer.flush().map_err(csv::Error::from)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W, SweepError> {
        self.writer.into_inner().map_err(|err| {
            let source = io::Error::new(err.error().kind(), err.to_string());
            SweepError::Report(csv::Error::from(source))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(report: SweepReport<Vec<u8>>) -> Vec<String> {
        let bytes = report.finish().expect("in-memory writer");
        String::from_utf8(bytes)
            .expect("utf-8 csv")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn empty_report_still_has_header() {
        let report = SweepReport::from_writer(Vec::new()).expect("header");
        assert_eq!(lines(report), vec!["blend,indra_index,rim_mean,coherence_mean"]);
    }

    #[test]
    fn rows_follow_append_order() {
        let mut report = SweepReport::from_writer(Vec::new()).expect("header");
        for blend in [0.5, 0.25] {
            report
                .append(&SweepRow {
                    blend,
                    indra_index: 1.0,
                    rim_mean: 2.5,
                    coherence_mean: 3.0,
                })
                .expect("row");
        }
        assert_eq!(report.rows_written(), 2);
        assert_eq!(
            lines(report),
            vec![
                "blend,indra_index,rim_mean,coherence_mean",
                "0.5,1.0,2.5,3.0",
                "0.25,1.0,2.5,3.0",
            ]
        );
    }

    #[test]
    fn create_makes_parent_directories() {
        let scratch = tempfile::tempdir().expect("scratch dir");
        let path = scratch.path().join("artifacts").join(REPORT_FILE_NAME);
        let report = SweepReport::create(&path).expect("report file");
        report.finish().expect("flush");
        let contents = fs::read_to_string(&path).expect("readable");
        assert_eq!(contents, "blend,indra_index,rim_mean,coherence_mean\n");
    }
}
