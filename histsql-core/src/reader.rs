//! Reading `filename`/`histogram` records from a delimited file

use crate::settings::Settings;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The two fields of an input row the conversion cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramRecord {
    /// 1-based line of the row in the input
    pub line: u64,
    pub filename: String,
    /// `None` when the row is shorter than the header
    pub histogram: Option<String>,
}

/// Header-aware reader over a delimited file
pub struct HistogramReader<R> {
    inner: csv::Reader<R>,
    filename_index: usize,
    histogram_index: usize,
}

impl HistogramReader<File> {
    /// Open `path` and locate the configured columns
    pub fn from_path(path: &Path, settings: &Settings) -> crate::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, settings, &path.display().to_string())
    }
}

impl<R: Read> HistogramReader<R> {
    /// Wrap any byte source. `source` names it in error messages.
    pub fn from_reader(reader: R, settings: &Settings, source: &str) -> crate::Result<Self> {
        let mut inner = csv::ReaderBuilder::new()
            .delimiter(settings.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = inner.headers()?.clone();
        let locate = |column: &str| {
            headers
                .iter()
                .position(|header| header.trim() == column.trim())
                .ok_or_else(|| crate::Error::MissingColumn {
                    column: column.to_string(),
                    path: source.to_string(),
                })
        };

        let filename_index = locate(&settings.filename_column)?;
        let histogram_index = locate(&settings.histogram_column)?;
        tracing::debug!(
            "{source}: '{}' at column {filename_index}, '{}' at column {histogram_index}",
            settings.filename_column,
            settings.histogram_column
        );

        Ok(Self {
            inner,
            filename_index,
            histogram_index,
        })
    }

    /// Records in input order. Decoding failures are yielded as errors.
    pub fn records(&mut self) -> impl Iterator<Item = crate::Result<HistogramRecord>> + '_ {
        let filename_index = self.filename_index;
        let histogram_index = self.histogram_index;

        self.inner.records().map(move |result| {
            let record = result?;
            Ok(HistogramRecord {
                line: record.position().map_or(0, csv::Position::line),
                filename: record.get(filename_index).unwrap_or_default().to_string(),
                histogram: record.get(histogram_index).map(str::to_string),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str, settings: &Settings) -> crate::Result<Vec<HistogramRecord>> {
        let mut reader = HistogramReader::from_reader(input.as_bytes(), settings, "test.csv")?;
        reader.records().collect()
    }

    #[test]
    fn test_reads_extractor_layout() {
        let input = "filename,width,height,histogram\n\"a.ppm\",2,2,\"[0.5,0.5]\"\n\"b.pgm\",1,1,\"(1, 2, 3)\"\n";
        let records = read_all(input, &Settings::default()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].filename, "a.ppm");
        assert_eq!(records[0].histogram.as_deref(), Some("[0.5,0.5]"));
        assert_eq!(records[1].histogram.as_deref(), Some("(1, 2, 3)"));
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_short_row_has_no_histogram() {
        let input = "histogram,filename,extra\n,a.ppm\n(1)\n";
        let records = read_all(input, &Settings::default()).unwrap();

        assert_eq!(records[0].histogram.as_deref(), Some(""));
        assert_eq!(records[0].filename, "a.ppm");
        assert_eq!(records[1].filename, "");
        assert_eq!(records[1].histogram.as_deref(), Some("(1)"));

        let input = "filename,histogram\nonly_name.ppm\n";
        let records = read_all(input, &Settings::default()).unwrap();
        assert_eq!(records[0].histogram, None);
    }

    #[test]
    fn test_missing_column() {
        let input = "filename,hist\na.ppm,(1)\n";
        match read_all(input, &Settings::default()) {
            Err(crate::Error::MissingColumn { column, path }) => {
                assert_eq!(column, "histogram");
                assert_eq!(path, "test.csv");
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiter_and_padded_headers() {
        let settings = Settings {
            delimiter: ';',
            ..Default::default()
        };
        let input = " filename ; histogram \na.ppm;1,2\n";
        let records = read_all(input, &settings).unwrap();

        assert_eq!(records[0].filename, "a.ppm");
        assert_eq!(records[0].histogram.as_deref(), Some("1,2"));
    }

    #[test]
    fn test_invalid_utf8_row() {
        let input: &[u8] = b"filename,histogram\n\xff.ppm,1\n";
        let mut reader =
            HistogramReader::from_reader(input, &Settings::default(), "test.csv").unwrap();
        let records: Vec<_> = reader.records().collect();

        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], Err(crate::Error::Csv(_))));
    }

    #[test]
    fn test_header_only() {
        let records = read_all("filename,histogram\n", &Settings::default()).unwrap();
        assert!(records.is_empty());
    }
}
