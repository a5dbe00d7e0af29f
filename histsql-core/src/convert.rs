//! The conversion pass: one statement per input record, in input order

use crate::histogram::{parse_histogram, HistogramParse};
use crate::reader::HistogramReader;
use crate::settings::Settings;
use crate::statement::{StatementTarget, UpdateStatement};
use std::io::Read;

/// Counters for one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Records read from the input
    pub rows: usize,
    /// Statements handed to the sink
    pub statements: usize,
    /// Records whose histogram cell was missing or blank
    pub empty: usize,
    /// Records whose histogram cell could not be parsed
    pub malformed: usize,
}

/// Destination for generated statements
pub trait StatementSink<'a> {
    fn accept(&mut self, statement: UpdateStatement<'a>) -> crate::Result<()>;
}

impl<'a> StatementSink<'a> for Vec<UpdateStatement<'a>> {
    fn accept(&mut self, statement: UpdateStatement<'a>) -> crate::Result<()> {
        self.push(statement);
        Ok(())
    }
}

/// Turn every record of `reader` into a statement for `target`.
///
/// Unparsable histograms are logged and emitted as an empty array.
pub fn convert<'a, R, S>(
    reader: &mut HistogramReader<R>,
    target: &'a StatementTarget,
    sink: &mut S,
) -> crate::Result<ConversionReport>
where
    R: Read,
    S: StatementSink<'a>,
{
    let mut report = ConversionReport::default();

    for record in reader.records() {
        let record = record?;
        report.rows += 1;

        let parse = parse_histogram(record.histogram.as_deref());
        match &parse {
            HistogramParse::Values(values) => {
                tracing::debug!("line {}: {} values for '{}'", record.line, values.len(), record.filename);
            }
            HistogramParse::Empty => report.empty += 1,
            HistogramParse::Malformed { raw, reason } => {
                report.malformed += 1;
                tracing::warn!(
                    "line {}: unparsable histogram for '{}' ({}): {}; emitting an empty array",
                    record.line,
                    record.filename,
                    reason,
                    raw
                );
            }
        }

        sink.accept(UpdateStatement::new(target, record.filename, parse.into_histogram()))?;
        report.statements += 1;
    }

    Ok(report)
}

/// Read `settings.input` and collect its statements
pub fn generate_statements(
    settings: &Settings,
) -> crate::Result<(Vec<UpdateStatement<'_>>, ConversionReport)> {
    settings.validate()?;

    let mut reader = HistogramReader::from_path(&settings.input, settings)?;
    let mut statements = Vec::new();
    let report = convert(&mut reader, &settings.target, &mut statements)?;

    tracing::info!(
        "{}: {} rows, {} statements ({} empty, {} malformed)",
        settings.input.display(),
        report.rows,
        report.statements,
        report.empty,
        report.malformed
    );

    Ok((statements, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run(input: &str) -> (Vec<String>, ConversionReport) {
        let settings = Settings::default();
        let mut reader = HistogramReader::from_reader(input.as_bytes(), &settings, "test.csv").unwrap();
        let mut statements = Vec::new();
        let report = convert(&mut reader, &settings.target, &mut statements).unwrap();
        (statements.iter().map(ToString::to_string).collect(), report)
    }

    #[test]
    fn test_one_statement_per_row() {
        let input = "filename,histogram\n\
                     a.ppm,\"(1, 2, 3)\"\n\
                     b.ppm,\n\
                     c.ppm,\"(1, x)\"\n\
                     d.ppm\n";
        let (lines, report) = run(input);

        assert_eq!(lines.len(), 4);
        assert_eq!(
            report,
            ConversionReport {
                rows: 4,
                statements: 4,
                empty: 2,
                malformed: 1,
            }
        );
        assert_eq!(
            lines[0],
            "UPDATE Features SET histogram_new = histogram_varray(1.0, 2.0, 3.0) WHERE filename = 'a.ppm';"
        );
        for line in &lines[1..] {
            assert!(line.contains("histogram_varray()"), "{line}");
        }
    }

    #[test]
    fn test_literal_quotes_inside_cell() {
        let input = "filename,histogram\na.ppm,\"\"\"(1, 2, 3)\"\"\"\n";
        let (lines, report) = run(input);

        assert_eq!(report.malformed, 0);
        assert!(lines[0].contains("histogram_varray(1.0, 2.0, 3.0)"));
    }

    #[test]
    fn test_order_is_preserved() {
        let input = "filename,histogram\nz.ppm,1\na.ppm,2\nm.ppm,3\n";
        let (lines, _) = run(input);

        let keys: Vec<_> = lines
            .iter()
            .map(|l| l.rsplit('=').next().unwrap().trim().to_string())
            .collect();
        assert_eq!(keys, vec!["'z.ppm';", "'a.ppm';", "'m.ppm';"]);
    }

    #[test]
    fn test_generate_statements_from_file() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("features_all.csv");
        std::fs::write(&input, "filename,histogram\na.ppm,\"(0.5)\"\n").unwrap();

        let settings = Settings { input, ..Default::default() };
        let (statements, report) = generate_statements(&settings).unwrap();

        assert_eq!(report.statements, 1);
        assert_eq!(statements[0].key, "a.ppm");
        assert_eq!(statements[0].values.values(), &[0.5]);
    }

    #[test]
    fn test_generate_statements_missing_input() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings {
            input: temp_dir.path().join("absent.csv"),
            ..Default::default()
        };

        assert!(matches!(generate_statements(&settings), Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_undecodable_row_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("features_all.csv");
        std::fs::write(&input, b"filename,histogram\n\xff.ppm,1\n").unwrap();

        let settings = Settings { input, ..Default::default() };
        assert!(matches!(generate_statements(&settings), Err(crate::Error::Csv(_))));
    }

    #[test]
    fn test_generate_statements_rejects_bad_target() {
        let mut settings = Settings::default();
        settings.target.column = "a b".to_string();

        assert!(matches!(
            generate_statements(&settings),
            Err(crate::Error::InvalidIdentifier { field: "column", .. })
        ));
    }
}
