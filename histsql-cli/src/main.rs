//! histsql command-line entry point
//!
//! Reads a feature CSV, writes one `UPDATE` per row to the output file and
//! echoes the same statements to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use histsql_core::{generate_statements, Settings};
use histsql_utils::{
    file::write_lines,
    logging::{init_logging, LogLevel, LoggerConfig},
};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "histsql")]
#[command(about = "Generate SQL UPDATE statements that load histogram columns from a feature CSV")]
#[command(version)]
struct Cli {
    /// Delimited input file with filename and histogram columns [default: features_all.csv]
    input: Option<PathBuf>,

    /// File receiving the statements [default: generated_updates.sql]
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Field delimiter of the input file
    #[arg(long)]
    delimiter: Option<char>,

    /// Table to update
    #[arg(long)]
    table: Option<String>,

    /// Array column receiving the histogram
    #[arg(long)]
    column: Option<String>,

    /// Collection constructor wrapping the values
    #[arg(long)]
    constructor: Option<String>,

    /// Table column matched against the filename
    #[arg(long)]
    key_column: Option<String>,

    /// Input header holding the filename
    #[arg(long)]
    filename_column: Option<String>,

    /// Input header holding the histogram
    #[arg(long)]
    histogram_column: Option<String>,

    /// Do not echo statements to stdout
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Log level (debug, info, warning, error, critical)
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Enable debug logging (same as --log-level debug)
    #[arg(short = 'd', long)]
    debug: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn settings(&self) -> Result<Settings> {
        let settings = Settings::builder(self.config.as_deref())
            .with_context(|| format!("Failed to load config {:?}", self.config))?
            .apply(|s| {
                if let Some(input) = &self.input {
                    s.input = input.clone();
                }
                if let Some(output) = &self.output {
                    s.output = output.clone();
                }
                if let Some(delimiter) = self.delimiter {
                    s.delimiter = delimiter;
                }
                if let Some(table) = &self.table {
                    s.target.table = table.clone();
                }
                if let Some(column) = &self.column {
                    s.target.column = column.clone();
                }
                if let Some(constructor) = &self.constructor {
                    s.target.constructor = constructor.clone();
                }
                if let Some(key_column) = &self.key_column {
                    s.target.key_column = key_column.clone();
                }
                if let Some(filename_column) = &self.filename_column {
                    s.filename_column = filename_column.clone();
                }
                if let Some(histogram_column) = &self.histogram_column {
                    s.histogram_column = histogram_column.clone();
                }
                s.quiet |= self.quiet;
            })
            .build();

        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { LogLevel::Debug } else { cli.log_level };
    init_logging(LoggerConfig {
        colored_output: std::io::stderr().is_terminal(),
        ..LoggerConfig::with_level(level)
    })?;
    tracing::debug!("Logging at {level}");

    let settings = cli.settings()?;
    tracing::debug!("{settings:?}");

    run(&settings)
}

fn run(settings: &Settings) -> Result<()> {
    let (statements, _report) = generate_statements(settings)
        .with_context(|| format!("Failed to convert {}", settings.input.display()))?;

    let lines: Vec<String> = statements.iter().map(ToString::to_string).collect();
    let written = write_lines(&settings.output, &lines)
        .with_context(|| format!("Failed to write {}", settings.output.display()))?;

    if !settings.quiet {
        echo(&mut std::io::stdout().lock(), &lines, &written)?;
    }

    Ok(())
}

/// Print the statements the way they were written, framed by a heading and a footer
fn echo(out: &mut impl Write, lines: &[String], written: &Path) -> Result<()> {
    writeln!(out, "Generated SQL statements (run them one by one against the database):")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    writeln!(out, "The statements were also written to '{}'.", written.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_layout() {
        let mut out = Vec::new();
        let lines = vec!["A;".to_string(), "B;".to_string()];
        echo(&mut out, &lines, Path::new("generated_updates.sql")).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Generated SQL statements (run them one by one against the database):\nA;\nB;\n\n\
             The statements were also written to 'generated_updates.sql'.\n"
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "histsql",
            "in.csv",
            "--table",
            "Images",
            "--delimiter",
            ";",
            "-q",
        ]);
        let settings = cli.settings().unwrap();

        assert_eq!(settings.input, PathBuf::from("in.csv"));
        assert_eq!(settings.output, PathBuf::from("generated_updates.sql"));
        assert_eq!(settings.target.table, "Images");
        assert_eq!(settings.target.column, "histogram_new");
        assert_eq!(settings.delimiter, ';');
        assert!(settings.quiet);
        assert_eq!(cli.log_level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_flag() {
        let cli = Cli::parse_from(["histsql", "--log-level", "warning"]);
        assert_eq!(cli.log_level, LogLevel::Warning);
        assert!(Cli::try_parse_from(["histsql", "--log-level", "verbose"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
