//! Run settings: where to read, where to write, what to emit

use crate::statement::StatementTarget;
use histsql_utils::config::ConfigBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one conversion run.
///
/// Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Delimited input file with a header row
    pub input: PathBuf,
    /// File receiving the generated statements
    pub output: PathBuf,
    /// Field delimiter of the input file
    pub delimiter: char,
    /// Header name of the key column in the input
    pub filename_column: String,
    /// Header name of the histogram column in the input
    pub histogram_column: String,
    /// Identifiers used in the generated SQL
    pub target: StatementTarget,
    /// Skip echoing statements to stdout
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("features_all.csv"),
            output: PathBuf::from("generated_updates.sql"),
            delimiter: ',',
            filename_column: "filename".to_string(),
            histogram_column: "histogram".to_string(),
            target: StatementTarget::default(),
            quiet: false,
        }
    }
}

impl Settings {
    /// Defaults with `config` merged over them, ready for further overrides
    pub fn builder(config: Option<&Path>) -> crate::Result<ConfigBuilder<Self>> {
        if let Some(path) = config {
            tracing::debug!("Loading settings from {}", path.display());
        }
        Ok(ConfigBuilder::new().load_optional(config)?)
    }

    /// Check everything that can be checked before touching the input
    pub fn validate(&self) -> crate::Result<()> {
        self.delimiter_byte()?;
        for (name, column) in [
            ("filename_column", &self.filename_column),
            ("histogram_column", &self.histogram_column),
        ] {
            if column.trim().is_empty() {
                return Err(crate::Error::Config(format!("{name} must not be empty")));
            }
        }
        self.target.validate()
    }

    /// The delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> crate::Result<u8> {
        match u8::try_from(self.delimiter) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(byte),
            _ => Err(crate::Error::Config(format!(
                "Unsupported delimiter {:?}: expected a single ASCII character other than a quote or newline",
                self.delimiter
            ))),
        }
    }
}
