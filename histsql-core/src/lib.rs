//! histsql core - histogram parsing and SQL update generation
//!
//! This crate turns rows of a delimited feature file into `UPDATE`
//! statements that rebuild an array-typed column from the row's histogram:
//! - [`histogram`] parses the textual histogram cell
//! - [`statement`] models and renders one `UPDATE`
//! - [`reader`] pulls `filename`/`histogram` records out of the file
//! - [`convert`] runs the single pass from records to statements

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::multiple_crate_versions,  // Common in large dependency trees
    clippy::module_name_repetitions,  // Often necessary for clarity
)]

pub mod convert;
pub mod histogram;
pub mod reader;
pub mod settings;
pub mod statement;

pub use convert::{convert, generate_statements, ConversionReport, StatementSink};
pub use histogram::{format_float, parse_histogram, Histogram, HistogramParse};
pub use reader::{HistogramReader, HistogramRecord};
pub use settings::Settings;
pub use statement::{StatementTarget, UpdateStatement};

/// Result type used throughout histsql core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for histsql core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The input could not be decoded as delimited text
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A required column is not present in the header row
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { column: String, path: String },

    /// A configured SQL identifier is not a plain identifier
    #[error("Invalid SQL identifier for {field}: '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Utility error
    #[error(transparent)]
    Util(#[from] histsql_utils::UtilError),
}
