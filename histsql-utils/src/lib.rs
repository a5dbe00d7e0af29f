//! histsql utilities
//!
//! Ambient helpers shared by the histsql crates: logging setup on top of
//! `tracing`, configuration files in TOML/JSON/YAML, and output-file
//! handling.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod config;
pub mod file;
pub mod logging;

/// Re-export commonly used utilities
pub use config::{merge_configs, ConfigBuilder};
pub use file::{normalize_path, write_lines};
pub use logging::{init_logging, LogLevel, LoggerConfig};

/// Result type used throughout histsql utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path operation error
    #[error("Path operation error: {0}")]
    PathOperation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Config file formats understood by [`ConfigBuilder::load_file`], keyed by extension.
pub fn supported_config_extensions() -> &'static [&'static str] {
    &["toml", "json", "yml", "yaml"]
}

/// Lower-cased extension of `path`, or an empty string.
pub fn extension_of(path: &std::path::Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}
