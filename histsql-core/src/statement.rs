//! `UPDATE` statement model and rendering

use crate::histogram::Histogram;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static::lazy_static! {
    /// Plain or schema-qualified identifier: `Features`, `app.Features`, `HIST$1`
    static ref IDENTIFIER: regex::Regex =
        regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_$#]*(\.[A-Za-z_][A-Za-z0-9_$#]*)?$")
            .expect("identifier pattern is valid");
}

/// Identifiers the generated statements refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementTarget {
    /// Table being updated
    pub table: String,
    /// Array-typed column that receives the histogram
    pub column: String,
    /// Collection type constructor wrapping the values
    pub constructor: String,
    /// Column matched against the row's filename
    pub key_column: String,
}

impl Default for StatementTarget {
    fn default() -> Self {
        Self {
            table: "Features".to_string(),
            column: "histogram_new".to_string(),
            constructor: "histogram_varray".to_string(),
            key_column: "filename".to_string(),
        }
    }
}

impl StatementTarget {
    /// Reject identifiers that would not be interpolated verbatim into SQL
    pub fn validate(&self) -> crate::Result<()> {
        let fields = [
            ("table", &self.table),
            ("column", &self.column),
            ("constructor", &self.constructor),
            ("key_column", &self.key_column),
        ];
        for (field, value) in fields {
            if !IDENTIFIER.is_match(value) {
                return Err(crate::Error::InvalidIdentifier {
                    field,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// One `UPDATE ... SET column = constructor(...) WHERE key_column = '...'`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement<'a> {
    pub target: &'a StatementTarget,
    pub key: String,
    pub values: Histogram,
}

impl<'a> UpdateStatement<'a> {
    pub fn new(target: &'a StatementTarget, key: impl Into<String>, values: Histogram) -> Self {
        Self {
            target,
            key: key.into(),
            values,
        }
    }
}

/// Single-quoted SQL string literal with embedded quotes doubled
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl fmt::Display for UpdateStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UPDATE {} SET {} = {}({}) WHERE {} = {};",
            self.target.table,
            self.target.column,
            self.target.constructor,
            self.values,
            self.target.key_column,
            quote_literal(&self.key),
        )
    }
}
