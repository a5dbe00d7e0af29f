//! Histogram cell parsing and float literal formatting
//!
//! A histogram cell looks like `"(0.1, 0.2, 0.3)"`: optionally wrapped in
//! literal double quotes, optionally enclosed in parentheses (or square
//! brackets, as written by the feature extractor), comma separated.

use std::fmt;

/// Characters stripped from the start of a cell after unquoting
const OPENERS: &[char] = &['(', '['];
/// Characters stripped from the end of a cell after unquoting
const CLOSERS: &[char] = &[')', ']'];

/// Parsed histogram values, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram(Vec<f64>);

impl Histogram {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<f64> for Histogram {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Histogram {
    /// Comma separated float literals, e.g. `1.0, 2.5, 1e-05`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&format_float(value))?;
        }
        Ok(())
    }
}

/// Outcome of parsing one histogram cell
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramParse {
    /// The cell held a list (possibly with zero entries)
    Values(Histogram),
    /// The cell was missing or blank
    Empty,
    /// Some entry was not a finite number; the whole cell is rejected
    Malformed { raw: String, reason: String },
}

impl HistogramParse {
    /// Values to emit. Empty and malformed cells both become an empty list.
    pub fn into_histogram(self) -> Histogram {
        match self {
            Self::Values(histogram) => histogram,
            Self::Empty | Self::Malformed { .. } => Histogram::default(),
        }
    }
}

/// Remove quoting and enclosing brackets around the list body
fn strip_enclosing(cell: &str) -> &str {
    cell.trim()
        .trim_matches('"')
        .trim()
        .trim_start_matches(OPENERS)
        .trim_end_matches(CLOSERS)
        .trim()
}

/// Parse a histogram cell. `None` means the cell was absent from the row.
pub fn parse_histogram(cell: Option<&str>) -> HistogramParse {
    let raw = match cell {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return HistogramParse::Empty,
    };

    let body = strip_enclosing(raw);
    let mut values = Vec::new();

    for piece in body.split(',').map(str::trim).filter(|piece| !piece.is_empty()) {
        match piece.parse::<f64>() {
            Ok(value) if value.is_finite() => values.push(value),
            Ok(_) => {
                return HistogramParse::Malformed {
                    raw: raw.to_string(),
                    reason: format!("non-finite value '{piece}'"),
                }
            }
            Err(e) => {
                return HistogramParse::Malformed {
                    raw: raw.to_string(),
                    reason: format!("'{piece}': {e}"),
                }
            }
        }
    }

    HistogramParse::Values(Histogram::new(values))
}

/// Render a float so it always reads as a float literal.
///
/// Shortest round-trip digits; positional notation for magnitudes in
/// `[1e-4, 1e16)` (and zero) with at least one fractional digit, exponent
/// notation with a signed two-digit exponent otherwise.
pub fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        let mut text = value.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let text = format!("{value:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}
