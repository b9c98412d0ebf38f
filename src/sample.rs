use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EsdError, ValidationError};

// Fields are separated by commas, semicolons or runs of whitespace
static FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,;]\s*|\s+").unwrap());

/// A one-dimensional sample of finite observations
///
/// Construction validates the shape and the values, so every `Sample` can be
/// handed straight to the test. The test itself never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
}

impl Sample {
    /// Build a sample from a flat sequence of values
    pub fn new(values: Vec<f64>) -> Result<Self, ValidationError> {
        if values.is_empty() {
            return Err(ValidationError::EmptySample);
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFinite { index, value });
        }

        Ok(Self { values })
    }

    /// Build a sample from tabular rows
    ///
    /// Accepts a single row or a single column. Anything wider in both
    /// directions is rejected as not one-dimensional.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let Some(expected) = rows.first().map(Vec::len) else {
            return Err(ValidationError::EmptySample);
        };

        for (row, found) in rows.iter().map(Vec::len).enumerate() {
            if found != expected {
                return Err(ValidationError::RaggedRows {
                    row,
                    expected,
                    found,
                });
            }
        }

        if rows.len() > 1 && expected > 1 {
            return Err(ValidationError::NotOneDimensional {
                rows: rows.len(),
                columns: expected,
            });
        }

        Self::new(rows.into_iter().flatten().collect())
    }

    /// Parse delimited text into a sample
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self, EsdError> {
        let mut rows = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let row = FIELD_SEPARATOR
                .split(trimmed)
                .filter(|field| !field.is_empty())
                .map(|field| {
                    field.parse::<f64>().map_err(|_| EsdError::Parse {
                        line: line_no + 1,
                        token: field.to_string(),
                    })
                })
                .collect::<Result<Vec<f64>, EsdError>>()?;

            rows.push(row);
        }

        let sample = Self::from_rows(rows)?;
        tracing::debug!("Parsed sample of {} values", sample.len());
        Ok(sample)
    }

    /// Read and parse a sample file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EsdError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for Sample {
    type Error = ValidationError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for Sample {
    type Error = ValidationError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::new(values.to_vec())
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
