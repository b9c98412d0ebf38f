use thiserror::Error;

/// Main error type for the ESD outlier test
#[derive(Error, Debug)]
pub enum EsdError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: invalid number {token:?}")]
    Parse { line: usize, token: String },
}

impl EsdError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EsdError::Validation(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, EsdError::Domain(_))
    }
}

/// Malformed input, rejected before any computation starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("sample must be one-dimensional, got {rows} rows x {columns} columns")]
    NotOneDimensional { rows: usize, columns: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("sample is empty")]
    EmptySample,

    #[error("max_outliers must be at least 1 (the null hypothesis is zero outliers)")]
    ZeroOutliers,

    #[error("max_outliers ({max_outliers}) must be less than the sample size ({size})")]
    TooManyOutliers { max_outliers: usize, size: usize },

    #[error("alpha must lie strictly between 0 and 1, got {0}")]
    AlphaOutOfRange(f64),

    #[error("value at index {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },
}

/// Numerically undefined intermediate results
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("standard deviation is zero for a sample of {size} values")]
    ZeroStandardDeviation { size: usize },

    #[error("mean or deviations are not finite for a sample of {size} values")]
    NonFiniteMoments { size: usize },

    #[error("at least 2 values are needed for a standard deviation, got {size}")]
    InsufficientData { size: usize },

    #[error(
        "rank {rank} leaves no degrees of freedom for a sample of {size} values (max_outliers must be at most {})",
        .size.saturating_sub(2)
    )]
    NonPositiveDegreesOfFreedom { rank: usize, size: usize },

    #[error("Student-t distribution error: {0}")]
    Distribution(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::TooManyOutliers {
            max_outliers: 12,
            size: 10,
        };
        assert!(err.to_string().contains("max_outliers (12)"));

        let err = ValidationError::NotOneDimensional {
            rows: 3,
            columns: 2,
        };
        assert!(err.to_string().contains("3 rows x 2 columns"));
    }

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::NonPositiveDegreesOfFreedom { rank: 9, size: 10 };
        assert!(err.to_string().contains("at most 8"));
    }

    #[test]
    fn test_esd_error_from_validation() {
        let err: EsdError = ValidationError::ZeroOutliers.into();
        assert!(err.is_validation());
        assert!(!err.is_domain());
    }

    #[test]
    fn test_esd_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EsdError = io_err.into();
        assert!(matches!(err, EsdError::Io(_)));
    }
}
