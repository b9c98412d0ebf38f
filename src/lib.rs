//! # esd-outliers
//!
//! Generalized Extreme Studentized Deviate (ESD) test for detecting up to `k`
//! outliers in an approximately normal, univariate sample (Rosner, 1983).
//!
//! ```
//! use esd_outliers::{EsdTest, Sample};
//!
//! let sample = Sample::new(vec![
//!     10.1, 9.8, 10.0, 10.3, 9.9, 10.2, 10.0, 9.7, 10.1, 25.0,
//! ])
//! .unwrap();
//! let report = EsdTest::new(2).run(&sample).unwrap();
//!
//! assert_eq!(report.outlier_count, 1);
//! assert_eq!(report.outlier_indices(), vec![9]);
//! ```
//!
//! ## Modules
//!
//! - [`esd`]: the statistic and critical value sequences and the decision rule
//! - [`sample`]: validated one-dimensional samples and text loading
//! - [`outlier`]: outlier exclusion on top of the test
//! - [`error`]: validation and domain errors

pub mod error;
pub mod esd;
pub mod outlier;
pub mod sample;

pub use error::{DomainError, EsdError, ValidationError};
pub use esd::{
    CandidateOutlier, CriticalThreshold, CriticalValueCache, DEFAULT_ALPHA, EsdReport, EsdTest,
    RankOutcome, build_critical_values, build_statistics, esd_test, find_extremum,
};
pub use outlier::{GeneralizedEsdExcluder, OutlierExcluder};
pub use sample::Sample;
