//! Generalized Extreme Studentized Deviate test (Rosner, 1983).
//!
//! The test runs in three steps:
//!
//! 1. [`build_statistics`] repeatedly removes the point farthest from the
//!    mean and records its studentized distance R_i.
//! 2. [`build_critical_values`] computes the Student-t based threshold λ_i for
//!    every rank. It depends only on the sample size and alpha, so it can be
//!    shared through a [`CriticalValueCache`].
//! 3. [`EsdTest`] pairs R_i with λ_i by rank. The outlier count is the largest
//!    rank with R_i > λ_i, or zero.

pub mod critical;
pub mod decision;
pub mod extremum;
pub mod statistics;

pub use critical::{CriticalThreshold, CriticalValueCache, build_critical_values, critical_value};
pub use decision::{EsdReport, EsdTest, RankOutcome, esd_test};
pub use extremum::{Extremum, find_extremum};
pub use statistics::{CandidateOutlier, build_statistics};

/// Significance level used when none is given
pub const DEFAULT_ALPHA: f64 = 0.05;
