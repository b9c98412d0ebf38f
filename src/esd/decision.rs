use serde::Serialize;

use super::critical::{CriticalThreshold, CriticalValueCache, build_critical_values};
use super::statistics::{CandidateOutlier, build_statistics};
use super::DEFAULT_ALPHA;
use crate::error::{EsdError, ValidationError};
use crate::sample::Sample;

/// Generalized ESD test configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsdTest {
    max_outliers: usize,
    alpha: f64,
}

impl EsdTest {
    /// Test for up to `max_outliers` outliers at the default significance level
    pub fn new(max_outliers: usize) -> Self {
        Self {
            max_outliers,
            alpha: DEFAULT_ALPHA,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn max_outliers(&self) -> usize {
        self.max_outliers
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Check the parameters against a sample of `size` values
    ///
    /// `max_outliers = size - 1` passes here and fails later with a domain
    /// error, since its last rank has no degrees of freedom.
    pub fn validate(&self, size: usize) -> Result<(), ValidationError> {
        if self.max_outliers == 0 {
            return Err(ValidationError::ZeroOutliers);
        }

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ValidationError::AlphaOutOfRange(self.alpha));
        }

        if self.max_outliers >= size {
            return Err(ValidationError::TooManyOutliers {
                max_outliers: self.max_outliers,
                size,
            });
        }

        Ok(())
    }

    /// Run the test and keep every intermediate value
    pub fn run(&self, sample: &Sample) -> Result<EsdReport, EsdError> {
        self.validate(sample.len())?;
        let thresholds = build_critical_values(self.max_outliers, sample.len(), self.alpha)?;
        self.decide(sample, thresholds)
    }

    /// Like [`EsdTest::run`], reusing critical values across samples of equal size
    pub fn run_cached(
        &self,
        sample: &Sample,
        cache: &mut CriticalValueCache,
    ) -> Result<EsdReport, EsdError> {
        self.validate(sample.len())?;
        let thresholds = cache
            .get(self.max_outliers, sample.len(), self.alpha)?
            .to_vec();
        self.decide(sample, thresholds)
    }

    fn decide(
        &self,
        sample: &Sample,
        thresholds: Vec<CriticalThreshold>,
    ) -> Result<EsdReport, EsdError> {
        let candidates = build_statistics(sample.values(), self.max_outliers)?;

        let passing: Vec<usize> = candidates
            .iter()
            .zip(&thresholds)
            .filter(|(candidate, threshold)| candidate.statistic > threshold.value)
            .map(|(candidate, _)| candidate.removal_rank)
            .collect();

        let outlier_count = passing.iter().copied().max().unwrap_or(0);

        if passing.len() < outlier_count && !passing.is_empty() {
            tracing::warn!(
                "Rank {} rejects while lower ranks {:?} do not; all {} candidates are reported",
                outlier_count,
                (1..outlier_count)
                    .filter(|r| !passing.contains(r))
                    .collect::<Vec<_>>(),
                outlier_count
            );
        }

        tracing::debug!(
            "ESD test: n={}, k={}, alpha={}, outliers={}",
            sample.len(),
            self.max_outliers,
            self.alpha,
            outlier_count
        );

        Ok(EsdReport {
            outlier_count,
            alpha: self.alpha,
            sample_size: sample.len(),
            candidates,
            thresholds,
        })
    }
}

/// Full outcome of one ESD test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EsdReport {
    pub outlier_count: usize,
    pub alpha: f64,
    pub sample_size: usize,
    pub candidates: Vec<CandidateOutlier>,
    pub thresholds: Vec<CriticalThreshold>,
}

/// One rank of a report, with its statistic paired against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankOutcome {
    pub rank: usize,
    pub value: f64,
    pub index: usize,
    pub statistic: f64,
    pub critical_value: f64,
    pub rejects: bool,
}

impl EsdReport {
    pub fn ranks(&self) -> impl Iterator<Item = RankOutcome> + '_ {
        self.candidates
            .iter()
            .zip(&self.thresholds)
            .map(|(candidate, threshold)| RankOutcome {
                rank: candidate.removal_rank,
                value: candidate.value,
                index: candidate.index,
                statistic: candidate.statistic,
                critical_value: threshold.value,
                rejects: candidate.statistic > threshold.value,
            })
    }

    /// Candidates certified as outliers, in removal order
    pub fn outliers(&self) -> &[CandidateOutlier] {
        &self.candidates[..self.outlier_count]
    }

    /// Original positions of the certified outliers
    pub fn outlier_indices(&self) -> Vec<usize> {
        self.outliers().iter().map(|c| c.index).collect()
    }
}

/// Generalized ESD test (Rosner, 1983)
///
/// Returns how many of the `max_outliers` most extreme points of `data` are
/// outliers at significance level `alpha`. `data` is not modified.
///
/// # Examples
///
/// ```
/// use esd_outliers::esd_test;
///
/// let data = [10.1, 9.8, 10.0, 10.3, 9.9, 10.2, 10.0, 9.7, 10.1, 25.0];
/// assert_eq!(esd_test(&data, 2, 0.05).unwrap(), 1);
/// ```
pub fn esd_test(data: &[f64], max_outliers: usize, alpha: f64) -> Result<usize, EsdError> {
    let sample = Sample::try_from(data)?;
    let report = EsdTest::new(max_outliers).with_alpha(alpha).run(&sample)?;
    Ok(report.outlier_count)
}
