use serde::Serialize;

use super::extremum::find_extremum;
use crate::error::{EsdError, ValidationError};

/// A point removed during the iterative statistic computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateOutlier {
    pub value: f64,
    /// Distance from the mean of the remaining set, in standard deviations
    pub statistic: f64,
    /// 1-indexed iteration at which the point was removed
    pub removal_rank: usize,
    /// Position of the point in the caller's original ordering
    pub index: usize,
}

/// Shrinking working copy of a sample that remembers original positions
///
/// Values and their original indices are removed in lockstep, in place, so the
/// relative order of the survivors never changes.
struct ActiveSet {
    values: Vec<f64>,
    origins: Vec<usize>,
}

impl ActiveSet {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            origins: (0..values.len()).collect(),
        }
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    /// Remove the entry at `position`, returning its original index
    fn remove(&mut self, position: usize) -> usize {
        self.values.remove(position);
        self.origins.remove(position)
    }
}

/// Compute the first `k` ESD test statistics of `values`
///
/// Each rank removes the most extreme point of what the previous rank left,
/// so ranks are computed strictly in order. `values` itself is left untouched.
pub fn build_statistics(values: &[f64], k: usize) -> Result<Vec<CandidateOutlier>, EsdError> {
    let n = values.len();
    if k >= n {
        return Err(ValidationError::TooManyOutliers {
            max_outliers: k,
            size: n,
        }
        .into());
    }

    let mut active = ActiveSet::new(values);
    let mut candidates = Vec::with_capacity(k);

    for removal_rank in 1..=k {
        let extremum = find_extremum(active.values())?;
        let index = active.remove(extremum.position);

        tracing::trace!(
            "Rank {}: removed {} (index {}), statistic={:.4}",
            removal_rank,
            extremum.value,
            index,
            extremum.statistic
        );

        candidates.push(CandidateOutlier {
            value: extremum.value,
            statistic: extremum.statistic,
            removal_rank,
            index,
        });
    }

    tracing::debug!("Computed {} ESD statistics over {} values", k, n);

    Ok(candidates)
}
