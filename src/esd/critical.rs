use std::collections::HashMap;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{DomainError, EsdError};

/// Decision boundary for one rank of the ESD test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalThreshold {
    pub rank: usize,
    pub value: f64,
}

/// Critical value λ_i for rank `rank` of a sample of size `n`
///
/// λ_i = (n - i) t_{p, n-i-1} / sqrt((n - i - 1 + t²)(n - i + 1)),
/// where p = 1 - α / (2(n - i + 1)).
pub fn critical_value(rank: usize, n: usize, alpha: f64) -> Result<f64, EsdError> {
    if rank + 1 >= n {
        return Err(DomainError::NonPositiveDegreesOfFreedom { rank, size: n }.into());
    }

    let remaining = (n - rank + 1) as f64;
    let dof = (n - rank - 1) as f64;
    let p = 1.0 - alpha / (2.0 * remaining);

    let t_dist =
        StudentsT::new(0.0, 1.0, dof).map_err(|e| DomainError::Distribution(e.to_string()))?;
    let t = t_dist.inverse_cdf(p);

    if !t.is_finite() {
        return Err(DomainError::Distribution(format!(
            "non-finite quantile for p={} with {} degrees of freedom",
            p, dof
        ))
        .into());
    }

    let numerator = (n - rank) as f64 * t;
    let denominator = ((dof + t * t) * remaining).sqrt();

    Ok(numerator / denominator)
}

/// Critical values for ranks 1..=k of a sample of size `n`
///
/// Depends only on (k, n, alpha), never on the data.
pub fn build_critical_values(
    k: usize,
    n: usize,
    alpha: f64,
) -> Result<Vec<CriticalThreshold>, EsdError> {
    let thresholds = (1..=k)
        .map(|rank| {
            critical_value(rank, n, alpha).map(|value| CriticalThreshold { rank, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Computed {} critical values for n={}, alpha={}",
        k,
        n,
        alpha
    );

    Ok(thresholds)
}

/// Memoized critical values, keyed by sample size and significance level
///
/// A request for more ranks than are cached extends the cached prefix.
#[derive(Debug, Default)]
pub struct CriticalValueCache {
    tables: HashMap<(usize, u64), Vec<CriticalThreshold>>,
}

impl CriticalValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Critical values for ranks 1..=k, computing only the ranks not yet cached
    pub fn get(
        &mut self,
        k: usize,
        n: usize,
        alpha: f64,
    ) -> Result<&[CriticalThreshold], EsdError> {
        let key = (n, alpha.to_bits());
        let cached = self.tables.get(&key).map_or(0, Vec::len);

        if cached < k {
            let mut extension = Vec::with_capacity(k - cached);
            let mut failure = None;

            for rank in cached + 1..=k {
                match critical_value(rank, n, alpha) {
                    Ok(value) => extension.push(CriticalThreshold { rank, value }),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }

            // Ranks computed before a failure are still valid
            if !extension.is_empty() {
                self.tables.entry(key).or_default().extend(extension);
                tracing::trace!("Extended critical value table for n={} to {} ranks", n, k);
            }

            if let Some(e) = failure {
                return Err(e);
            }
        }

        match self.tables.get(&key) {
            Some(table) => Ok(&table[..k]),
            None => Ok(&[]),
        }
    }

    /// Number of distinct (n, alpha) tables held
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const ROSNER_CRITICAL_VALUES: [f64; 10] = [
        3.158, 3.151, 3.143, 3.136, 3.128, 3.120, 3.111, 3.103, 3.094, 3.085,
    ];

    fn closed_form(rank: usize, n: usize, alpha: f64) -> f64 {
        let (i, n) = (rank as f64, n as f64);
        let p = 1.0 - alpha / (2.0 * (n - i + 1.0));
        let dof = n - i - 1.0;
        let t = StudentsT::new(0.0, 1.0, dof).unwrap().inverse_cdf(p);
        (n - i) * t / ((dof + t.powi(2)) * (n - i + 1.0)).sqrt()
    }

    #[test]
    fn test_rosner_critical_values() {
        let thresholds = build_critical_values(10, 54, 0.05).unwrap();

        assert_eq!(thresholds.len(), 10);
        for (threshold, expected) in thresholds.iter().zip(ROSNER_CRITICAL_VALUES) {
            // Published values are truncated, not rounded, to 3 decimals
            let truncated = (threshold.value * 1000.0).trunc() as i64;
            assert_eq!(
                truncated,
                (expected * 1000.0).round() as i64,
                "got {}",
                threshold.value
            );
        }
    }

    #[test]
    fn test_matches_closed_form() {
        for &(n, alpha) in &[(10, 0.05), (25, 0.01), (54, 0.05), (200, 0.1)] {
            let k = n - 2;
            let thresholds = build_critical_values(k, n, alpha).unwrap();
            for threshold in &thresholds {
                assert_relative_eq!(
                    threshold.value,
                    closed_form(threshold.rank, n, alpha),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_ranks_are_one_indexed() {
        let thresholds = build_critical_values(4, 20, 0.05).unwrap();
        let ranks: Vec<usize> = thresholds.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_lowest_valid_dof() {
        // rank n - 2 leaves exactly one degree of freedom
        let thresholds = build_critical_values(8, 10, 0.05).unwrap();
        assert!(thresholds[7].value.is_finite());
        assert!(thresholds[7].value > 0.0);
    }

    #[test]
    fn test_non_positive_dof() {
        let err = build_critical_values(9, 10, 0.05).unwrap_err();
        assert!(matches!(
            err,
            EsdError::Domain(DomainError::NonPositiveDegreesOfFreedom { rank: 9, size: 10 })
        ));
    }

    #[test]
    fn test_smaller_alpha_raises_threshold() {
        let strict = critical_value(1, 30, 0.01).unwrap();
        let lenient = critical_value(1, 30, 0.10).unwrap();
        assert!(strict > lenient);
    }

    #[test]
    fn test_cache_matches_direct_computation() {
        let mut cache = CriticalValueCache::new();
        let direct = build_critical_values(10, 54, 0.05).unwrap();

        let cached = cache.get(10, 54, 0.05).unwrap().to_vec();
        assert_eq!(cached, direct);
    }

    #[test]
    fn test_cache_extends_prefix() {
        let mut cache = CriticalValueCache::new();

        let short = cache.get(3, 54, 0.05).unwrap().to_vec();
        let long = cache.get(10, 54, 0.05).unwrap().to_vec();
        let again = cache.get(5, 54, 0.05).unwrap().to_vec();

        assert_eq!(short[..], long[..3]);
        assert_eq!(again[..], long[..5]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_keys_on_size_and_alpha() {
        let mut cache = CriticalValueCache::new();
        cache.get(3, 54, 0.05).unwrap();
        cache.get(3, 54, 0.01).unwrap();
        cache.get(3, 40, 0.05).unwrap();

        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_propagates_domain_error() {
        let mut cache = CriticalValueCache::new();
        let err = cache.get(9, 10, 0.05).unwrap_err();
        assert!(err.is_domain());

        // Valid prefix computed before the failure stays usable
        let thresholds = cache.get(8, 10, 0.05).unwrap();
        assert_eq!(thresholds.len(), 8);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_skips_failed_tables() {
        let mut cache = CriticalValueCache::new();

        // Two values leave no degrees of freedom even at rank 1
        let err = cache.get(1, 2, 0.05).unwrap_err();
        assert!(err.is_domain());
        assert!(cache.is_empty());

        assert!(cache.get(0, 10, 0.05).unwrap().is_empty());
        assert!(cache.is_empty());
    }
}
