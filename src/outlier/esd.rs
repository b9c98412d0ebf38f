use super::OutlierExcluder;
use crate::error::EsdError;
use crate::esd::EsdTest;
use crate::sample::Sample;

/// Outlier exclusion backed by the generalized ESD test
///
/// Unlike [`EsdTest`], this never fails: samples the test cannot handle
/// simply yield no outliers.
pub struct GeneralizedEsdExcluder {
    max_outliers: usize,
    alpha: f64,
}

impl GeneralizedEsdExcluder {
    pub fn new(max_outliers: usize, alpha: f64) -> Self {
        Self {
            max_outliers,
            alpha,
        }
    }

    /// Largest usable bound for a sample of `n` values
    fn effective_max_outliers(&self, n: usize) -> usize {
        self.max_outliers.min(n.saturating_sub(2))
    }
}

impl OutlierExcluder for GeneralizedEsdExcluder {
    fn find_outliers(&self, values: &[f64]) -> Vec<usize> {
        let k = self.effective_max_outliers(values.len());
        if k == 0 {
            return Vec::new();
        }

        let report = Sample::try_from(values)
            .map_err(EsdError::from)
            .and_then(|sample| EsdTest::new(k).with_alpha(self.alpha).run(&sample));

        match report {
            Ok(report) => report.outlier_indices(),
            Err(e) => {
                tracing::debug!("Skipping outlier exclusion: {}", e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "Generalized ESD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esd_no_outliers() {
        let excluder = GeneralizedEsdExcluder::new(3, 0.05);
        let values: Vec<f64> = (1..=30).map(|i| i as f64).collect();

        assert!(excluder.find_outliers(&values).is_empty());
    }

    #[test]
    fn test_esd_single_outlier() {
        let excluder = GeneralizedEsdExcluder::new(2, 0.05);
        let values = vec![10.1, 9.8, 10.0, 10.3, 9.9, 10.2, 10.0, 9.7, 10.1, 25.0];

        assert_eq!(excluder.find_outliers(&values), vec![9]);
    }

    #[test]
    fn test_esd_filter() {
        let excluder = GeneralizedEsdExcluder::new(4, 0.05);
        let values = vec![
            1.0, 1.1, 0.9, 1.0, 1.2, 0.8, 1.05, 0.95, 50.0, -40.0, 60.0, -70.0,
        ];
        let filtered = excluder.filter(&values);

        assert_eq!(filtered, vec![1.0, 1.1, 0.9, 1.0, 1.2, 0.8, 1.05, 0.95]);
    }

    #[test]
    fn test_esd_small_dataset() {
        let excluder = GeneralizedEsdExcluder::new(5, 0.05);

        assert!(excluder.find_outliers(&[10.0, 100.0]).is_empty());
        assert!(excluder.find_outliers(&[10.0]).is_empty());
        assert!(excluder.find_outliers(&[]).is_empty());
    }

    #[test]
    fn test_esd_clamps_bound_to_sample_size() {
        // Bound of 10 on 6 values is clamped to 4
        let excluder = GeneralizedEsdExcluder::new(10, 0.05);
        let values = vec![10.0, 10.2, 9.9, 10.1, 10.05, 30.0];

        assert_eq!(excluder.find_outliers(&values), vec![5]);
    }

    #[test]
    fn test_esd_identical_values() {
        let excluder = GeneralizedEsdExcluder::new(2, 0.05);
        let values = vec![10.0, 10.0, 10.0, 10.0, 10.0];

        assert!(excluder.find_outliers(&values).is_empty());
    }

    #[test]
    fn test_esd_non_finite_values() {
        let excluder = GeneralizedEsdExcluder::new(2, 0.05);
        let values = vec![10.0, f64::NAN, 10.2, 9.9, 10.1];

        assert!(excluder.find_outliers(&values).is_empty());
    }
}
