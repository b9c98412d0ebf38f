pub mod esd;

use std::collections::HashSet;

pub use esd::GeneralizedEsdExcluder;

/// Trait for pluggable outlier exclusion algorithms
pub trait OutlierExcluder: Send + Sync {
    /// Returns indices of values to exclude as outliers
    fn find_outliers(&self, values: &[f64]) -> Vec<usize>;

    /// Filter values, returning only non-outliers
    fn filter(&self, values: &[f64]) -> Vec<f64> {
        let outlier_indices: HashSet<_> = self.find_outliers(values).into_iter().collect();

        values
            .iter()
            .enumerate()
            .filter(|(i, _)| !outlier_indices.contains(i))
            .map(|(_, &v)| v)
            .collect()
    }

    /// Name of the algorithm for logging
    fn name(&self) -> &'static str;
}
